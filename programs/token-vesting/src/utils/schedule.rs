//! Period-based linear vesting with a cliff.
//! - elapsed_periods = floor(max(0, now - start) / period_length), capped at period_count
//! - vested = 0 while elapsed_periods < cliff_periods
//! - vested = total * elapsed_periods / period_count otherwise (cumulative since start)

use crate::state::{Lock, PaymentPlan};

/// Whole periods elapsed since `start`, clamped to the plan's period count.
pub fn elapsed_periods(plan: &PaymentPlan, start: i64, now: i64) -> u32 {
    if now <= start || plan.period_length == 0 {
        return 0;
    }
    let elapsed = now.abs_diff(start);
    let periods = elapsed / plan.period_length;
    periods.min(plan.period_count as u64) as u32
}

/// Cumulative amount vested as of `now`.
pub fn vested_amount(plan: &PaymentPlan, total_amount: u64, start: i64, now: i64) -> u64 {
    if plan.period_count == 0 {
        return 0;
    }
    let periods = elapsed_periods(plan, start, now);
    if periods < plan.cliff_periods {
        return 0;
    }
    // periods <= period_count, so the quotient never exceeds total_amount.
    let v = (total_amount as u128) * (periods as u128) / (plan.period_count as u128);
    v as u64
}

/// Vested minus already released. Plan revocation is ignored here.
pub fn releasable_amount(lock: &Lock, plan: &PaymentPlan, now: i64) -> u64 {
    vested_amount(plan, lock.total_amount, lock.start, now).saturating_sub(lock.released_amount)
}
