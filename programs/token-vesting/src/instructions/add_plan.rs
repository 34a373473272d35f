use anchor_lang::prelude::*;

use crate::constants::{PLAN_REGISTRY_SEED, VESTING_STATE_SEED};
use crate::state::{PlanRegistry, VestingState};

/// Append a payment plan. Returns its index.
pub fn add_plan(
    ctx: Context<AddPlan>,
    period_length: u64,
    period_count: u32,
    cliff_periods: u32,
) -> Result<u32> {
    ctx.accounts
        .vesting_state
        .ensure_admin(&ctx.accounts.admin.key())?;

    let plan_index = ctx
        .accounts
        .plan_registry
        .add_plan(period_length, period_count, cliff_periods)?;

    msg!(
        "plan {} added: period_length={} period_count={} cliff_periods={}",
        plan_index,
        period_length,
        period_count,
        cliff_periods
    );
    emit!(PaymentPlanAdded {
        plan_index,
        period_length,
        period_count,
        cliff_periods,
    });

    Ok(plan_index)
}

#[derive(Accounts)]
pub struct AddPlan<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct PaymentPlanAdded {
    pub plan_index: u32,
    pub period_length: u64,
    pub period_count: u32,
    pub cliff_periods: u32,
}
