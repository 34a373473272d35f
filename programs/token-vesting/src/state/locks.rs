use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::PlanRegistry;
use crate::utils::schedule;

/// Escrowed commitment for a single beneficiary.
///
/// Each lock lives in its own PDA derived from the beneficiary, so there is
/// no program-wide cap on the number of locks. A freshly created account is
/// all zeroes; it only counts as a lock once `total_amount > 0`. Locks are
/// never closed.
#[account]
#[derive(Copy, Debug, Default, PartialEq, Eq)]
pub struct Lock {
    pub beneficiary: Pubkey,
    /// Fixed at creation.
    pub total_amount: u64,
    /// Paid out so far; never exceeds `total_amount`.
    pub released_amount: u64,
    /// Unix seconds; periods are measured from here.
    pub start: i64,
    /// Index into the plan registry.
    pub plan_index: u32,
}

/// A release computed against a lock but not yet applied.
///
/// Produced by [`Lock::prepare_release`] from an immutable view; the lock
/// only changes once [`Lock::commit_release`] consumes it, which happens
/// after the vault transfer succeeded.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingRelease {
    beneficiary: Pubkey,
    released_before: u64,
    amount: u64,
}

impl PendingRelease {
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

impl Lock {
    pub const SIZE: usize =
        32 + // beneficiary
        8 +  // total_amount
        8 +  // released_amount
        8 +  // start
        4;   // plan_index

    pub fn is_open(&self) -> bool {
        self.total_amount > 0
    }

    pub fn is_fully_released(&self) -> bool {
        self.is_open() && self.released_amount == self.total_amount
    }

    /// Validate a lock request against the beneficiary's slot and build the
    /// entry to store once funds are in escrow. Checks run in a fixed order
    /// so callers see a stable reason.
    pub fn prepare(
        slot: &Lock,
        plans: &PlanRegistry,
        beneficiary: Pubkey,
        total_amount: u64,
        start: i64,
        plan_index: u32,
        now: i64,
    ) -> core::result::Result<Lock, VestingError> {
        if beneficiary == Pubkey::default() {
            return Err(VestingError::InvalidBeneficiary);
        }
        if total_amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        plans.lockable(plan_index)?;
        if start < now {
            return Err(VestingError::ScheduleInPast);
        }
        if slot.is_open() {
            return Err(VestingError::AlreadyLocked);
        }
        Ok(Lock {
            beneficiary,
            total_amount,
            released_amount: 0,
            start,
            plan_index,
        })
    }

    pub fn releasable_amount(&self, plans: &PlanRegistry, now: i64) -> u64 {
        if !self.is_open() {
            return 0;
        }
        plans
            .plans
            .get(self.plan_index as usize)
            .map_or(0, |plan| schedule::releasable_amount(self, plan, now))
    }

    pub fn prepare_release(
        &self,
        plans: &PlanRegistry,
        now: i64,
    ) -> core::result::Result<PendingRelease, VestingError> {
        let amount = self.releasable_amount(plans, now);
        if amount == 0 {
            return Err(VestingError::NothingToRelease);
        }
        Ok(PendingRelease {
            beneficiary: self.beneficiary,
            released_before: self.released_amount,
            amount,
        })
    }

    /// Apply a staged release. Returns the new released total.
    pub fn commit_release(
        &mut self,
        pending: PendingRelease,
    ) -> core::result::Result<u64, VestingError> {
        // Stale if staged for another lock or if anything was released since.
        if pending.beneficiary != self.beneficiary
            || pending.released_before != self.released_amount
        {
            return Err(VestingError::NothingToRelease);
        }
        let released = self
            .released_amount
            .checked_add(pending.amount)
            .ok_or(VestingError::MathOverflow)?;
        if released > self.total_amount {
            return Err(VestingError::MathOverflow);
        }
        self.released_amount = released;
        Ok(released)
    }
}

/// Zero when the beneficiary has no lock.
pub fn releasable_for(lock: Option<&Lock>, plans: &PlanRegistry, now: i64) -> u64 {
    lock.map_or(0, |l| l.releasable_amount(plans, now))
}

/// The beneficiary's lock as a list: one element if it exists, else empty.
pub fn details_of(lock: Option<&Lock>) -> Vec<Lock> {
    lock.filter(|l| l.is_open()).copied().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::custody::{ensure_can_pull, PullSource};

    const T: i64 = 1_700_000_000;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn registry() -> PlanRegistry {
        let mut reg = PlanRegistry::default();
        reg.add_plan(1000, 10, 2).unwrap();
        reg
    }

    fn locked(reg: &PlanRegistry, who: Pubkey, total: u64, start: i64) -> Lock {
        Lock::prepare(&Lock::default(), reg, who, total, start, 0, T).unwrap()
    }

    fn release(lock: &mut Lock, reg: &PlanRegistry, now: i64) -> u64 {
        let pending = lock.prepare_release(reg, now).unwrap();
        let amount = pending.amount();
        lock.commit_release(pending).unwrap();
        amount
    }

    #[test]
    fn lock_validation_order() {
        let mut reg = registry();
        let slot = Lock::default();

        let r = Lock::prepare(&slot, &reg, Pubkey::default(), 1000, T, 0, T);
        assert!(matches!(r, Err(VestingError::InvalidBeneficiary)));

        let r = Lock::prepare(&slot, &reg, key(1), 0, T, 0, T);
        assert!(matches!(r, Err(VestingError::InvalidAmount)));

        let r = Lock::prepare(&slot, &reg, key(1), 1000, T, 1, T);
        assert!(matches!(r, Err(VestingError::InvalidPlan)));

        reg.set_revoked(0, true).unwrap();
        let r = Lock::prepare(&slot, &reg, key(1), 1000, T - 1, 0, T);
        assert!(matches!(r, Err(VestingError::PlanRevoked)));
        reg.set_revoked(0, false).unwrap();

        let r = Lock::prepare(&slot, &reg, key(1), 1000, T - 1, 0, T);
        assert!(matches!(r, Err(VestingError::ScheduleInPast)));
    }

    #[test]
    fn start_equal_to_now_is_accepted() {
        let reg = registry();
        let lock = locked(&reg, key(1), 1000, T);
        assert_eq!(lock.start, T);
        assert_eq!(lock.released_amount, 0);
        assert!(lock.is_open());
        assert!(!lock.is_fully_released());
    }

    #[test]
    fn second_lock_for_same_beneficiary_rejected() {
        let reg = registry();
        let slot = locked(&reg, key(1), 1000, T);

        let r = Lock::prepare(&slot, &reg, key(1), 5, T + 10, 0, T);
        assert!(matches!(r, Err(VestingError::AlreadyLocked)));
        assert_eq!(details_of(Some(&slot)), vec![slot]);
    }

    #[test]
    fn no_program_wide_lock_cap() {
        let reg = registry();
        // Dust locks for throwaway keys never block anyone else.
        let mut slots = Vec::new();
        for n in 0..1_000u32 {
            let mut bytes = [0u8; 32];
            bytes[0] = 2;
            bytes[1..5].copy_from_slice(&n.to_le_bytes());
            let who = Pubkey::new_from_array(bytes);
            slots.push(Lock::prepare(&Lock::default(), &reg, who, 1, T, 0, T).unwrap());
        }
        assert_eq!(slots.len(), 1_000);

        let lock = Lock::prepare(&Lock::default(), &reg, key(1), 1_000_000, T, 0, T).unwrap();
        assert_eq!(lock.total_amount, 1_000_000);
    }

    #[test]
    fn fully_released_lock_still_blocks_relock() {
        let reg = registry();
        let mut lock = locked(&reg, key(1), 1000, T);
        assert_eq!(release(&mut lock, &reg, T + 20_000), 1000);
        assert!(lock.is_fully_released());

        let r = Lock::prepare(&lock, &reg, key(1), 1000, T + 20_000, 0, T + 20_000);
        assert!(matches!(r, Err(VestingError::AlreadyLocked)));
        assert_eq!(details_of(Some(&lock)).len(), 1);
    }

    #[test]
    fn missing_lock_reads_as_empty() {
        let reg = registry();
        assert_eq!(releasable_for(None, &reg, T + 50_000), 0);
        assert!(details_of(None).is_empty());

        // A created but never-filled slot behaves the same.
        let empty = Lock::default();
        assert_eq!(releasable_for(Some(&empty), &reg, T + 50_000), 0);
        assert!(details_of(Some(&empty)).is_empty());
        let r = empty.prepare_release(&reg, T + 50_000);
        assert!(matches!(r, Err(VestingError::NothingToRelease)));
    }

    #[test]
    fn failed_pull_leaves_slot_vacant() {
        let reg = registry();
        let payer = key(1);
        let slot = Lock::default();

        let new_lock = Lock::prepare(&slot, &reg, key(3), 1000, T, 0, T).unwrap();
        let short = PullSource {
            owner: payer,
            delegate: None,
            amount: 999,
            delegated_amount: 0,
            frozen: false,
        };
        let r = ensure_can_pull(&short, &payer, new_lock.total_amount);
        assert!(matches!(r, Err(VestingError::TransferFailed)));

        // The staged lock is never written, so the slot is still free.
        assert!(!slot.is_open());
        assert!(details_of(Some(&slot)).is_empty());
        assert!(Lock::prepare(&slot, &reg, key(3), 1000, T, 0, T).is_ok());
    }

    #[test]
    fn cliff_and_period_scenario() {
        let reg = registry();
        let mut lock = locked(&reg, key(1), 1000, T);

        assert_eq!(lock.releasable_amount(&reg, T + 1999), 0);
        let r = lock.prepare_release(&reg, T + 1999);
        assert!(matches!(r, Err(VestingError::NothingToRelease)));

        assert_eq!(lock.releasable_amount(&reg, T + 2000), 200);
        assert_eq!(release(&mut lock, &reg, T + 2000), 200);

        // Nothing more without elapsed time.
        let r = lock.prepare_release(&reg, T + 2000);
        assert!(matches!(r, Err(VestingError::NothingToRelease)));

        assert_eq!(lock.releasable_amount(&reg, T + 3000), 100);
        assert_eq!(release(&mut lock, &reg, T + 3000), 100);

        assert_eq!(lock.releasable_amount(&reg, T + 12_000), 700);
        assert_eq!(release(&mut lock, &reg, T + 12_000), 700);

        assert_eq!(lock.released_amount, 1000);
        assert_eq!(lock.releasable_amount(&reg, i64::MAX), 0);
    }

    #[test]
    fn lock_starting_in_future_vests_from_start() {
        let reg = registry();
        let start = T + 2000;
        let mut lock = locked(&reg, key(3), 1000, start);

        assert_eq!(lock.releasable_amount(&reg, T), 0);
        assert_eq!(lock.releasable_amount(&reg, T + 2000), 0);
        assert_eq!(lock.releasable_amount(&reg, T + 3500), 0);
        assert_eq!(lock.releasable_amount(&reg, T + 4000), 200);
        assert_eq!(release(&mut lock, &reg, start + 11_005), 1000);
    }

    #[test]
    fn revoking_plan_keeps_existing_trajectory() {
        let mut reg = registry();
        let lock = locked(&reg, key(4), 1000, T);

        let before: Vec<u64> = (0..13).map(|k| lock.releasable_amount(&reg, T + k * 1000)).collect();
        reg.set_revoked(0, true).unwrap();
        let after: Vec<u64> = (0..13).map(|k| lock.releasable_amount(&reg, T + k * 1000)).collect();
        assert_eq!(before, after);

        let r = Lock::prepare(&Lock::default(), &reg, key(5), 1000, T, 0, T);
        assert!(matches!(r, Err(VestingError::PlanRevoked)));
    }

    #[test]
    fn dropped_release_leaves_lock_untouched() {
        let reg = registry();
        let lock = locked(&reg, key(6), 1000, T);
        let snapshot = lock;

        let pending = lock.prepare_release(&reg, T + 5000).unwrap();
        assert_eq!(pending.amount(), 500);
        // Transfer failed: the staged release is discarded.
        drop(pending);

        assert_eq!(lock, snapshot);
        assert_eq!(lock.releasable_amount(&reg, T + 5000), 500);
    }

    #[test]
    fn stale_pending_release_rejected() {
        let reg = registry();
        let mut lock = locked(&reg, key(7), 1000, T);
        let mut other = locked(&reg, key(8), 1000, T);

        let first = lock.prepare_release(&reg, T + 3000).unwrap();
        let second = lock.prepare_release(&reg, T + 3000).unwrap();
        let foreign = lock.prepare_release(&reg, T + 3000).unwrap();
        assert_eq!(lock.commit_release(first).unwrap(), 300);
        assert!(matches!(lock.commit_release(second), Err(VestingError::NothingToRelease)));
        assert!(matches!(other.commit_release(foreign), Err(VestingError::NothingToRelease)));
        assert_eq!(lock.released_amount, 300);
        assert_eq!(other.released_amount, 0);
    }

    #[test]
    fn released_never_exceeds_total() {
        let mut reg = PlanRegistry::default();
        reg.add_plan(3, 7, 1).unwrap();
        let mut lock = locked(&reg, key(8), 1001, T);

        for dt in 0..40 {
            let now = T + dt;
            let r = lock.releasable_amount(&reg, now);
            assert!(r <= lock.total_amount - lock.released_amount);
            if r > 0 {
                release(&mut lock, &reg, now);
            }
            assert!(lock.released_amount <= lock.total_amount);
        }
        assert!(lock.is_fully_released());
    }
}
