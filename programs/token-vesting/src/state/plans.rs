use anchor_lang::prelude::*;

use crate::error::VestingError;

/// A reusable vesting schedule template.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentPlan {
    /// Seconds per vesting period (> 0).
    pub period_length: u64,
    /// Number of periods over which the full amount vests (> 0).
    pub period_count: u32,
    /// Periods that must elapse from lock start before anything is releasable.
    pub cliff_periods: u32,
    /// Revoked plans accept no new locks; existing locks keep vesting.
    pub revoked: bool,
}

impl PaymentPlan {
    pub const SIZE: usize =
        8 + // period_length
        4 + // period_count
        4 + // cliff_periods
        1;  // revoked

    pub fn new(
        period_length: u64,
        period_count: u32,
        cliff_periods: u32,
    ) -> core::result::Result<Self, VestingError> {
        if period_length == 0 || period_count == 0 || cliff_periods > period_count {
            return Err(VestingError::InvalidSchedule);
        }
        Ok(Self {
            period_length,
            period_count,
            cliff_periods,
            revoked: false,
        })
    }
}

/// PDA holding every payment plan, addressed by its position.
///
/// Append-only: plans are never removed or reordered, so a `plan_index`
/// stored in a lock stays valid for the lifetime of the program.
#[account]
#[derive(Default)]
pub struct PlanRegistry {
    pub plans: Vec<PaymentPlan>,
}

impl PlanRegistry {
    /// Space for discriminator + vec header + `capacity` plans.
    pub const fn space(capacity: usize) -> usize {
        8 + 4 + capacity * PaymentPlan::SIZE
    }

    pub fn count(&self) -> u32 {
        self.plans.len() as u32
    }

    pub fn get(&self, plan_index: u32) -> core::result::Result<&PaymentPlan, VestingError> {
        self.plans
            .get(plan_index as usize)
            .ok_or(VestingError::NoSuchPlan)
    }

    pub fn add_plan(
        &mut self,
        period_length: u64,
        period_count: u32,
        cliff_periods: u32,
    ) -> core::result::Result<u32, VestingError> {
        let plan = PaymentPlan::new(period_length, period_count, cliff_periods)?;
        if self.plans.len() >= crate::constants::MAX_PLANS {
            return Err(VestingError::PlanRegistryFull);
        }
        let plan_index = self.count();
        self.plans.push(plan);
        Ok(plan_index)
    }

    /// Rejects writes that would leave the flag unchanged, in either direction.
    pub fn set_revoked(
        &mut self,
        plan_index: u32,
        revoked: bool,
    ) -> core::result::Result<(), VestingError> {
        let plan = self
            .plans
            .get_mut(plan_index as usize)
            .ok_or(VestingError::NoSuchPlan)?;
        if plan.revoked == revoked {
            return Err(VestingError::PlanStateUnchanged);
        }
        plan.revoked = revoked;
        Ok(())
    }

    /// Resolve a plan that a new lock may reference.
    pub fn lockable(&self, plan_index: u32) -> core::result::Result<&PaymentPlan, VestingError> {
        let plan = self
            .plans
            .get(plan_index as usize)
            .ok_or(VestingError::InvalidPlan)?;
        if plan.revoked {
            return Err(VestingError::PlanRevoked);
        }
        Ok(plan)
    }
}
