use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::{Lock, PaymentPlan};

declare_id!("4SZRLNAiiCD3kDPxbUCjjMknPxLW4EqUtc5mhzhxUzZc");

#[program]
pub mod token_vesting {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::initialize(ctx)
    }

    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::set_admin::set_admin(ctx, new_admin)
    }

    pub fn add_plan(
        ctx: Context<AddPlan>,
        period_length: u64,
        period_count: u32,
        cliff_periods: u32,
    ) -> Result<u32> {
        instructions::add_plan::add_plan(ctx, period_length, period_count, cliff_periods)
    }

    pub fn set_revoked(ctx: Context<SetRevoked>, plan_index: u32, revoked: bool) -> Result<()> {
        instructions::set_revoked::set_revoked(ctx, plan_index, revoked)
    }

    pub fn lock(
        ctx: Context<LockTokens>,
        beneficiary: Pubkey,
        total_amount: u64,
        start: i64,
        plan_index: u32,
    ) -> Result<()> {
        instructions::lock::lock(ctx, beneficiary, total_amount, start, plan_index)
    }

    pub fn release(ctx: Context<Release>, beneficiary: Pubkey) -> Result<()> {
        instructions::release::release(ctx, beneficiary)
    }

    pub fn plan_count(ctx: Context<ReadPlans>) -> Result<u32> {
        instructions::queries::plan_count(ctx)
    }

    pub fn plan(ctx: Context<ReadPlans>, plan_index: u32) -> Result<PaymentPlan> {
        instructions::queries::plan(ctx, plan_index)
    }

    pub fn plan_revoked(ctx: Context<ReadPlans>, plan_index: u32) -> Result<bool> {
        instructions::queries::plan_revoked(ctx, plan_index)
    }

    pub fn releasable_amount(ctx: Context<ReadLocks>, beneficiary: Pubkey) -> Result<u64> {
        instructions::queries::releasable_amount(ctx, beneficiary)
    }

    pub fn details_of(ctx: Context<ReadLocks>, beneficiary: Pubkey) -> Result<Vec<Lock>> {
        instructions::queries::details_of(ctx, beneficiary)
    }
}
