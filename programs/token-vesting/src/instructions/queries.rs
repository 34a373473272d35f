//! Read-only view instructions. Results travel back through Anchor return
//! data; none of these write to any account.

use anchor_lang::prelude::*;

use crate::constants::{LOCK_SEED, PLAN_REGISTRY_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{self, Lock, PaymentPlan, PlanRegistry, VestingState};

pub fn plan_count(ctx: Context<ReadPlans>) -> Result<u32> {
    Ok(ctx.accounts.plan_registry.count())
}

pub fn plan(ctx: Context<ReadPlans>, plan_index: u32) -> Result<PaymentPlan> {
    Ok(*ctx.accounts.plan_registry.get(plan_index)?)
}

pub fn plan_revoked(ctx: Context<ReadPlans>, plan_index: u32) -> Result<bool> {
    Ok(ctx.accounts.plan_registry.get(plan_index)?.revoked)
}

/// Zero for beneficiaries without a lock.
pub fn releasable_amount(ctx: Context<ReadLocks>, beneficiary: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let lock = load_lock(&ctx.accounts.lock, &beneficiary)?;
    Ok(state::releasable_for(
        lock.as_ref(),
        &ctx.accounts.plan_registry,
        now,
    ))
}

pub fn details_of(ctx: Context<ReadLocks>, beneficiary: Pubkey) -> Result<Vec<Lock>> {
    let lock = load_lock(&ctx.accounts.lock, &beneficiary)?;
    Ok(state::details_of(lock.as_ref()))
}

/// The lock PDA may not exist yet; an unallocated address reads as no lock.
fn load_lock(info: &AccountInfo, beneficiary: &Pubkey) -> Result<Option<Lock>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let lock = Lock::try_deserialize(&mut &data[..])?;
    require_keys_eq!(lock.beneficiary, *beneficiary, VestingError::InvalidBeneficiary);
    Ok(Some(lock))
}

#[derive(Accounts)]
pub struct ReadPlans<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct ReadLocks<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    /// CHECK: address pinned by seeds; may be unallocated when the
    /// beneficiary never had a lock. Read through `load_lock`.
    #[account(
        seeds = [LOCK_SEED, vesting_state.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub lock: UncheckedAccount<'info>,
}
