use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{LOCK_SEED, PLAN_REGISTRY_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{Lock, PlanRegistry, VestingState};
use crate::utils::custody::{self, PullSource};

/// Escrow `total_amount` from the payer and record a lock for `beneficiary`.
///
/// Anyone may fund a lock; the payer also covers rent for the beneficiary's
/// lock PDA. Validation happens before the transfer and the lock is written
/// only after the tokens reached the vault.
pub fn lock(
    ctx: Context<LockTokens>,
    beneficiary: Pubkey,
    total_amount: u64,
    start: i64,
    plan_index: u32,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let new_lock = Lock::prepare(
        &ctx.accounts.lock,
        &ctx.accounts.plan_registry,
        beneficiary,
        total_amount,
        start,
        plan_index,
        now,
    )?;

    let mint = ctx.accounts.vesting_state.mint;
    require_keys_eq!(ctx.accounts.source.mint, mint, VestingError::InvalidTokenMint);
    custody::ensure_unfrozen(ctx.accounts.vault.is_frozen())?;
    custody::ensure_can_pull(
        &PullSource::from(&*ctx.accounts.source),
        &ctx.accounts.payer.key(),
        total_amount,
    )?;

    custody::pull(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.source.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.payer.to_account_info(),
        total_amount,
    )?;

    *ctx.accounts.lock = new_lock;
    ctx.accounts.vesting_state.record_locked(total_amount)?;

    msg!(
        "locked {} for {} from {} on plan {}",
        total_amount,
        beneficiary,
        start,
        plan_index
    );
    emit!(TokensLocked {
        beneficiary,
        total_amount,
        start,
        plan_index,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct LockTokens<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    /// Created on first use; an already funded lock is rejected in the handler.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Lock::SIZE,
        seeds = [LOCK_SEED, vesting_state.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub lock: Account<'info, Lock>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Token account the escrowed amount is pulled from.
    #[account(mut)]
    pub source: Account<'info, TokenAccount>,

    /// Owner of `source`, or its approved delegate.
    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensLocked {
    pub beneficiary: Pubkey,
    pub total_amount: u64,
    pub start: i64,
    pub plan_index: u32,
}
