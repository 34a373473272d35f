use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{LOCK_SEED, PLAN_REGISTRY_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{Lock, PlanRegistry, VestingState};
use crate::utils::custody;

/// Pay out everything currently releasable to `beneficiary`.
///
/// Permissionless: the destination must belong to the beneficiary, so the
/// caller only pays the transaction fee. Beneficiaries without a lock pass
/// no lock account and get `NothingToRelease`.
pub fn release(ctx: Context<Release>, beneficiary: Pubkey) -> Result<()> {
    // Capture AccountInfos/bump before taking mutable borrows.
    let vesting_state_ai = ctx.accounts.vesting_state.to_account_info();
    let vesting_state_bump = ctx.bumps.vesting_state;

    let now = Clock::get()?.unix_timestamp;
    let lock = ctx
        .accounts
        .lock
        .as_mut()
        .ok_or(VestingError::NothingToRelease)?;
    let pending = lock.prepare_release(&ctx.accounts.plan_registry, now)?;
    let amount = pending.amount();

    let mint = ctx.accounts.vesting_state.mint;
    require_keys_eq!(ctx.accounts.destination.mint, mint, VestingError::InvalidTokenMint);
    require_keys_eq!(
        ctx.accounts.destination.owner,
        beneficiary,
        VestingError::InvalidTokenAccount
    );
    custody::ensure_unfrozen(ctx.accounts.vault.is_frozen())?;
    custody::ensure_unfrozen(ctx.accounts.destination.is_frozen())?;
    custody::ensure_vault_covers(ctx.accounts.vault.amount, amount)?;

    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_STATE_SEED, &[vesting_state_bump]]];
    custody::push(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.destination.to_account_info(),
        vesting_state_ai,
        signer_seeds,
        amount,
    )?;

    let released_total = lock.commit_release(pending)?;
    ctx.accounts.vesting_state.record_released(amount)?;

    msg!("released {} to {} (total {})", amount, beneficiary, released_total);
    if lock.is_fully_released() {
        msg!("lock for {} fully released", beneficiary);
    }
    emit!(TokensReleased { beneficiary, amount });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct Release<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    #[account(
        mut,
        seeds = [LOCK_SEED, vesting_state.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub lock: Option<Account<'info, Lock>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Beneficiary's token account for the vested mint.
    #[account(mut)]
    pub destination: Account<'info, TokenAccount>,

    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensReleased {
    pub beneficiary: Pubkey,
    pub amount: u64,
}
