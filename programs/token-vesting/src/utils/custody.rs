//! Escrow transfers through the SPL Token program.
//! - pull: caller's token account -> vault, signed by the caller (owner or delegate)
//! - push: vault -> beneficiary's token account, signed by the vesting state PDA
//!
//! A token program failure aborts the whole transaction before control comes
//! back, so the pre-checks below are the only place `TransferFailed` can be
//! raised. They reject whatever the token program would refuse for a pair of
//! accounts already checked for mint and owner.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::VestingError;

/// The parts of a source token account that decide whether a pull can succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PullSource {
    pub owner: Pubkey,
    pub delegate: Option<Pubkey>,
    pub amount: u64,
    pub delegated_amount: u64,
    pub frozen: bool,
}

impl From<&TokenAccount> for PullSource {
    fn from(acc: &TokenAccount) -> Self {
        Self {
            owner: acc.owner,
            delegate: Option::from(acc.delegate),
            amount: acc.amount,
            delegated_amount: acc.delegated_amount,
            frozen: acc.is_frozen(),
        }
    }
}

/// Owners spend up to their balance; delegates up to both the balance and
/// their approved allowance.
pub fn ensure_can_pull(
    source: &PullSource,
    authority: &Pubkey,
    amount: u64,
) -> core::result::Result<(), VestingError> {
    ensure_unfrozen(source.frozen)?;
    if source.amount < amount {
        return Err(VestingError::TransferFailed);
    }
    if source.owner == *authority {
        return Ok(());
    }
    match source.delegate {
        Some(d) if d == *authority && source.delegated_amount >= amount => Ok(()),
        _ => Err(VestingError::TransferFailed),
    }
}

pub fn ensure_unfrozen(frozen: bool) -> core::result::Result<(), VestingError> {
    if frozen {
        return Err(VestingError::TransferFailed);
    }
    Ok(())
}

pub fn ensure_vault_covers(vault_amount: u64, amount: u64) -> core::result::Result<(), VestingError> {
    if vault_amount < amount {
        return Err(VestingError::TransferFailed);
    }
    Ok(())
}

pub fn pull<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program,
            Transfer {
                from,
                to: vault,
                authority,
            },
        ),
        amount,
    )
}

pub fn push<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: vault,
                to,
                authority: vault_authority,
            },
            signer_seeds,
        ),
        amount,
    )
}
