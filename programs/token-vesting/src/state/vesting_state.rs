use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Singleton configuration PDA for the vesting program.
#[account]
#[derive(Default)]
pub struct VestingState {
    /// Administrator: the only key allowed to manage payment plans.
    pub admin: Pubkey,
    /// Token mint escrowed by this program.
    pub mint: Pubkey,
    /// Sum of `total_amount` over every lock ever created.
    pub total_locked: u64,
    /// Sum of every release paid out of the vault.
    pub total_released: u64,
}

impl VestingState {
    pub const SIZE: usize =
        32 + // admin
        32 + // mint
        8 +  // total_locked
        8;   // total_released

    pub fn ensure_admin(&self, caller: &Pubkey) -> core::result::Result<(), VestingError> {
        if *caller != self.admin {
            return Err(VestingError::Unauthorized);
        }
        Ok(())
    }

    pub fn record_locked(&mut self, amount: u64) -> core::result::Result<(), VestingError> {
        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    pub fn record_released(&mut self, amount: u64) -> core::result::Result<(), VestingError> {
        let released = self
            .total_released
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if released > self.total_locked {
            return Err(VestingError::MathOverflow);
        }
        self.total_released = released;
        Ok(())
    }
}
