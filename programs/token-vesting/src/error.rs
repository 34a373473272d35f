use anchor_lang::prelude::*;

/// Custom error codes for the token vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    Unauthorized,

    #[msg("Invalid schedule: period length and count must be > 0 and cliff <= period count")]
    InvalidSchedule,

    #[msg("Payment plan does not exist")]
    NoSuchPlan,

    #[msg("Payment plan already has the requested revoked state")]
    PlanStateUnchanged,

    #[msg("Invalid beneficiary")]
    InvalidBeneficiary,

    #[msg("Invalid payment plan")]
    InvalidPlan,

    #[msg("Payment plan has been revoked")]
    PlanRevoked,

    #[msg("Lock start is in the past")]
    ScheduleInPast,

    #[msg("Beneficiary already has a lock")]
    AlreadyLocked,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("No tokens available to release")]
    NothingToRelease,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid admin")]
    InvalidAdmin,

    #[msg("Plan registry is full")]
    PlanRegistryFull,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
