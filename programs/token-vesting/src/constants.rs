//! Program-wide constants.

/// Max payment plans stored in the plan registry PDA.
pub const MAX_PLANS: usize = 32;

pub const VESTING_STATE_SEED: &[u8] = b"vesting_state";
pub const PLAN_REGISTRY_SEED: &[u8] = b"plans";
/// Per-beneficiary lock PDA: `[LOCK_SEED, vesting_state, beneficiary]`.
pub const LOCK_SEED: &[u8] = b"lock";
pub const VAULT_SEED: &[u8] = b"vault";
