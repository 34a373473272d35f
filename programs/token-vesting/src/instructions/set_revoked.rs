use anchor_lang::prelude::*;

use crate::constants::{PLAN_REGISTRY_SEED, VESTING_STATE_SEED};
use crate::state::{PlanRegistry, VestingState};

pub fn set_revoked(ctx: Context<SetRevoked>, plan_index: u32, revoked: bool) -> Result<()> {
    ctx.accounts
        .vesting_state
        .ensure_admin(&ctx.accounts.admin.key())?;

    ctx.accounts
        .plan_registry
        .set_revoked(plan_index, revoked)?;

    msg!("plan {} revoked={}", plan_index, revoked);
    emit!(PaymentPlanRevokedSet {
        plan_index,
        revoked,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetRevoked<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct PaymentPlanRevokedSet {
    pub plan_index: u32,
    pub revoked: bool,
}
