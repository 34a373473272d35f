use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{MAX_PLANS, PLAN_REGISTRY_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::state::{PlanRegistry, VestingState};

pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    st.admin = ctx.accounts.admin.key();
    st.mint = ctx.accounts.mint.key();
    st.total_locked = 0;
    st.total_released = 0;

    ctx.accounts.plan_registry.plans = Vec::with_capacity(MAX_PLANS);

    msg!("vesting initialized: admin={} mint={}", st.admin, st.mint);
    emit!(VestingInitialized {
        admin: st.admin,
        mint: st.mint,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingState::SIZE,
        seeds = [VESTING_STATE_SEED],
        bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        init,
        payer = admin,
        space = PlanRegistry::space(MAX_PLANS),
        seeds = [PLAN_REGISTRY_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub plan_registry: Box<Account<'info, PlanRegistry>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = vesting_state,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
}
