use anchor_lang::prelude::*;

use crate::constants::VESTING_STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;

    require!(new_admin != Pubkey::default(), VestingError::InvalidAdmin);
    require!(new_admin != st.admin, VestingError::InvalidAdmin);

    let old = st.admin;
    st.admin = new_admin;

    msg!("admin changed: {} -> {}", old, new_admin);
    emit!(AdminChanged {
        old_admin: old,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetAdmin<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminChanged {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
