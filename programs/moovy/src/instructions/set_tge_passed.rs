use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::state::DistributorState;

pub fn set_tge_passed(ctx: Context<SetTgePassed>) -> Result<()> {
    let st = &mut ctx.accounts.distributor_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;

    let now = Clock::get()?.unix_timestamp;
    st.pass_tge(now)?;

    emit!(TgePassed {
        admin: st.admin,
        tge_ts: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetTgePassed<'info> {
    #[account(mut, seeds = [DISTRIBUTOR_SEED], bump = distributor_state.bump)]
    pub distributor_state: Account<'info, DistributorState>,
    pub admin: Signer<'info>,
}

#[event]
pub struct TgePassed {
    pub admin: Pubkey,
    pub tge_ts: i64,
}
