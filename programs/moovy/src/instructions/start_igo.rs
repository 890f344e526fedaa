use anchor_lang::prelude::*;

use crate::constants::SALE_STATE_SEED;
use crate::state::SaleState;

pub fn start_igo(ctx: Context<StartIgo>) -> Result<()> {
    let st = &mut ctx.accounts.sale_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;

    let now = Clock::get()?.unix_timestamp;
    st.start_igo(now)?;

    emit!(IgoStarted {
        admin: st.admin,
        igo_start_ts: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct StartIgo<'info> {
    #[account(mut, seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,
    pub admin: Signer<'info>,
}

#[event]
pub struct IgoStarted {
    pub admin: Pubkey,
    pub igo_start_ts: i64,
}
