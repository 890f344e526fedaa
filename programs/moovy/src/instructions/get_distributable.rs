use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::state::{AllocationGroup, DistributorState};
use crate::utils::time;

/// Read-only: amount `distribute(group)` would release right now.
pub fn get_distributable(ctx: Context<GetDistributable>, group: AllocationGroup) -> Result<u64> {
    let st = &ctx.accounts.distributor_state;
    let now = Clock::get()?.unix_timestamp;
    let distributable = st.distributable(group, now)?;

    emit!(DistributionQuote {
        group,
        months_elapsed: time::months_elapsed(now, st.tge_ts),
        distributable,
        claimed: st.group(group).claimed,
        fully_vested_at: group.schedule().fully_vested_at(st.tge_ts)?,
    });

    Ok(distributable)
}

#[derive(Accounts)]
pub struct GetDistributable<'info> {
    #[account(seeds = [DISTRIBUTOR_SEED], bump = distributor_state.bump)]
    pub distributor_state: Account<'info, DistributorState>,
}

#[event]
pub struct DistributionQuote {
    pub group: AllocationGroup,
    pub months_elapsed: u64,
    pub distributable: u64,
    pub claimed: u64,
    pub fully_vested_at: i64,
}
