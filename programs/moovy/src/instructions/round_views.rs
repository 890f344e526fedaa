use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{Participant, RoundLedger, RoundType, SaleState};

pub fn get_account_locked_balance(
    ctx: Context<ReadParticipant>,
    _round: RoundType,
    _account: Pubkey,
) -> Result<u64> {
    let participant = Participant::load(&ctx.accounts.participant.to_account_info())?;
    Ok(participant.map_or(0, |p| p.locked_balance))
}

/// Page of participant accounts in enrollment order. The caller passes the round's
/// participant PDAs (e.g. from `getProgramAccounts`) as remaining accounts; `limit`
/// is capped so the result fits in return data.
pub fn get_round_participants<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReadRound<'info>>,
    round: RoundType,
    offset: u32,
    limit: u8,
) -> Result<Vec<Pubkey>> {
    let mut participants = Vec::with_capacity(ctx.remaining_accounts.len());
    for info in ctx.remaining_accounts.iter() {
        if let Some(p) = Participant::load(info)? {
            participants.push(p);
        }
    }

    let ledger = &ctx.accounts.round_ledger;
    let limit = (limit as usize).min(MAX_PARTICIPANTS_PAGE);
    let page = ledger.page(&participants, offset, limit)?;

    emit!(ParticipantsPage {
        round,
        participant_count: ledger.participant_count,
        offset,
        returned: page.len() as u8,
    });

    Ok(page)
}

pub fn get_claimable(
    ctx: Context<ReadParticipant>,
    round: RoundType,
    account: Pubkey,
) -> Result<u64> {
    let st = &ctx.accounts.sale_state;
    st.ensure_started()?;
    let now = Clock::get()?.unix_timestamp;

    let participant = Participant::load(&ctx.accounts.participant.to_account_info())?;
    let claimable = match &participant {
        Some(p) => p.claimable(st.igo_start_ts, now)?,
        None => 0,
    };

    emit!(ClaimQuote {
        round,
        account,
        locked_balance: participant.as_ref().map_or(0, |p| p.locked_balance),
        claimed: participant.as_ref().map_or(0, |p| p.claimed),
        claimable,
        fully_vested_at: round.schedule().fully_vested_at(st.igo_start_ts)?,
    });

    Ok(claimable)
}

#[derive(Accounts)]
#[instruction(round: RoundType, account: Pubkey)]
pub struct ReadParticipant<'info> {
    #[account(seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    /// CHECK: participant PDA of `account`; may not exist, read via `Participant::load`.
    #[account(
        seeds = [
            PARTICIPANT_SEED,
            sale_state.key().as_ref(),
            &[round as u8],
            account.as_ref()
        ],
        bump
    )]
    pub participant: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(round: RoundType)]
pub struct ReadRound<'info> {
    #[account(seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[round as u8]],
        bump = round_ledger.bump
    )]
    pub round_ledger: Account<'info, RoundLedger>,
}

#[event]
pub struct ParticipantsPage {
    pub round: RoundType,
    pub participant_count: u32,
    pub offset: u32,
    pub returned: u8,
}

#[event]
pub struct ClaimQuote {
    pub round: RoundType,
    pub account: Pubkey,
    pub locked_balance: u64,
    pub claimed: u64,
    pub claimable: u64,
    pub fully_vested_at: i64,
}
