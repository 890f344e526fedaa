use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{Participant, RoundType, SaleState};

/// Releases the caller's unlocked share of `round`. Non-participants and calls with
/// nothing unlocked succeed without a transfer.
pub fn claim(ctx: Context<Claim>, round: RoundType) -> Result<()> {
    let st = &ctx.accounts.sale_state;
    st.ensure_started()?;

    let claimant = ctx.accounts.claimant.key();
    let now = Clock::get()?.unix_timestamp;

    let participant_info = ctx.accounts.participant.to_account_info();
    let Some(mut participant) = Participant::load(&participant_info)? else {
        msg!("Not a participant of the {:?} round", round);
        return Ok(());
    };

    // The participant PDA is updated before the transfer is issued.
    let amount = participant.record_claim(st.igo_start_ts, now)?;
    if amount == 0 {
        msg!("Nothing to claim in {:?} round", round);
        return Ok(());
    }
    participant.store(&participant_info)?;

    require!(
        ctx.accounts.sale_vault.amount >= amount,
        MoovyError::InsufficientVaultBalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[SALE_STATE_SEED, &[st.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sale_vault.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: ctx.accounts.sale_state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(TokensClaimed {
        round,
        account: claimant,
        amount,
        claimed_total: participant.claimed,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(round: RoundType)]
pub struct Claim<'info> {
    #[account(seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    /// CHECK: participant PDA of the claimant; may not exist yet, read via `Participant::load`.
    #[account(
        mut,
        seeds = [
            PARTICIPANT_SEED,
            sale_state.key().as_ref(),
            &[round as u8],
            claimant.key().as_ref()
        ],
        bump
    )]
    pub participant: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SALE_VAULT_SEED, sale_state.key().as_ref()],
        bump,
        constraint = sale_vault.mint == sale_state.mint @ MoovyError::InvalidTokenMint,
    )]
    pub sale_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = claimant_token_account.mint == sale_state.mint @ MoovyError::InvalidTokenMint,
        constraint = claimant_token_account.owner == claimant.key() @ MoovyError::InvalidTokenAccount,
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub round: RoundType,
    pub account: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
}
