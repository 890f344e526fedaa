use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{Participant, RoundLedger, RoundType, SaleState};

/// Buys `amount` base units of the IGO allocation at the fixed price. The tokens stay
/// locked in the buyer's IGO participant PDA and vest from IGO start.
pub fn buy(ctx: Context<Buy>, amount: u64) -> Result<()> {
    let buyer = ctx.accounts.buyer.key();

    // Book the purchase before the payment transfer.
    let cost = ctx.accounts.sale_state.record_purchase(amount)?;
    let bump = ctx.bumps.participant;
    let locked_balance = ctx.accounts.igo_round.credit(
        &mut ctx.accounts.participant,
        buyer,
        amount,
        bump,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.buyer_payment_account.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        cost,
    )?;

    emit!(TokensPurchased {
        buyer,
        amount,
        cost,
        locked_balance,
        total_sold: ctx.accounts.sale_state.total_sold,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut, seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[RoundType::Igo as u8]],
        bump = igo_round.bump
    )]
    pub igo_round: Account<'info, RoundLedger>,

    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + Participant::INIT_SPACE,
        seeds = [
            PARTICIPANT_SEED,
            sale_state.key().as_ref(),
            &[RoundType::Igo as u8],
            buyer.key().as_ref()
        ],
        bump
    )]
    pub participant: Account<'info, Participant>,

    #[account(
        mut,
        constraint = buyer_payment_account.mint == sale_state.payment_mint @ MoovyError::InvalidTokenMint,
        constraint = buyer_payment_account.owner == buyer.key() @ MoovyError::InvalidTokenAccount,
    )]
    pub buyer_payment_account: Account<'info, TokenAccount>,

    #[account(mut, address = sale_state.treasury @ MoovyError::InvalidTokenAccount)]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensPurchased {
    pub buyer: Pubkey,
    pub amount: u64,
    pub cost: u64,
    pub locked_balance: u64,
    pub total_sold: u64,
}
