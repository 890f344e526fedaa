use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{RoundLedger, RoundType, SaleState};

pub fn initialize_sale(ctx: Context<InitializeSale>) -> Result<()> {
    let st = &mut ctx.accounts.sale_state;
    st.init(
        ctx.accounts.admin.key(),
        ctx.accounts.mint.key(),
        ctx.accounts.payment_mint.key(),
        ctx.accounts.treasury.key(),
        ctx.accounts.mint.decimals,
        ctx.accounts.payment_mint.decimals,
        ctx.bumps.sale_state,
    );

    let sale = st.key();
    ctx.accounts
        .seed_round
        .init(sale, RoundType::Seed, ctx.bumps.seed_round);
    ctx.accounts
        .private_round
        .init(sale, RoundType::Private, ctx.bumps.private_round);
    ctx.accounts
        .igo_round
        .init(sale, RoundType::Igo, ctx.bumps.igo_round);

    emit!(SaleInitialized {
        admin: st.admin,
        mint: st.mint,
        payment_mint: st.payment_mint,
        treasury: st.treasury,
        max_igo_supply: SaleState::max_supply(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeSale<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + SaleState::INIT_SPACE,
        seeds = [SALE_STATE_SEED],
        bump
    )]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = sale_state,
        seeds = [SALE_VAULT_SEED, sale_state.key().as_ref()],
        bump
    )]
    pub sale_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = admin,
        space = 8 + RoundLedger::INIT_SPACE,
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[RoundType::Seed as u8]],
        bump
    )]
    pub seed_round: Box<Account<'info, RoundLedger>>,

    #[account(
        init,
        payer = admin,
        space = 8 + RoundLedger::INIT_SPACE,
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[RoundType::Private as u8]],
        bump
    )]
    pub private_round: Box<Account<'info, RoundLedger>>,

    #[account(
        init,
        payer = admin,
        space = 8 + RoundLedger::INIT_SPACE,
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[RoundType::Igo as u8]],
        bump
    )]
    pub igo_round: Box<Account<'info, RoundLedger>>,

    #[account(constraint = mint.decimals == TOKEN_DECIMALS @ MoovyError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    pub payment_mint: Account<'info, Mint>,

    #[account(constraint = treasury.mint == payment_mint.key() @ MoovyError::InvalidTokenMint)]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct SaleInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub payment_mint: Pubkey,
    pub treasury: Pubkey,
    pub max_igo_supply: u64,
}
