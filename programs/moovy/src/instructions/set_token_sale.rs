use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{DistributorState, SaleState};

/// Hands the sale allocation to the sale vault. One-shot.
pub fn set_token_sale(ctx: Context<SetTokenSale>) -> Result<()> {
    let amount = to_base_units(SALE_ALLOCATION);
    let sale_state_key = ctx.accounts.sale_state.key();

    let st = &mut ctx.accounts.distributor_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;
    st.set_token_sale(sale_state_key)?;
    let bump = st.bump;

    require!(
        ctx.accounts.vault.amount >= amount,
        MoovyError::InsufficientVaultBalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[DISTRIBUTOR_SEED, &[bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.sale_vault.to_account_info(),
                authority: ctx.accounts.distributor_state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(TokenSaleSet {
        admin: ctx.accounts.admin.key(),
        sale_state: sale_state_key,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetTokenSale<'info> {
    #[account(mut, seeds = [DISTRIBUTOR_SEED], bump = distributor_state.bump)]
    pub distributor_state: Account<'info, DistributorState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, distributor_state.key().as_ref()],
        bump,
        constraint = vault.mint == distributor_state.mint @ MoovyError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        seeds = [SALE_STATE_SEED],
        bump = sale_state.bump,
        constraint = sale_state.mint == distributor_state.mint @ MoovyError::InvalidTokenMint,
    )]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [SALE_VAULT_SEED, sale_state.key().as_ref()],
        bump,
    )]
    pub sale_vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokenSaleSet {
    pub admin: Pubkey,
    pub sale_state: Pubkey,
    pub amount: u64,
}
