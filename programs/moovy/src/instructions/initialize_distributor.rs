use anchor_lang::prelude::*;
use anchor_spl::token::{
    self, spl_token::instruction::AuthorityType, Mint, MintTo, SetAuthority, Token, TokenAccount,
};

use crate::constants::*;
use crate::state::{DistributorState, GroupRecipients};

pub fn initialize_distributor(
    ctx: Context<InitializeDistributor>,
    recipients: GroupRecipients,
) -> Result<()> {
    let bump = ctx.bumps.distributor_state;
    let admin = ctx.accounts.admin.key();
    let mint = ctx.accounts.mint.key();
    ctx.accounts
        .distributor_state
        .init(admin, mint, &recipients, bump)?;

    // Mint the whole supply once, then drop the mint authority so it stays fixed.
    let supply = to_base_units(TOTAL_SUPPLY);
    let signer_seeds: &[&[&[u8]]] = &[&[DISTRIBUTOR_SEED, &[bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.distributor_state.to_account_info(),
            },
            signer_seeds,
        ),
        supply,
    )?;
    token::set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                current_authority: ctx.accounts.distributor_state.to_account_info(),
                account_or_mint: ctx.accounts.mint.to_account_info(),
            },
            signer_seeds,
        ),
        AuthorityType::MintTokens,
        None,
    )?;

    emit!(DistributorInitialized {
        admin,
        mint,
        vault: ctx.accounts.vault.key(),
        total_supply: supply,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeDistributor<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + DistributorState::INIT_SPACE,
        seeds = [DISTRIBUTOR_SEED],
        bump
    )]
    pub distributor_state: Account<'info, DistributorState>,

    #[account(
        init,
        payer = admin,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = distributor_state,
        seeds = [MINT_SEED, distributor_state.key().as_ref()],
        bump
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = distributor_state,
        seeds = [VAULT_SEED, distributor_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct DistributorInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub total_supply: u64,
}
