use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{AllocationGroup, DistributorState};

/// Permissionless: releases whatever `group` has unlocked to its fixed recipient.
pub fn distribute(ctx: Context<Distribute>, group: AllocationGroup) -> Result<()> {
    // Capture AccountInfos before taking the mutable borrow of the state.
    let distributor_ai = ctx.accounts.distributor_state.to_account_info();
    let st = &mut ctx.accounts.distributor_state;

    let recipient = st.group(group).recipient;
    require_keys_eq!(
        ctx.accounts.recipient_token_account.owner,
        recipient,
        MoovyError::InvalidTokenAccount
    );
    require_keys_eq!(
        ctx.accounts.recipient_token_account.mint,
        st.mint,
        MoovyError::InvalidTokenMint
    );

    let now = Clock::get()?.unix_timestamp;
    // State is updated before the transfer is issued.
    let amount = st.record_distribution(group, now)?;
    if amount == 0 {
        msg!("Nothing to distribute for {:?}", group);
        return Ok(());
    }
    require!(
        ctx.accounts.vault.amount >= amount,
        MoovyError::InsufficientVaultBalance
    );
    let claimed_total = st.group(group).claimed;

    let signer_seeds: &[&[&[u8]]] = &[&[DISTRIBUTOR_SEED, &[st.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.recipient_token_account.to_account_info(),
                authority: distributor_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(GroupDistributed {
        group,
        recipient,
        amount,
        claimed_total,
        total_allocation: group.total_allocation(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Distribute<'info> {
    #[account(mut, seeds = [DISTRIBUTOR_SEED], bump = distributor_state.bump)]
    pub distributor_state: Account<'info, DistributorState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, distributor_state.key().as_ref()],
        bump,
        constraint = vault.mint == distributor_state.mint @ MoovyError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct GroupDistributed {
    pub group: AllocationGroup,
    pub recipient: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
    pub total_allocation: u64,
}
