use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::constants::*;
use crate::error::MoovyError;
use crate::state::{Participant, ParticipantInput, RoundLedger, RoundType, SaleState};

/// Admin snapshot of Seed/Private balances. Later entries overwrite earlier ones.
///
/// `remaining_accounts[i]` must be the participant PDA of `entries[i]`; missing PDAs
/// are created here, paid by the admin.
pub fn add_participants<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddParticipants<'info>>,
    round: RoundType,
    entries: Vec<ParticipantInput>,
) -> Result<()> {
    let st = &ctx.accounts.sale_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;
    st.ensure_can_add_participants(round)?;

    require!(!entries.is_empty(), MoovyError::EmptyBatch);
    require!(
        entries.len() <= MAX_PARTICIPANTS_BATCH,
        MoovyError::BatchTooLarge
    );
    require!(
        ctx.remaining_accounts.len() == entries.len(),
        MoovyError::InvalidParticipant
    );

    let sale_key = st.key();
    let ledger = &mut ctx.accounts.round_ledger;
    for (input, info) in entries.iter().zip(ctx.remaining_accounts.iter()) {
        input.validate()?;

        let round_seed = [round as u8];
        let (expected, bump) = Pubkey::find_program_address(
            &[
                PARTICIPANT_SEED,
                sale_key.as_ref(),
                &round_seed,
                input.account.as_ref(),
            ],
            ctx.program_id,
        );
        require_keys_eq!(info.key(), expected, MoovyError::InvalidParticipant);

        let mut participant = match Participant::load(info)? {
            Some(p) => p,
            None => {
                let bump_seed = [bump];
                let seeds: &[&[u8]] = &[
                    PARTICIPANT_SEED,
                    sale_key.as_ref(),
                    &round_seed,
                    input.account.as_ref(),
                    &bump_seed,
                ];
                create_participant_account(
                    &ctx.accounts.admin,
                    &ctx.accounts.system_program,
                    info,
                    seeds,
                )?;
                Participant::vacant(round)
            }
        };

        ledger.upsert(&mut participant, input, bump)?;
        participant.store(info)?;
    }

    emit!(ParticipantsAdded {
        round,
        count_added: entries.len() as u8,
        participants: ledger.participant_count,
        round_total: ledger.total_locked,
    });

    Ok(())
}

/// Allocates a participant PDA owned by this program. A PDA that already holds
/// lamports is topped up to rent exemption instead of created.
fn create_participant_account<'info>(
    payer: &Signer<'info>,
    system_program_account: &Program<'info, System>,
    target: &AccountInfo<'info>,
    seeds: &[&[u8]],
) -> Result<()> {
    let space = 8 + Participant::INIT_SPACE;
    let rent = Rent::get()?.minimum_balance(space);
    let program = system_program_account.to_account_info();
    let signer_seeds = &[seeds];

    let current = target.lamports();
    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                program,
                CreateAccount {
                    from: payer.to_account_info(),
                    to: target.clone(),
                },
                signer_seeds,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                program.clone(),
                Transfer {
                    from: payer.to_account_info(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            program.clone(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            program,
            Assign {
                account_to_assign: target.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}

#[derive(Accounts)]
#[instruction(round: RoundType)]
pub struct AddParticipants<'info> {
    #[account(seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [ROUND_SEED, sale_state.key().as_ref(), &[round as u8]],
        bump = round_ledger.bump
    )]
    pub round_ledger: Account<'info, RoundLedger>,

    /// Pays for participant PDAs created by this batch.
    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ParticipantsAdded {
    pub round: RoundType,
    pub count_added: u8,
    pub participants: u32,
    pub round_total: u64,
}
