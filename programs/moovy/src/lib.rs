use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
use state::{AllocationGroup, GroupRecipients, ParticipantInput, RoundType};

declare_id!("CxmZtK1mTGm7u2ESDwfM2V2yhU3GYhWooo91UpueA7u5");

#[program]
pub mod moovy {
    use super::*;

    // Distributor

    pub fn initialize_distributor(
        ctx: Context<InitializeDistributor>,
        recipients: GroupRecipients,
    ) -> Result<()> {
        instructions::initialize_distributor(ctx, recipients)
    }

    pub fn set_token_sale(ctx: Context<SetTokenSale>) -> Result<()> {
        instructions::set_token_sale(ctx)
    }

    pub fn set_tge_passed(ctx: Context<SetTgePassed>) -> Result<()> {
        instructions::set_tge_passed(ctx)
    }

    pub fn distribute(ctx: Context<Distribute>, group: AllocationGroup) -> Result<()> {
        instructions::distribute(ctx, group)
    }

    pub fn get_distributable(ctx: Context<GetDistributable>, group: AllocationGroup) -> Result<u64> {
        instructions::get_distributable(ctx, group)
    }

    // Token sale

    pub fn initialize_sale(ctx: Context<InitializeSale>) -> Result<()> {
        instructions::initialize_sale(ctx)
    }

    pub fn start_igo(ctx: Context<StartIgo>) -> Result<()> {
        instructions::start_igo(ctx)
    }

    pub fn add_participants<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddParticipants<'info>>,
        round: RoundType,
        entries: Vec<ParticipantInput>,
    ) -> Result<()> {
        instructions::add_participants(ctx, round, entries)
    }

    pub fn buy(ctx: Context<Buy>, amount: u64) -> Result<()> {
        instructions::buy(ctx, amount)
    }

    pub fn claim(ctx: Context<Claim>, round: RoundType) -> Result<()> {
        instructions::claim(ctx, round)
    }

    pub fn get_quote(ctx: Context<GetQuote>, payment_amount: u64) -> Result<u64> {
        instructions::get_quote(ctx, payment_amount)
    }

    pub fn get_account_locked_balance(
        ctx: Context<ReadParticipant>,
        round: RoundType,
        account: Pubkey,
    ) -> Result<u64> {
        instructions::get_account_locked_balance(ctx, round, account)
    }

    pub fn get_round_participants<'info>(
        ctx: Context<'_, '_, 'info, 'info, ReadRound<'info>>,
        round: RoundType,
        offset: u32,
        limit: u8,
    ) -> Result<Vec<Pubkey>> {
        instructions::get_round_participants(ctx, round, offset, limit)
    }

    pub fn get_claimable(
        ctx: Context<ReadParticipant>,
        round: RoundType,
        account: Pubkey,
    ) -> Result<u64> {
        instructions::get_claimable(ctx, round, account)
    }
}
