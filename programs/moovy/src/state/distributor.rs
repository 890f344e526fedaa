use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::MoovyError;
use crate::utils::schedule::VestingSchedule;

/// The five fixed allocation groups of the initial supply.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationGroup {
    Advisors,
    TeamMembers,
    PlayToEarn,
    EcosystemFund,
    Marketing,
}

impl AllocationGroup {
    pub const COUNT: usize = 5;

    pub const ALL: [AllocationGroup; Self::COUNT] = [
        AllocationGroup::Advisors,
        AllocationGroup::TeamMembers,
        AllocationGroup::PlayToEarn,
        AllocationGroup::EcosystemFund,
        AllocationGroup::Marketing,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Total allocation in base units.
    pub fn total_allocation(self) -> u64 {
        let whole = match self {
            AllocationGroup::Advisors => ADVISORS_ALLOCATION,
            AllocationGroup::TeamMembers => TEAM_MEMBERS_ALLOCATION,
            AllocationGroup::PlayToEarn => PLAY_TO_EARN_ALLOCATION,
            AllocationGroup::EcosystemFund => ECOSYSTEM_FUND_ALLOCATION,
            AllocationGroup::Marketing => MARKETING_ALLOCATION,
        };
        to_base_units(whole)
    }

    pub fn schedule(self) -> VestingSchedule {
        match self {
            AllocationGroup::Advisors => ADVISORS_SCHEDULE,
            AllocationGroup::TeamMembers => TEAM_MEMBERS_SCHEDULE,
            AllocationGroup::PlayToEarn => PLAY_TO_EARN_SCHEDULE,
            AllocationGroup::EcosystemFund => ECOSYSTEM_FUND_SCHEDULE,
            AllocationGroup::Marketing => MARKETING_SCHEDULE,
        }
    }
}

/// Per-group bookkeeping stored in the distributor PDA.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct AllocationRecord {
    /// Fixed at initialization; distributions always go here.
    pub recipient: Pubkey,
    pub total_allocation: u64,
    /// Released so far (<= total_allocation, never decreases).
    pub claimed: u64,
}

/// Instruction input: one fixed recipient wallet per group.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupRecipients {
    pub advisors: Pubkey,
    pub team_members: Pubkey,
    pub play_to_earn: Pubkey,
    pub ecosystem_fund: Pubkey,
    pub marketing: Pubkey,
}

impl GroupRecipients {
    pub fn get(&self, group: AllocationGroup) -> Pubkey {
        match group {
            AllocationGroup::Advisors => self.advisors,
            AllocationGroup::TeamMembers => self.team_members,
            AllocationGroup::PlayToEarn => self.play_to_earn,
            AllocationGroup::EcosystemFund => self.ecosystem_fund,
            AllocationGroup::Marketing => self.marketing,
        }
    }
}

/// Distributor state PDA: owns the minted supply until it is distributed.
#[account]
#[derive(InitSpace)]
pub struct DistributorState {
    /// Admin authority (sets the token sale and the TGE).
    pub admin: Pubkey,
    /// Moovy mint created at initialization.
    pub mint: Pubkey,
    /// Sale state PDA funded by `set_token_sale`; default until then.
    pub token_sale: Pubkey,
    pub tge_passed: bool,
    /// TGE timestamp (Unix seconds, UTC); vesting clocks of all groups start here.
    pub tge_ts: i64,
    /// Indexed by `AllocationGroup as usize`.
    pub groups: [AllocationRecord; 5],
    pub bump: u8,
}

impl DistributorState {
    pub fn init(
        &mut self,
        admin: Pubkey,
        mint: Pubkey,
        recipients: &GroupRecipients,
        bump: u8,
    ) -> Result<()> {
        self.admin = admin;
        self.mint = mint;
        self.token_sale = Pubkey::default();
        self.tge_passed = false;
        self.tge_ts = 0;
        self.bump = bump;
        for group in AllocationGroup::ALL {
            let recipient = recipients.get(group);
            require!(recipient != Pubkey::default(), MoovyError::InvalidPubkey);
            self.groups[group.index()] = AllocationRecord {
                recipient,
                total_allocation: group.total_allocation(),
                claimed: 0,
            };
        }
        Ok(())
    }

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, MoovyError::Unauthorized);
        Ok(())
    }

    pub fn group(&self, group: AllocationGroup) -> &AllocationRecord {
        &self.groups[group.index()]
    }

    pub fn is_token_sale_set(&self) -> bool {
        self.token_sale != Pubkey::default()
    }

    pub fn set_token_sale(&mut self, token_sale: Pubkey) -> Result<()> {
        require!(!self.is_token_sale_set(), MoovyError::TokenSaleAlreadySet);
        require!(token_sale != Pubkey::default(), MoovyError::InvalidPubkey);
        self.token_sale = token_sale;
        Ok(())
    }

    pub fn pass_tge(&mut self, now_ts: i64) -> Result<()> {
        require!(!self.tge_passed, MoovyError::AlreadyStarted);
        self.tge_passed = true;
        self.tge_ts = now_ts;
        Ok(())
    }

    /// Amount `group` could receive right now.
    pub fn distributable(&self, group: AllocationGroup, now_ts: i64) -> Result<u64> {
        require!(self.tge_passed, MoovyError::NotStarted);
        let record = self.group(group);
        group.schedule().claimable_amount(
            now_ts,
            self.tge_ts,
            record.total_allocation,
            record.claimed,
        )
    }

    /// Books the currently distributable amount as claimed and returns it.
    /// Must run before the matching token transfer.
    pub fn record_distribution(&mut self, group: AllocationGroup, now_ts: i64) -> Result<u64> {
        let amount = self.distributable(group, now_ts)?;
        if amount == 0 {
            return Ok(0);
        }
        let record = &mut self.groups[group.index()];
        record.claimed = record
            .claimed
            .checked_add(amount)
            .ok_or(MoovyError::MathOverflow)?;
        require!(
            record.claimed <= record.total_allocation,
            MoovyError::MathOverflow
        );
        Ok(amount)
    }
}
