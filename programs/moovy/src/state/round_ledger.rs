use anchor_lang::prelude::*;

use crate::error::MoovyError;
use crate::state::RoundType;

/// Instruction input (account + locked balance).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticipantInput {
    pub account: Pubkey,
    pub balance: u64,
}

impl ParticipantInput {
    pub fn validate(&self) -> Result<()> {
        require!(self.account != Pubkey::default(), MoovyError::InvalidPubkey);
        require!(self.balance > 0, MoovyError::InvalidAmount);
        Ok(())
    }
}

/// Per-round header PDA. Participants live in their own PDAs; this only counts them.
#[account]
#[derive(InitSpace)]
pub struct RoundLedger {
    pub sale: Pubkey,
    pub round: RoundType,
    /// Participants ever enrolled; also the next participant index.
    pub participant_count: u32,
    /// Sum of locked balances across the round, in base units.
    pub total_locked: u64,
    pub bump: u8,
}

/// One `(round, account)` entry, seeded by `[PARTICIPANT_SEED, sale, round, account]`.
#[account]
#[derive(InitSpace)]
pub struct Participant {
    pub sale: Pubkey,
    pub round: RoundType,
    pub account: Pubkey,
    /// Enrollment order within the round.
    pub index: u32,
    /// Purchased or granted tokens, in base units.
    pub locked_balance: u64,
    /// Released so far (<= locked_balance, never decreases).
    pub claimed: u64,
    pub bump: u8,
}

impl RoundLedger {
    pub fn init(&mut self, sale: Pubkey, round: RoundType, bump: u8) {
        self.sale = sale;
        self.round = round;
        self.participant_count = 0;
        self.total_locked = 0;
        self.bump = bump;
    }

    /// Binds a fresh participant PDA to this round, or checks an existing one belongs here.
    fn enroll(&mut self, participant: &mut Participant, account: Pubkey, bump: u8) -> Result<()> {
        if participant.is_registered() {
            require!(
                participant.sale == self.sale
                    && participant.round == self.round
                    && participant.account == account,
                MoovyError::InvalidParticipant
            );
            return Ok(());
        }
        require!(account != Pubkey::default(), MoovyError::InvalidPubkey);

        participant.sale = self.sale;
        participant.round = self.round;
        participant.account = account;
        participant.index = self.participant_count;
        participant.locked_balance = 0;
        participant.claimed = 0;
        participant.bump = bump;
        self.participant_count = self
            .participant_count
            .checked_add(1)
            .ok_or(MoovyError::MathOverflow)?;
        Ok(())
    }

    /// Sets the locked balance (admin snapshot, overwrite semantics).
    pub fn upsert(
        &mut self,
        participant: &mut Participant,
        input: &ParticipantInput,
        bump: u8,
    ) -> Result<()> {
        input.validate()?;
        self.enroll(participant, input.account, bump)?;
        require!(
            input.balance >= participant.claimed,
            MoovyError::BalanceBelowClaimed
        );

        self.total_locked = self
            .total_locked
            .checked_sub(participant.locked_balance)
            .and_then(|t| t.checked_add(input.balance))
            .ok_or(MoovyError::MathOverflow)?;
        participant.locked_balance = input.balance;
        Ok(())
    }

    /// Adds a purchase to the locked balance; returns the new balance.
    pub fn credit(
        &mut self,
        participant: &mut Participant,
        account: Pubkey,
        amount: u64,
        bump: u8,
    ) -> Result<u64> {
        self.enroll(participant, account, bump)?;
        participant.locked_balance = participant
            .locked_balance
            .checked_add(amount)
            .ok_or(MoovyError::MathOverflow)?;
        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(MoovyError::MathOverflow)?;
        Ok(participant.locked_balance)
    }

    /// Accounts of the participants whose index falls in `[offset, offset + limit)`,
    /// in enrollment order. Entries of other rounds or sales are rejected.
    pub fn page(&self, participants: &[Participant], offset: u32, limit: usize) -> Result<Vec<Pubkey>> {
        let mut window = Vec::with_capacity(participants.len().min(limit));
        for p in participants {
            require!(
                p.sale == self.sale && p.round == self.round && p.is_registered(),
                MoovyError::InvalidParticipant
            );
            if p.index >= offset && ((p.index - offset) as usize) < limit {
                window.push((p.index, p.account));
            }
        }
        window.sort_unstable_by_key(|(index, _)| *index);
        window.dedup_by_key(|(index, _)| *index);
        Ok(window.into_iter().map(|(_, account)| account).collect())
    }
}

impl Participant {
    pub fn is_registered(&self) -> bool {
        self.account != Pubkey::default()
    }

    /// Amount claimable right now under the round schedule.
    pub fn claimable(&self, start_ts: i64, now_ts: i64) -> Result<u64> {
        self.round
            .schedule()
            .claimable_amount(now_ts, start_ts, self.locked_balance, self.claimed)
    }

    /// Books the claimable amount and returns it. Must run before the matching transfer.
    pub fn record_claim(&mut self, start_ts: i64, now_ts: i64) -> Result<u64> {
        let amount = self.claimable(start_ts, now_ts)?;
        if amount == 0 {
            return Ok(0);
        }
        self.claimed = self
            .claimed
            .checked_add(amount)
            .ok_or(MoovyError::MathOverflow)?;
        require!(self.claimed <= self.locked_balance, MoovyError::MathOverflow);
        Ok(amount)
    }

    /// A participant PDA that has not been created yet reads as `None`.
    pub fn load(info: &AccountInfo) -> Result<Option<Participant>> {
        if info.data_is_empty() {
            return Ok(None);
        }
        require_keys_eq!(*info.owner, crate::ID, MoovyError::InvalidParticipant);
        let data = info.try_borrow_data()?;
        Ok(Some(Participant::try_deserialize(&mut &data[..])?))
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        self.try_serialize(&mut &mut data[..])
    }

    /// In-memory image of a participant PDA that was just allocated.
    pub fn vacant(round: RoundType) -> Self {
        Self {
            sale: Pubkey::default(),
            round,
            account: Pubkey::default(),
            index: 0,
            locked_balance: 0,
            claimed: 0,
            bump: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{to_base_units, SECONDS_PER_DAY};

    const IGO_START: i64 = 1_700_000_000;

    fn days(d: i64) -> i64 {
        IGO_START + d * SECONDS_PER_DAY
    }

    fn ledger(round: RoundType) -> RoundLedger {
        let mut l = RoundLedger {
            sale: Pubkey::default(),
            round: RoundType::Seed,
            participant_count: 9,
            total_locked: 9,
            bump: 0,
        };
        l.init(Pubkey::new_unique(), round, 253);
        l
    }

    fn input(account: Pubkey, balance: u64) -> ParticipantInput {
        ParticipantInput { account, balance }
    }

    fn seeded(round: RoundType, account: Pubkey) -> (RoundLedger, Participant) {
        let mut l = ledger(round);
        let mut p = Participant::vacant(round);
        l.upsert(&mut p, &input(account, to_base_units(100_000)), 7)
            .unwrap();
        (l, p)
    }

    #[test]
    fn upsert_overwrites() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut l = ledger(RoundType::Seed);
        let mut pa = Participant::vacant(RoundType::Seed);
        let mut pb = Participant::vacant(RoundType::Seed);
        l.upsert(&mut pa, &input(alice, 1), 1).unwrap();
        l.upsert(&mut pb, &input(bob, 2), 1).unwrap();
        l.upsert(&mut pa, &input(alice, 5), 1).unwrap();

        assert_eq!(pa.locked_balance, 5);
        assert_eq!((pa.index, pb.index), (0, 1));
        assert_eq!(l.participant_count, 2);
        assert_eq!(l.total_locked, 7);
        assert_eq!(l.page(&[pb, pa], 0, 10).unwrap(), vec![alice, bob]);
    }

    #[test]
    fn upsert_validates_input() {
        let mut l = ledger(RoundType::Private);
        let mut p = Participant::vacant(RoundType::Private);
        assert_eq!(
            l.upsert(&mut p, &input(Pubkey::default(), 1), 1)
                .unwrap_err(),
            MoovyError::InvalidPubkey.into()
        );
        assert_eq!(
            l.upsert(&mut p, &input(Pubkey::new_unique(), 0), 1)
                .unwrap_err(),
            MoovyError::InvalidAmount.into()
        );
        assert!(!p.is_registered());
        assert_eq!(l.participant_count, 0);
    }

    #[test]
    fn upsert_cannot_drop_below_claimed() {
        let alice = Pubkey::new_unique();
        let (mut l, mut p) = seeded(RoundType::Seed, alice);
        let claimed = p.record_claim(IGO_START, days(60)).unwrap();
        assert_eq!(claimed, to_base_units(5_000));
        assert_eq!(
            l.upsert(&mut p, &input(alice, to_base_units(1_000)), 7)
                .unwrap_err(),
            MoovyError::BalanceBelowClaimed.into()
        );
        l.upsert(&mut p, &input(alice, to_base_units(5_000)), 7)
            .unwrap();
        assert_eq!(l.total_locked, to_base_units(5_000));
    }

    #[test]
    fn participant_of_another_round_is_rejected() {
        let alice = Pubkey::new_unique();
        let (_, mut p) = seeded(RoundType::Seed, alice);
        let mut private = ledger(RoundType::Private);
        assert_eq!(
            private.upsert(&mut p, &input(alice, 1), 7).unwrap_err(),
            MoovyError::InvalidParticipant.into()
        );
        assert_eq!(
            private.page(&[p], 0, 10).unwrap_err(),
            MoovyError::InvalidParticipant.into()
        );
    }

    #[test]
    fn participant_bound_to_other_account_is_rejected() {
        let (mut l, mut p) = seeded(RoundType::Seed, Pubkey::new_unique());
        assert_eq!(
            l.upsert(&mut p, &input(Pubkey::new_unique(), 1), 7)
                .unwrap_err(),
            MoovyError::InvalidParticipant.into()
        );
    }

    #[test]
    fn igo_round_has_no_buyer_limit() {
        let mut l = ledger(RoundType::Igo);
        for i in 0..201u32 {
            let mut p = Participant::vacant(RoundType::Igo);
            let buyer = Pubkey::new_unique();
            assert_eq!(l.credit(&mut p, buyer, 1, 255).unwrap(), 1);
            assert_eq!(p.index, i);
        }
        assert_eq!(l.participant_count, 201);
        assert_eq!(l.total_locked, 201);
    }

    #[test]
    fn credit_accumulates() {
        let alice = Pubkey::new_unique();
        let mut l = ledger(RoundType::Igo);
        let mut p = Participant::vacant(RoundType::Igo);
        assert_eq!(l.credit(&mut p, alice, 5, 1).unwrap(), 5);
        assert_eq!(l.credit(&mut p, alice, 7, 1).unwrap(), 12);
        assert_eq!(l.participant_count, 1);
        assert_eq!(l.total_locked, 12);
    }

    #[test]
    fn seed_claim_cliff_and_all() {
        let alice = Pubkey::new_unique();
        let (_, mut p) = seeded(RoundType::Seed, alice);
        assert_eq!(p.record_claim(IGO_START, days(59)).unwrap(), 0);
        assert_eq!(
            p.record_claim(IGO_START, days(2 * 30)).unwrap(),
            to_base_units(5_000)
        );

        let (_, mut p) = seeded(RoundType::Seed, alice);
        assert_eq!(
            p.record_claim(IGO_START, days(10 * 30)).unwrap(),
            to_base_units(100_000)
        );
        assert_eq!(p.claimed, to_base_units(100_000));
    }

    #[test]
    fn private_claim_cliff_and_all() {
        let (_, mut p) = seeded(RoundType::Private, Pubkey::new_unique());
        assert_eq!(
            p.record_claim(IGO_START, days(30)).unwrap(),
            to_base_units(5_000)
        );
        assert_eq!(
            p.record_claim(IGO_START, days(9 * 30)).unwrap(),
            to_base_units(95_000)
        );
    }

    #[test]
    fn igo_claim_at_start_and_after_five_months() {
        let mut l = ledger(RoundType::Igo);
        let mut p = Participant::vacant(RoundType::Igo);
        l.credit(&mut p, Pubkey::new_unique(), to_base_units(4_000), 1)
            .unwrap();
        assert_eq!(
            p.record_claim(IGO_START, IGO_START).unwrap(),
            to_base_units(1_600)
        );
        assert_eq!(
            p.record_claim(IGO_START, days(5 * 30)).unwrap(),
            to_base_units(2_400)
        );
    }

    #[test]
    fn claim_twice_same_instant() {
        let (_, mut p) = seeded(RoundType::Seed, Pubkey::new_unique());
        let now = days(5 * 30);
        assert!(p.record_claim(IGO_START, now).unwrap() > 0);
        assert_eq!(p.record_claim(IGO_START, now).unwrap(), 0);
    }

    #[test]
    fn participants_paging() {
        let mut l = ledger(RoundType::Seed);
        let keys: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let mut entries = Vec::new();
        for k in &keys {
            let mut p = Participant::vacant(RoundType::Seed);
            l.upsert(&mut p, &input(*k, 1), 1).unwrap();
            entries.push(p);
        }
        entries.reverse();
        assert_eq!(l.page(&entries, 1, 2).unwrap(), keys[1..3].to_vec());
        assert!(l.page(&entries, 10, 2).unwrap().is_empty());
        // the same PDA passed twice is listed once
        let twice = [entries[0].clone(), entries[0].clone()];
        assert_eq!(l.page(&twice, 0, 10).unwrap(), vec![keys[4]]);
    }

    #[test]
    fn participant_survives_account_round_trip() {
        let (_, p) = seeded(RoundType::Seed, Pubkey::new_unique());
        let mut data = vec![0u8; 8 + Participant::INIT_SPACE];
        p.try_serialize(&mut &mut data[..]).unwrap();
        let back = Participant::try_deserialize(&mut &data[..]).unwrap();
        assert_eq!(back.account, p.account);
        assert_eq!(back.locked_balance, p.locked_balance);
    }
}
