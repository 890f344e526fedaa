use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::MoovyError;
use crate::utils::pricing::Price;
use crate::utils::schedule::VestingSchedule;

/// Sale rounds. Seed and Private balances are curated by the admin; IGO balances
/// come from `buy`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RoundType {
    Seed,
    Private,
    Igo,
}

impl RoundType {
    pub fn schedule(self) -> VestingSchedule {
        match self {
            RoundType::Seed => SEED_SCHEDULE,
            RoundType::Private => PRIVATE_SCHEDULE,
            RoundType::Igo => IGO_SCHEDULE,
        }
    }

    pub fn is_admin_curated(self) -> bool {
        !matches!(self, RoundType::Igo)
    }
}

/// Lifecycle of the IGO. `Ended` is derived from the sold supply, never stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SalePhase {
    NotStarted,
    Active,
    Ended,
}

/// Sale state PDA.
#[account]
#[derive(InitSpace)]
pub struct SaleState {
    pub admin: Pubkey,
    /// Moovy mint sold and vested by this sale.
    pub mint: Pubkey,
    /// Stablecoin accepted by `buy`.
    pub payment_mint: Pubkey,
    /// Payment token account receiving IGO proceeds.
    pub treasury: Pubkey,
    pub igo_started: bool,
    /// Set once by `start_igo`; every round vests from here.
    pub igo_start_ts: i64,
    /// IGO tokens sold, in base units (<= MAX_IGO_SUPPLY).
    pub total_sold: u64,
    pub token_decimals: u8,
    pub payment_decimals: u8,
    pub bump: u8,
}

impl SaleState {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        admin: Pubkey,
        mint: Pubkey,
        payment_mint: Pubkey,
        treasury: Pubkey,
        token_decimals: u8,
        payment_decimals: u8,
        bump: u8,
    ) {
        self.admin = admin;
        self.mint = mint;
        self.payment_mint = payment_mint;
        self.treasury = treasury;
        self.igo_started = false;
        self.igo_start_ts = 0;
        self.total_sold = 0;
        self.token_decimals = token_decimals;
        self.payment_decimals = payment_decimals;
        self.bump = bump;
    }

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, MoovyError::Unauthorized);
        Ok(())
    }

    pub fn max_supply() -> u64 {
        to_base_units(MAX_IGO_SUPPLY)
    }

    pub fn phase(&self) -> SalePhase {
        if !self.igo_started {
            SalePhase::NotStarted
        } else if self.is_sold_out() {
            SalePhase::Ended
        } else {
            SalePhase::Active
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.total_sold >= Self::max_supply()
    }

    pub fn remaining_supply(&self) -> u64 {
        Self::max_supply().saturating_sub(self.total_sold)
    }

    pub fn price(&self) -> Price {
        Price::new(self.token_decimals, self.payment_decimals)
    }

    pub fn start_igo(&mut self, now_ts: i64) -> Result<()> {
        require!(
            self.phase() == SalePhase::NotStarted,
            MoovyError::AlreadyStarted
        );
        self.igo_started = true;
        self.igo_start_ts = now_ts;
        Ok(())
    }

    pub fn ensure_started(&self) -> Result<()> {
        require!(self.phase() != SalePhase::NotStarted, MoovyError::NotStarted);
        Ok(())
    }

    /// Admin batches are only accepted for curated rounds, and only until sell-out.
    pub fn ensure_can_add_participants(&self, round: RoundType) -> Result<()> {
        require!(round.is_admin_curated(), MoovyError::InvalidRound);
        match self.phase() {
            SalePhase::NotStarted | SalePhase::Active => Ok(()),
            SalePhase::Ended => err!(MoovyError::SaleEnded),
        }
    }

    /// Validates an IGO purchase of `amount` base units, books it against the cap and
    /// returns the payment owed. Must run before the payment transfer.
    pub fn record_purchase(&mut self, amount: u64) -> Result<u64> {
        match self.phase() {
            SalePhase::NotStarted => return err!(MoovyError::NotStarted),
            SalePhase::Ended => return err!(MoovyError::SaleEnded),
            SalePhase::Active => {}
        }
        require!(amount <= self.remaining_supply(), MoovyError::SupplyExceeded);
        require!(amount > 0, MoovyError::InvalidAmount);

        let cost = self.price().quote_cost(amount)?;
        self.total_sold = self
            .total_sold
            .checked_add(amount)
            .ok_or(MoovyError::MathOverflow)?;
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn sale() -> SaleState {
        let mut st = SaleState {
            admin: Pubkey::default(),
            mint: Pubkey::default(),
            payment_mint: Pubkey::default(),
            treasury: Pubkey::default(),
            igo_started: true,
            igo_start_ts: 42,
            total_sold: 7,
            token_decimals: 0,
            payment_decimals: 0,
            bump: 0,
        };
        st.init(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            TOKEN_DECIMALS,
            6,
            254,
        );
        st
    }

    fn active() -> SaleState {
        let mut st = sale();
        st.start_igo(NOW).unwrap();
        st
    }

    #[test]
    fn init_resets_lifecycle() {
        let st = sale();
        assert_eq!(st.phase(), SalePhase::NotStarted);
        assert_eq!(st.total_sold, 0);
        assert_eq!(st.igo_start_ts, 0);
    }

    #[test]
    fn buy_before_start_fails() {
        let mut st = sale();
        assert_eq!(
            st.record_purchase(to_base_units(5)).unwrap_err(),
            MoovyError::NotStarted.into()
        );
        assert_eq!(st.total_sold, 0);
    }

    #[test]
    fn start_only_once() {
        let mut st = active();
        assert_eq!(
            st.start_igo(NOW + 100).unwrap_err(),
            MoovyError::AlreadyStarted.into()
        );
        assert_eq!(st.igo_start_ts, NOW);
        assert_eq!(st.phase(), SalePhase::Active);
    }

    #[test]
    fn buy_charges_fixed_price() {
        let mut st = active();
        assert_eq!(st.record_purchase(to_base_units(5)).unwrap(), 1_850_000);
        assert_eq!(st.record_purchase(to_base_units(1) / 10).unwrap(), 37_000);
        assert_eq!(st.total_sold, to_base_units(5) + to_base_units(1) / 10);
    }

    #[test]
    fn over_cap_purchase_fails() {
        let mut st = active();
        assert_eq!(
            st.record_purchase(to_base_units(100_000_000)).unwrap_err(),
            MoovyError::SupplyExceeded.into()
        );
        assert_eq!(st.total_sold, 0);

        st.record_purchase(to_base_units(999_999)).unwrap();
        assert_eq!(
            st.record_purchase(to_base_units(2)).unwrap_err(),
            MoovyError::SupplyExceeded.into()
        );
        assert_eq!(st.total_sold, to_base_units(999_999));
    }

    #[test]
    fn buy_after_sell_out_is_sale_ended() {
        let mut st = active();
        st.record_purchase(to_base_units(MAX_IGO_SUPPLY)).unwrap();
        assert_eq!(st.phase(), SalePhase::Ended);
        assert_eq!(
            st.record_purchase(1).unwrap_err(),
            MoovyError::SaleEnded.into()
        );
        assert_eq!(st.total_sold, SaleState::max_supply());
    }

    #[test]
    fn zero_purchase_is_rejected() {
        let mut st = active();
        assert_eq!(
            st.record_purchase(0).unwrap_err(),
            MoovyError::InvalidAmount.into()
        );
    }

    #[test]
    fn add_participants_gating() {
        let mut st = sale();
        // IGO is rejected in every phase
        assert_eq!(
            st.ensure_can_add_participants(RoundType::Igo).unwrap_err(),
            MoovyError::InvalidRound.into()
        );
        st.ensure_can_add_participants(RoundType::Seed).unwrap();

        st.start_igo(NOW).unwrap();
        st.ensure_can_add_participants(RoundType::Private).unwrap();

        st.record_purchase(to_base_units(MAX_IGO_SUPPLY)).unwrap();
        assert_eq!(
            st.ensure_can_add_participants(RoundType::Seed).unwrap_err(),
            MoovyError::SaleEnded.into()
        );
        assert_eq!(
            st.ensure_can_add_participants(RoundType::Igo).unwrap_err(),
            MoovyError::InvalidRound.into()
        );
    }

    #[test]
    fn round_schedules() {
        assert_eq!(RoundType::Seed.schedule().end_month(), 10);
        assert_eq!(RoundType::Private.schedule().end_month(), 9);
        assert_eq!(RoundType::Igo.schedule().end_month(), 5);
        assert!(RoundType::Seed.is_admin_curated() && RoundType::Private.is_admin_curated());
        assert!(!RoundType::Igo.is_admin_curated());
    }

    #[test]
    fn non_admin_cannot_start_or_add_participants() {
        let st = sale();
        let admin = st.admin;
        let stranger = Pubkey::new_unique();
        // start_igo and add_participants both gate on this before anything else
        assert_eq!(
            st.ensure_admin(&stranger).unwrap_err(),
            MoovyError::Unauthorized.into()
        );
        st.ensure_admin(&admin).unwrap();
    }

    #[test]
    fn two_hundred_and_first_buyer_can_purchase() {
        use crate::state::{Participant, RoundLedger};

        let mut st = active();
        let mut igo = RoundLedger {
            sale: Pubkey::new_unique(),
            round: RoundType::Igo,
            participant_count: 0,
            total_locked: 0,
            bump: 0,
        };
        for _ in 0..201 {
            let amount = to_base_units(1);
            st.record_purchase(amount).unwrap();
            let mut p = Participant::vacant(RoundType::Igo);
            igo.credit(&mut p, Pubkey::new_unique(), amount, 255)
                .unwrap();
        }
        assert_eq!(st.phase(), SalePhase::Active);
        assert_eq!(igo.participant_count, 201);
        assert_eq!(igo.total_locked, st.total_sold);
        assert_eq!(st.remaining_supply(), to_base_units(MAX_IGO_SUPPLY - 201));
    }
}
