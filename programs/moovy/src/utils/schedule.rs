//! Cliff + linear release shared by the allocation groups and the sale rounds.
//!
//! For `m` whole months elapsed since the schedule start:
//! - `m < cliff`: nothing is unlocked
//! - `m == cliff`: the cliff tranche (`unlock_bps` of the total) unlocks
//! - the rest vests in `vesting - 1` equal monthly steps, the first landing two
//!   months after the cliff, the last at `cliff + vesting`
//! - `m >= cliff + vesting`: the whole total is unlocked, truncation residue included

use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::MoovyError;
use crate::utils::time;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    pub cliff_months: u16,
    pub vesting_months: u16,
    /// Share of the total released when the cliff elapses (basis points).
    pub unlock_bps: u16,
}

impl VestingSchedule {
    pub const fn new(cliff_months: u16, vesting_months: u16, unlock_bps: u16) -> Self {
        Self {
            cliff_months,
            vesting_months,
            unlock_bps,
        }
    }

    /// Months after which the total is fully unlocked.
    pub fn end_month(&self) -> u64 {
        self.cliff_months as u64 + self.vesting_months as u64
    }

    /// Cumulative amount unlocked after `months` whole months.
    pub fn unlocked_amount(&self, total: u64, months: u64) -> Result<u64> {
        let cliff = self.cliff_months as u64;
        if months < cliff {
            return Ok(0);
        }
        if months >= self.end_month() {
            return Ok(total);
        }

        let cliff_tranche = mul_div(total, self.unlock_bps as u64, BPS_DENOMINATOR)?;
        let steps = (self.vesting_months as u64).saturating_sub(1);
        if steps == 0 {
            return Ok(cliff_tranche);
        }
        let vested_steps = (months - cliff).saturating_sub(1);
        let linear = mul_div(total - cliff_tranche, vested_steps, steps)?;
        cliff_tranche
            .checked_add(linear)
            .ok_or_else(|| error!(MoovyError::MathOverflow))
    }

    /// Amount releasable now, given what was already released. Never negative.
    pub fn claimable_amount(
        &self,
        now_ts: i64,
        start_ts: i64,
        total: u64,
        already_claimed: u64,
    ) -> Result<u64> {
        let months = time::months_elapsed(now_ts, start_ts);
        let unlocked = self.unlocked_amount(total, months)?;
        Ok(unlocked.saturating_sub(already_claimed))
    }

    /// Timestamp from which the total is claimable.
    pub fn fully_vested_at(&self, start_ts: i64) -> Result<i64> {
        time::month_boundary(start_ts, self.end_month())
            .ok_or_else(|| error!(MoovyError::MathOverflow))
    }
}

/// `value * numerator / denominator`, truncating, computed in u128.
pub fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, MoovyError::MathOverflow);
    let v = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(MoovyError::MathOverflow)?
        / denominator as u128;
    Ok(u64::try_from(v).map_err(|_| MoovyError::MathOverflow)?)
}
