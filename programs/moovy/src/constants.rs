//! Program-wide constants. Supply figures are in whole tokens unless the name says
//! otherwise; use [`to_base_units`] before comparing against token amounts.

use crate::utils::schedule::VestingSchedule;

/// Decimals of the Moovy mint created by `initialize_distributor`.
pub const TOKEN_DECIMALS: u8 = 9;

/// 10^TOKEN_DECIMALS.
pub const TOKEN_UNIT: u64 = 1_000_000_000;

/// Fixed total supply, minted once at construction.
pub const TOTAL_SUPPLY: u64 = 100_000_000;

/// Portion of the supply handed to the token sale vault.
pub const SALE_ALLOCATION: u64 = 27_000_000;

/// Tokens purchasable in the IGO round.
pub const MAX_IGO_SUPPLY: u64 = 1_000_000;

/// IGO price: payment-token whole units per Moovy whole unit, as a fraction.
pub const IGO_PRICE_NUMERATOR: u64 = 37;
pub const IGO_PRICE_DENOMINATOR: u64 = 100;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Vesting months are a fixed 30 days, not calendar months.
pub const SECONDS_PER_MONTH: i64 = 30 * SECONDS_PER_DAY;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Max entries accepted by one `add_participants` call. Each entry also passes its
/// participant PDA, so this is bounded by the transaction size.
pub const MAX_PARTICIPANTS_BATCH: usize = 10;

/// Max keys returned by one `get_round_participants` page (return data is capped at 1 KiB).
pub const MAX_PARTICIPANTS_PAGE: usize = 30;

pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";
pub const MINT_SEED: &[u8] = b"mint";
pub const VAULT_SEED: &[u8] = b"vault";
pub const SALE_STATE_SEED: &[u8] = b"sale_state";
pub const SALE_VAULT_SEED: &[u8] = b"sale_vault";
pub const ROUND_SEED: &[u8] = b"round";
pub const PARTICIPANT_SEED: &[u8] = b"participant";

// Allocation groups: (total, schedule). Totals sum to TOTAL_SUPPLY - SALE_ALLOCATION.
pub const ADVISORS_ALLOCATION: u64 = 2_000_000;
pub const ADVISORS_SCHEDULE: VestingSchedule = VestingSchedule::new(4, 18, 500);

pub const TEAM_MEMBERS_ALLOCATION: u64 = 12_000_000;
pub const TEAM_MEMBERS_SCHEDULE: VestingSchedule = VestingSchedule::new(1, 7, 2_000);

pub const PLAY_TO_EARN_ALLOCATION: u64 = 30_000_000;
pub const PLAY_TO_EARN_SCHEDULE: VestingSchedule = VestingSchedule::new(0, 6, 2_500);

pub const ECOSYSTEM_FUND_ALLOCATION: u64 = 15_000_000;
pub const ECOSYSTEM_FUND_SCHEDULE: VestingSchedule = VestingSchedule::new(0, 12, 2_000);

pub const MARKETING_ALLOCATION: u64 = 14_000_000;
pub const MARKETING_SCHEDULE: VestingSchedule = VestingSchedule::new(8, 28, 1_500);

// Sale rounds. All three start counting at IGO start.
pub const SEED_SCHEDULE: VestingSchedule = VestingSchedule::new(2, 8, 500);
pub const PRIVATE_SCHEDULE: VestingSchedule = VestingSchedule::new(1, 8, 500);
pub const IGO_SCHEDULE: VestingSchedule = VestingSchedule::new(0, 5, 4_000);

/// Whole tokens to base units of the Moovy mint.
pub const fn to_base_units(whole: u64) -> u64 {
    whole * TOKEN_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_totals_and_sale_allocation_cover_supply() {
        let groups = ADVISORS_ALLOCATION
            + TEAM_MEMBERS_ALLOCATION
            + PLAY_TO_EARN_ALLOCATION
            + ECOSYSTEM_FUND_ALLOCATION
            + MARKETING_ALLOCATION;
        assert_eq!(groups, 73_000_000);
        assert_eq!(groups + SALE_ALLOCATION, TOTAL_SUPPLY);
    }

    #[test]
    fn supply_fits_u64_base_units() {
        assert!((TOTAL_SUPPLY as u128) * (TOKEN_UNIT as u128) <= u64::MAX as u128);
        assert_eq!(TOKEN_UNIT, 10u64.pow(TOKEN_DECIMALS as u32));
    }
}
