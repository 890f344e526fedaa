//! Fixed-price conversion between Moovy base units and payment-token base units.
//! Price is `IGO_PRICE_NUMERATOR / IGO_PRICE_DENOMINATOR` payment whole units per
//! Moovy whole unit; the two mints may have different decimals.

use anchor_lang::prelude::*;

use crate::constants::{IGO_PRICE_DENOMINATOR, IGO_PRICE_NUMERATOR};
use crate::error::MoovyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price {
    pub token_decimals: u8,
    pub payment_decimals: u8,
}

impl Price {
    pub fn new(token_decimals: u8, payment_decimals: u8) -> Self {
        Self {
            token_decimals,
            payment_decimals,
        }
    }

    /// Payment owed for `tokens`, rounded up so the sale never under-charges.
    pub fn quote_cost(&self, tokens: u64) -> Result<u64> {
        let num = (tokens as u128)
            .checked_mul(IGO_PRICE_NUMERATOR as u128)
            .and_then(|v| v.checked_mul(pow10(self.payment_decimals)?))
            .ok_or(MoovyError::MathOverflow)?;
        let den = (IGO_PRICE_DENOMINATOR as u128)
            .checked_mul(pow10(self.token_decimals).ok_or(MoovyError::MathOverflow)?)
            .ok_or(MoovyError::MathOverflow)?;
        let cost = num.div_ceil(den);
        Ok(u64::try_from(cost).map_err(|_| MoovyError::MathOverflow)?)
    }

    /// Tokens bought by `payment`, truncated.
    pub fn quote(&self, payment: u64) -> Result<u64> {
        let num = (payment as u128)
            .checked_mul(IGO_PRICE_DENOMINATOR as u128)
            .and_then(|v| v.checked_mul(pow10(self.token_decimals)?))
            .ok_or(MoovyError::MathOverflow)?;
        let den = (IGO_PRICE_NUMERATOR as u128)
            .checked_mul(pow10(self.payment_decimals).ok_or(MoovyError::MathOverflow)?)
            .ok_or(MoovyError::MathOverflow)?;
        Ok(u64::try_from(num / den).map_err(|_| MoovyError::MathOverflow)?)
    }
}

fn pow10(decimals: u8) -> Option<u128> {
    10u128.checked_pow(decimals as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{to_base_units, TOKEN_DECIMALS};

    const USD: u64 = 1_000_000;

    fn usdt_price() -> Price {
        Price::new(TOKEN_DECIMALS, 6)
    }

    #[test]
    fn five_tokens_cost_one_eighty_five() {
        assert_eq!(
            usdt_price().quote_cost(to_base_units(5)).unwrap(),
            185 * USD / 100
        );
    }

    #[test]
    fn tenth_of_a_token_costs_0_037() {
        let tenth = to_base_units(1) / 10;
        assert_eq!(usdt_price().quote_cost(tenth).unwrap(), 37 * USD / 1_000);
    }

    #[test]
    fn dust_purchase_rounds_up() {
        // 1 base unit is worth far less than 1 micro-dollar but is never free.
        assert_eq!(usdt_price().quote_cost(1).unwrap(), 1);
        assert_eq!(usdt_price().quote_cost(0).unwrap(), 0);
    }

    #[test]
    fn quote_inverts_cost() {
        let price = usdt_price();
        assert_eq!(price.quote(185 * USD / 100).unwrap(), to_base_units(5));
        let tokens = price.quote(USD).unwrap();
        assert!(price.quote_cost(tokens).unwrap() <= USD);
    }

    #[test]
    fn same_decimals() {
        let price = Price::new(9, 9);
        assert_eq!(price.quote_cost(100).unwrap(), 37);
        assert_eq!(price.quote(37).unwrap(), 100);
    }

    #[test]
    fn absurd_decimals_overflow() {
        assert!(Price::new(9, 60).quote_cost(1).is_err());
    }
}
