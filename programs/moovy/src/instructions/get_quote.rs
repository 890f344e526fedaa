use anchor_lang::prelude::*;

use crate::constants::SALE_STATE_SEED;
use crate::state::{SalePhase, SaleState};

/// Read-only: tokens `payment_amount` buys at the IGO price, and what they cost.
pub fn get_quote(ctx: Context<GetQuote>, payment_amount: u64) -> Result<u64> {
    let st = &ctx.accounts.sale_state;
    let price = st.price();
    let token_amount = price.quote(payment_amount)?;

    emit!(PurchaseQuote {
        payment_amount,
        token_amount,
        cost: price.quote_cost(token_amount)?,
        remaining_supply: st.remaining_supply(),
        phase: st.phase(),
    });

    Ok(token_amount)
}

#[derive(Accounts)]
pub struct GetQuote<'info> {
    #[account(seeds = [SALE_STATE_SEED], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,
}

#[event]
pub struct PurchaseQuote {
    pub payment_amount: u64,
    pub token_amount: u64,
    /// Payment actually charged for `token_amount` (<= payment_amount).
    pub cost: u64,
    pub remaining_supply: u64,
    pub phase: SalePhase,
}
