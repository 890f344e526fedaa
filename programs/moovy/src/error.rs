use anchor_lang::prelude::*;

/// Custom error codes for the Moovy distributor and token sale.
#[error_code]
pub enum MoovyError {
    #[msg("Unauthorized: admin signature required")]
    Unauthorized,

    #[msg("TGE or IGO has not started")]
    NotStarted,

    #[msg("Already started")]
    AlreadyStarted,

    #[msg("Token sale is ended")]
    SaleEnded,

    #[msg("Max IGO token supply exceeded")]
    SupplyExceeded,

    #[msg("Participants can only be added to the seed or private round")]
    InvalidRound,

    #[msg("Token sale is already set")]
    TokenSaleAlreadySet,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Participant account does not match the sale, round or owner")]
    InvalidParticipant,

    #[msg("Locked balance cannot drop below the amount already claimed")]
    BalanceBelowClaimed,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Math overflow")]
    MathOverflow,
}
