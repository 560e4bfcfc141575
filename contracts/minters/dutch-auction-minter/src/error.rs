use cosmwasm_std::{StdError, Uint128};
use cw_utils::{ParseReplyError, PaymentError};
use lifecycle::LifecycleError;
use mint_ledger::LedgerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Payment error")]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    ParseReply(#[from] ParseReplyError),

    #[error("Minting is disabled")]
    MintingDisabled {},

    #[error("Auction has not started yet")]
    AuctionNotStarted {},

    #[error("Invalid value")]
    InvalidValue { expected: Uint128, sent: Uint128 },

    #[error("Invalid auction schedule")]
    InvalidAuctionSchedule {},

    #[error("Invalid auction supply")]
    InvalidAuctionSupply {},

    #[error("Recipients and quantities must have the same length")]
    MismatchedAirdropInput {},

    #[error("Token contract is not set")]
    TokenContractNotSet {},

    #[error("Token contract is already set")]
    TokenContractAlreadySet {},

    #[error("Max supply cannot be zero")]
    ZeroMaxSupply {},

    #[error("Token mint limit cannot be zero")]
    MintLimitZero {},

    #[error("Invalid unit price")]
    InvalidUnitPrice {},

    #[error("Quantity cannot be zero")]
    ZeroQuantity {},

    #[error("Unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
