use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin};

use crate::auction::AuctionSchedule;
use crate::state::AuctionSaleConfig;
use sale_types::{MintCountResponse, TokenUriResponse, TotalMintedResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Code id of the cw721 contract that keeps the token ledger.
    pub cw721_code_id: u64,
    /// Pre-reveal metadata base location.
    pub base_uri: String,
    /// Defaults to the instantiator.
    pub payment_collector: Option<String>,
    /// Fixed price of the public mint path. Auction prices are amounts of
    /// the same denom.
    pub public_price: Coin,
    pub max_supply: u32,
    /// Cap on units mintable through the auction path, within `max_supply`.
    pub auction_supply: u32,
    /// Single per-address limit shared by the auction and public paths.
    pub token_mint_limit: u32,
    pub auction_schedule: AuctionSchedule,
}

#[cw_serde]
pub enum ExecuteMsg {
    AuctionMint {
        quantity: u32,
    },
    PublicMint {
        quantity: u32,
    },
    Airdrop {
        recipients: Vec<String>,
        quantities: Vec<u32>,
    },
    ToggleMinting {},
    Reveal {
        base_uri: String,
    },
    SealContractPermanently {},
}

#[cw_serde]
pub struct CurrentPriceResponse {
    pub price: Coin,
}

#[cw_serde]
pub struct AuctionMintedResponse {
    pub auction_minted: u32,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AuctionSaleConfig)]
    Config {},
    #[returns(AuctionSchedule)]
    AuctionSchedule {},
    #[returns(CurrentPriceResponse)]
    CurrentPrice {},
    #[returns(TotalMintedResponse)]
    TotalMinted {},
    #[returns(AuctionMintedResponse)]
    AuctionMinted {},
    #[returns(MintCountResponse)]
    MintCount { address: String },
    #[returns(Addr)]
    TokenContract {},
    #[returns(bool)]
    IsSealed {},
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u32 },
}
