use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin};

use crate::state::EditionSupply;
use sale_types::{MintCountResponse, SaleConfig, SalePhaseResponse, TokenUriResponse, TotalMintedResponse};

#[cw_serde]
pub struct EditionConfig {
    pub edition_id: u32,
    pub max_supply: u32,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Code id of the cw721 contract that keeps the token ledger.
    pub cw721_code_id: u64,
    /// Pre-reveal metadata base location.
    pub base_uri: String,
    /// Hex encoded root digest of the committed allowlist.
    pub allowlist_root: String,
    /// Defaults to the instantiator.
    pub payment_collector: Option<String>,
    pub unit_price: Coin,
    pub max_supply: u32,
    pub whitelist_mint_limit: u32,
    pub public_mint_limit: u32,
    /// Editions open for minting from the start. More can be added later
    /// with `SetEditionSupply`.
    pub editions: Vec<EditionConfig>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        edition_id: u32,
        quantity: u32,
        proof: Vec<String>,
    },
    Airdrop {
        recipients: Vec<String>,
        edition_ids: Vec<u32>,
        quantities: Vec<u32>,
    },
    ToggleMinting {},
    ToggleWhitelistOnly {},
    SetEditionSupply {
        edition_id: u32,
        max_supply: u32,
    },
    SetUnitPrice {
        price: Coin,
    },
    Reveal {
        base_uri: String,
    },
    SealContractPermanently {},
}

#[cw_serde]
pub struct EditionResponse {
    pub edition_id: u32,
    pub supply: EditionSupply,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(SaleConfig)]
    Config {},
    #[returns(SalePhaseResponse)]
    SalePhase {},
    #[returns(TotalMintedResponse)]
    TotalMinted {},
    #[returns(MintCountResponse)]
    MintCount { address: String },
    #[returns(EditionResponse)]
    Edition { edition_id: u32 },
    #[returns(Vec<EditionResponse>)]
    Editions {},
    #[returns(String)]
    AllowlistRoot {},
    #[returns(Addr)]
    TokenContract {},
    #[returns(bool)]
    IsSealed {},
    #[returns(TokenUriResponse)]
    TokenUri { edition_id: u32 },
}
