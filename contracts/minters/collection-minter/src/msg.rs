use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin};

use sale_types::{MintCountResponse, SaleConfig, SalePhaseResponse, TokenUriResponse, TotalMintedResponse};

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
    pub crossmint_wallet: String,
    /// Defaults to the instantiator.
    pub payment_collector: Option<String>,
    pub unit_price: Coin,
    pub max_supply: u32,
    pub whitelist_mint_limit: u32,
    pub public_mint_limit: u32,
}

#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        quantity: u32,
        proof: Vec<String>,
    },
    Crossmint {
        recipient: String,
        quantity: u32,
        proof: Vec<String>,
    },
    Airdrop {
        recipients: Vec<String>,
        quantities: Vec<u32>,
    },
    ToggleMinting {},
    ToggleWhitelistOnly {},
    SetCrossmintWallet {
        address: String,
    },
    Reveal {
        base_uri: String,
    },
    SealContractPermanently {},
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
    #[returns(String)]
    AllowlistRoot {},
    #[returns(Addr)]
    CrossmintWallet {},
    #[returns(Addr)]
    TokenContract {},
    #[returns(bool)]
    IsSealed {},
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u32 },
}
