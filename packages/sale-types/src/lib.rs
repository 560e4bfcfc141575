use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin};

/// Effective mint phase, derived from the two owner-controlled flags.
/// `mint_active` gates everything; `whitelist_only` selects which
/// per-address limit and gating rules apply while minting is active.
#[cw_serde]
#[derive(Copy)]
pub enum SalePhase {
    Disabled,
    WhitelistOnly,
    Public,
}

impl SalePhase {
    pub fn from_flags(mint_active: bool, whitelist_only: bool) -> Self {
        match (mint_active, whitelist_only) {
            (false, _) => SalePhase::Disabled,
            (true, true) => SalePhase::WhitelistOnly,
            (true, false) => SalePhase::Public,
        }
    }
}

#[cw_serde]
pub struct SaleConfig {
    pub owner: Addr,
    pub payment_collector: Addr,
    pub unit_price: Coin,
    pub max_supply: u32,
    pub whitelist_mint_limit: u32,
    pub public_mint_limit: u32,
    pub mint_active: bool,
    pub whitelist_only: bool,
}

impl SaleConfig {
    pub fn phase(&self) -> SalePhase {
        SalePhase::from_flags(self.mint_active, self.whitelist_only)
    }

    /// Per-address limit for a quota-bearing mint in the given phase.
    /// `Disabled` carries no limit of its own; mints are rejected earlier.
    pub fn phase_limit(&self, phase: SalePhase) -> u32 {
        match phase {
            SalePhase::Disabled => 0,
            SalePhase::WhitelistOnly => self.whitelist_mint_limit,
            SalePhase::Public => self.public_mint_limit,
        }
    }
}

#[cw_serde]
pub struct SalePhaseResponse {
    pub phase: SalePhase,
}

#[cw_serde]
pub struct MintCountResponse {
    pub address: Addr,
    pub count: u32,
}

#[cw_serde]
pub struct TotalMintedResponse {
    pub total_minted: u32,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: String,
}
