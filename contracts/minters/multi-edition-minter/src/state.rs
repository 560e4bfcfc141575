use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use sale_types::SaleConfig;

#[cw_serde]
pub struct EditionSupply {
    pub minted: u32,
    pub max_supply: u32,
}

pub const CONFIG: Item<SaleConfig> = Item::new("config");
// Hex encoded digest committing to the allowlist membership set
pub const ALLOWLIST_ROOT: Item<String> = Item::new("allowlist_root");
// Per-edition supply accounting, keyed by edition id
pub const EDITIONS: Map<u32, EditionSupply> = Map::new("editions");
// Address of the cw721 contract, stored once its instantiation reply lands
pub const TOKEN_CONTRACT: Item<Addr> = Item::new("token_contract");
