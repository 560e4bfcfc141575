use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use sale_types::SaleConfig;

pub const CONFIG: Item<SaleConfig> = Item::new("config");
// Hex encoded digest committing to the allowlist membership set
pub const ALLOWLIST_ROOT: Item<String> = Item::new("allowlist_root");
pub const CROSSMINT_WALLET: Item<Addr> = Item::new("crossmint_wallet");
// Address of the cw721 contract, stored once its instantiation reply lands
pub const TOKEN_CONTRACT: Item<Addr> = Item::new("token_contract");
