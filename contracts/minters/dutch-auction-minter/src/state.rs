use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin};
use cw_storage_plus::Item;

use crate::auction::AuctionSchedule;

/// This variant has no whitelist phase; `mint_active` alone gates the
/// public path. The auction path runs on its own clock.
#[cw_serde]
pub struct AuctionSaleConfig {
    pub owner: Addr,
    pub payment_collector: Addr,
    pub public_price: Coin,
    pub max_supply: u32,
    pub auction_supply: u32,
    pub token_mint_limit: u32,
    pub mint_active: bool,
}

pub const CONFIG: Item<AuctionSaleConfig> = Item::new("config");
pub const AUCTION_SCHEDULE: Item<AuctionSchedule> = Item::new("auction_schedule");
// Units issued through the auction path, capped by auction_supply
pub const AUCTION_MINTED: Item<u32> = Item::new("auction_minted");
// Address of the cw721 contract, stored once its instantiation reply lands
pub const TOKEN_CONTRACT: Item<Addr> = Item::new("token_contract");
