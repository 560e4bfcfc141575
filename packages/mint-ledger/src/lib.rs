//! Shared mint accounting for every issuing entry point of a contract.
//!
//! All quota-bearing paths (direct mint, crossmint, auction mint, public
//! mint) converge on one `MintLedger`, so limits cannot be dodged by
//! switching entry points. Airdrops bump the total without consuming any
//! address quota. Callers run every `assert_*` check before the first
//! `commit_*` write; the host chain rolls back storage on error, which
//! keeps each handler a single atomic check-then-commit section.

use cosmwasm_std::{Addr, StdError, Storage};
use cw_storage_plus::{Item, Map};
use thiserror::Error;

pub const TOTAL_MINTED_KEY: &str = "total_minted";
pub const MINT_COUNTS_KEY: &str = "mint_counts";

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("no tokens left to mint")]
    NoMoreTokensLeft {},

    #[error("mint limit reached for address")]
    MintLimitReached {},
}

pub struct MintLedger<'a> {
    pub total_minted: Item<'a, u32>,
    pub mint_counts: Map<'a, Addr, u32>,
}

impl<'a> Default for MintLedger<'a> {
    fn default() -> Self {
        MintLedger {
            total_minted: Item::new(TOTAL_MINTED_KEY),
            mint_counts: Map::new(MINT_COUNTS_KEY),
        }
    }
}

impl<'a> MintLedger<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&self, storage: &mut dyn Storage) -> Result<(), LedgerError> {
        self.total_minted.save(storage, &0)?;
        Ok(())
    }

    pub fn total_minted(&self, storage: &dyn Storage) -> Result<u32, LedgerError> {
        Ok(self.total_minted.may_load(storage)?.unwrap_or(0))
    }

    /// Units minted by `address` through quota-bearing paths.
    pub fn minted_by(&self, storage: &dyn Storage, address: &Addr) -> Result<u32, LedgerError> {
        Ok(self
            .mint_counts
            .may_load(storage, address.clone())?
            .unwrap_or(0))
    }

    /// Errors unless `quantity` more units fit under `max_supply`.
    pub fn assert_supply(
        &self,
        storage: &dyn Storage,
        quantity: u32,
        max_supply: u32,
    ) -> Result<(), LedgerError> {
        let total = self.total_minted(storage)?;
        if total.checked_add(quantity).map_or(true, |n| n > max_supply) {
            return Err(LedgerError::NoMoreTokensLeft {});
        }
        Ok(())
    }

    /// Errors unless `address` may mint `quantity` more units under `limit`.
    pub fn assert_quota(
        &self,
        storage: &dyn Storage,
        address: &Addr,
        quantity: u32,
        limit: u32,
    ) -> Result<(), LedgerError> {
        let minted = self.minted_by(storage, address)?;
        if minted.checked_add(quantity).map_or(true, |n| n > limit) {
            return Err(LedgerError::MintLimitReached {});
        }
        Ok(())
    }

    /// Commits a quota-bearing mint: total and per-address counters move
    /// together. Checks must already have passed.
    pub fn commit_mint(
        &self,
        storage: &mut dyn Storage,
        address: &Addr,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        let total = self.total_minted(storage)?;
        self.total_minted.save(storage, &(total + quantity))?;
        let minted = self.minted_by(storage, address)?;
        self.mint_counts
            .save(storage, address.clone(), &(minted + quantity))?;
        Ok(())
    }

    /// Commits an airdrop: total supply only, no quota consumed.
    pub fn commit_airdrop(
        &self,
        storage: &mut dyn Storage,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        let total = self.total_minted(storage)?;
        self.total_minted.save(storage, &(total + quantity))?;
        Ok(())
    }
}
