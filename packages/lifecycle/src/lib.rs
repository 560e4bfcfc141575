//! One-way reveal/seal guard over the metadata base location.
//!
//! While open, the owner may repoint the base URI (reveal). Sealing is
//! terminal: once sealed the base URI is frozen and no call can reopen
//! the contract.

use cosmwasm_std::{StdError, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

pub const SEALED_KEY: &str = "sealed";
pub const BASE_URI_KEY: &str = "base_uri";

#[derive(Error, Debug, PartialEq)]
pub enum LifecycleError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("contract is sealed")]
    ContractSealed {},
}

pub struct LifecycleState<'a> {
    pub sealed: Item<'a, bool>,
    pub base_uri: Item<'a, String>,
}

impl<'a> Default for LifecycleState<'a> {
    fn default() -> Self {
        LifecycleState {
            sealed: Item::new(SEALED_KEY),
            base_uri: Item::new(BASE_URI_KEY),
        }
    }
}

impl<'a> LifecycleState<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(
        &self,
        storage: &mut dyn Storage,
        base_uri: &str,
    ) -> Result<(), LifecycleError> {
        self.sealed.save(storage, &false)?;
        self.base_uri.save(storage, &base_uri.to_string())?;
        Ok(())
    }

    pub fn is_sealed(&self, storage: &dyn Storage) -> Result<bool, LifecycleError> {
        Ok(self.sealed.may_load(storage)?.unwrap_or(false))
    }

    pub fn error_if_sealed(&self, storage: &dyn Storage) -> Result<(), LifecycleError> {
        if self.is_sealed(storage)? {
            Err(LifecycleError::ContractSealed {})
        } else {
            Ok(())
        }
    }

    /// Repoints the base URI. Fails once the contract is sealed.
    pub fn reveal(&self, storage: &mut dyn Storage, base_uri: &str) -> Result<(), LifecycleError> {
        self.error_if_sealed(storage)?;
        self.base_uri.save(storage, &base_uri.to_string())?;
        Ok(())
    }

    /// Seals permanently. A second seal is an error, not a no-op.
    pub fn seal(&self, storage: &mut dyn Storage) -> Result<(), LifecycleError> {
        self.error_if_sealed(storage)?;
        self.sealed.save(storage, &true)?;
        Ok(())
    }

    pub fn base_uri(&self, storage: &dyn Storage) -> Result<String, LifecycleError> {
        Ok(self.base_uri.load(storage)?)
    }

    pub fn token_uri(
        &self,
        storage: &dyn Storage,
        token_id: &str,
    ) -> Result<String, LifecycleError> {
        let base_uri = self.base_uri(storage)?;
        Ok(format!("{}{}", base_uri, token_id))
    }
}
