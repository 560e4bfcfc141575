use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};

use crate::error::ContractError;

/// Dutch auction price schedule. The price starts at `start_price`, drops
/// by `drop_per_step` every `drop_interval` seconds and reaches exactly
/// `end_price` at `start_time + curve_length`.
#[cw_serde]
pub struct AuctionSchedule {
    pub start_time: Timestamp,
    pub start_price: Uint128,
    pub end_price: Uint128,
    /// Length of the dropping phase in seconds.
    pub curve_length: u64,
    /// Seconds between two price drops.
    pub drop_interval: u64,
    pub drop_per_step: Uint128,
}

impl AuctionSchedule {
    /// The schedule must decay from `start_price` to exactly `end_price`
    /// over `curve_length / drop_interval` whole steps.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.drop_interval == 0
            || self.curve_length == 0
            || self.curve_length % self.drop_interval != 0
        {
            return Err(ContractError::InvalidAuctionSchedule {});
        }
        if self.start_price < self.end_price {
            return Err(ContractError::InvalidAuctionSchedule {});
        }
        let steps_to_floor = Uint128::from(self.curve_length / self.drop_interval);
        let total_drop = self
            .drop_per_step
            .checked_mul(steps_to_floor)
            .map_err(|_| ContractError::InvalidAuctionSchedule {})?;
        if total_drop != self.start_price - self.end_price {
            return Err(ContractError::InvalidAuctionSchedule {});
        }
        Ok(())
    }

    /// Unit price at the injected clock reading. Non-increasing step
    /// function of `now`, `start_price` before the auction starts,
    /// floored at `end_price` once the curve has run out.
    pub fn current_price(&self, now: Timestamp) -> Uint128 {
        if now <= self.start_time {
            return self.start_price;
        }
        let elapsed = now.seconds() - self.start_time.seconds();
        if elapsed >= self.curve_length {
            return self.end_price;
        }
        let steps = Uint128::from(elapsed / self.drop_interval);
        let drop = self
            .drop_per_step
            .checked_mul(steps)
            .unwrap_or(self.start_price);
        self.start_price
            .checked_sub(drop)
            .unwrap_or(self.end_price)
            .max(self.end_price)
    }
}
