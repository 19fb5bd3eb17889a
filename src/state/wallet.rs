use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::UserProfile;
use crate::error::GameError;

/// Balance and loyalty points. Every operation applies fully or not at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: u64,
    pub points: u64,
}

impl Wallet {
    #[cfg(test)]
    pub fn new(balance: u64) -> Self {
        Self { balance, points: 0 }
    }

    pub fn credit(&mut self, amount: u64) -> Result<u64, GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount);
        }
        self.balance = self.balance.saturating_add(amount);
        debug!(amount, balance = self.balance, "wallet credit");
        Ok(self.balance)
    }

    pub fn debit(&mut self, amount: u64) -> Result<u64, GameError> {
        if amount > self.balance {
            warn!(amount, balance = self.balance, "debit rejected");
            return Err(GameError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        debug!(amount, balance = self.balance, "wallet debit");
        Ok(self.balance)
    }

    pub fn add_points(&mut self, amount: u64) -> u64 {
        self.points = self.points.saturating_add(amount);
        self.points
    }

    /// Credits a top-up, which is only open to registered players.
    pub fn recharge(
        &mut self,
        profile: Option<&UserProfile>,
        amount: u64,
    ) -> Result<u64, GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount);
        }
        if profile.is_none() {
            return Err(GameError::RegistrationRequired);
        }
        self.credit(amount)
    }

    pub fn purchase_at_fixed_price(&mut self, price: u64) -> Result<u64, GameError> {
        self.debit(price)
    }
}
