//! Session-wide game constants.
//! Defaults reproduce the reference pricing, reward and timing rules; a page can
//! override any of them through an embedded JSON block.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Labels that unlock the guaranteed-win rule when all of them are committed.
pub const SPECIAL_NUMBERS: [u32; 6] = [6, 16, 26, 36, 46, 56];

/// Price of one cell as an exact fraction of currency units.
/// The denominator can never be zero, including when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUnitPrice")]
pub struct UnitPrice {
    numerator: u64,
    denominator: NonZeroU64,
}

#[derive(Deserialize)]
struct RawUnitPrice {
    numerator: u64,
    denominator: u64,
}

impl TryFrom<RawUnitPrice> for UnitPrice {
    type Error = GameError;

    fn try_from(raw: RawUnitPrice) -> Result<Self, GameError> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl UnitPrice {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, GameError> {
        let denominator = NonZeroU64::new(denominator)
            .ok_or(GameError::InvalidConfig("unit_price denominator must be positive"))?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> NonZeroU64 {
        self.denominator
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }
}

impl Default for UnitPrice {
    fn default() -> Self {
        // 640 for the full board of 64 cells.
        Self {
            numerator: 640,
            denominator: NonZeroU64::new(64).unwrap_or(NonZeroU64::MIN),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawTiming {
    /// Interval between rolling-number ticks.
    pub tick_ms: u32,
    /// Number of cosmetic ticks before the winner is picked.
    pub ticks: u32,
    /// Pause between revealing the winner and applying rewards.
    pub reveal_delay_ms: u32,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            tick_ms: 60,
            ticks: 30,
            reveal_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_cells: usize,
    pub unit_price: UnitPrice,
    pub direct_purchase_price: u64,
    pub win_bonus: u64,
    pub loss_points_base: u64,
    pub loss_points_per_cell: u64,
    pub draw: DrawTiming,
    /// How long a notice stays on screen.
    pub notice_ms: u32,
    /// `EnvFilter` directive for the console logger.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_cells: 64,
            unit_price: UnitPrice::default(),
            direct_purchase_price: 640,
            win_bonus: 1000,
            loss_points_base: 10,
            loss_points_per_cell: 10,
            draw: DrawTiming::default(),
            notice_ms: 3000,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Parses a (possibly partial) JSON override; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        let cfg: GameConfig =
            serde_json::from_str(raw).map_err(|_| GameError::InvalidConfig("malformed json"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.total_cells == 0 {
            return Err(GameError::InvalidConfig("total_cells must be positive"));
        }
        if !self.unit_price.is_positive() {
            return Err(GameError::InvalidConfig("unit_price must be positive"));
        }
        Ok(())
    }

    /// Points awarded for a losing draw of `committed` cells.
    pub fn loss_points(&self, committed: usize) -> u64 {
        self.loss_points_base
            .saturating_add(self.loss_points_per_cell.saturating_mul(committed as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.total_cells, 64);
        assert_eq!(cfg.unit_price, UnitPrice::new(640, 64).unwrap());
        assert_eq!(cfg.draw.ticks, 30);
        assert_eq!(cfg.draw.reveal_delay_ms, 500);
        assert_eq!(cfg.loss_points(7), 80);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"win_bonus": 50, "draw": {"ticks": 3}}"#).unwrap();
        assert_eq!(cfg.win_bonus, 50);
        assert_eq!(cfg.draw.ticks, 3);
        assert_eq!(cfg.draw.tick_ms, 60);
        assert_eq!(cfg.total_cells, 64);
    }

    #[test]
    fn rejects_zero_price_and_garbage() {
        let zero = r#"{"unit_price": {"numerator": 0, "denominator": 1}}"#;
        assert!(matches!(GameConfig::from_json(zero), Err(GameError::InvalidConfig(_))));
        assert!(GameConfig::from_json("{not json").is_err());
        assert!(GameConfig::from_json(r#"{"total_cells": 0}"#).is_err());
    }

    #[test]
    fn zero_denominator_cannot_be_built() {
        assert_eq!(
            UnitPrice::new(640, 0),
            Err(GameError::InvalidConfig("unit_price denominator must be positive"))
        );
        let zero_den = r#"{"unit_price": {"numerator": 640, "denominator": 0}}"#;
        assert!(matches!(GameConfig::from_json(zero_den), Err(GameError::InvalidConfig(_))));
    }
}
