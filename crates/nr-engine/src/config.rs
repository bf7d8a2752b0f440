//! Game configuration
//!
//! One `GameConfig` is injected at construction and validated once; spin
//! logic never re-checks it. Round-trips through JSON so a deployment can
//! pin the exact table a session ran with.

use serde::{Deserialize, Serialize};

use nr_events::TimingConfig;

use crate::error::ConfigError;
use crate::paylines::{standard_5_paylines, Payline};
use crate::paytable::Paytable;
use crate::reels::DrawMode;

/// Grid dimensions: reels (columns) × visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub reels: u8,
    pub rows: u8,
}

impl GridSpec {
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

/// Auto-spin behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSpinConfig {
    /// Spins per activation; `None` runs until toggled off or out of
    /// balance.
    pub limit: Option<u32>,
    /// Delay between a settled spin and the next automatic request
    pub delay_ms: u64,
}

impl Default for AutoSpinConfig {
    fn default() -> Self {
        Self {
            limit: None,
            delay_ms: 1500,
        }
    }
}

/// Complete static configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: GridSpec,
    /// Opening balance in credits
    pub starting_balance: u64,
    /// Bet the session opens with
    pub default_bet: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    /// Step used by the +/- bet buttons
    pub bet_step: u64,
    pub paytable: Paytable,
    pub paylines: Vec<Payline>,
    pub draw: DrawMode,
    pub auto_spin: AutoSpinConfig,
    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::standard_5x3(),
            starting_balance: 1000,
            default_bet: 100,
            min_bet: 10,
            max_bet: 1_000_000_000,
            bet_step: 10,
            paytable: Paytable::default(),
            paylines: standard_5_paylines(),
            draw: DrawMode::Uniform,
            auto_spin: AutoSpinConfig::default(),
            timing: TimingConfig::normal(),
        }
    }
}

impl GameConfig {
    /// Instant timing, for tests and headless simulation.
    pub fn instant() -> Self {
        Self {
            timing: TimingConfig::instant(),
            auto_spin: AutoSpinConfig {
                limit: None,
                delay_ms: 0,
            },
            ..Self::default()
        }
    }

    /// Check the configuration once, up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.reels == 0 || self.grid.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.min_bet > self.max_bet {
            return Err(ConfigError::BetBounds {
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if self.default_bet < self.min_bet || self.default_bet > self.max_bet {
            return Err(ConfigError::DefaultBet {
                bet: self.default_bet,
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if self.paylines.is_empty() {
            return Err(ConfigError::NoPaylines);
        }
        for line in &self.paylines {
            if line.width() != self.grid.reels as usize {
                return Err(ConfigError::PaylineWidth {
                    index: line.index,
                    width: line.width(),
                    reels: self.grid.reels,
                });
            }
            if let Some(&row) = line.rows.iter().find(|&&r| r >= self.grid.rows) {
                return Err(ConfigError::PaylineRow {
                    index: line.index,
                    row,
                    rows: self.grid.rows,
                });
            }
        }
        if let DrawMode::Bands { bands } = &self.draw {
            if bands.is_empty() {
                return Err(ConfigError::EmptyBand { index: 0 });
            }
            if let Some(index) = bands.iter().position(|b| b.is_empty()) {
                return Err(ConfigError::EmptyBand { index });
            }
        }
        Ok(())
    }

    /// Clamp a bet into the configured bounds.
    pub fn clamp_bet(&self, bet: u64) -> u64 {
        bet.clamp(self.min_bet, self.max_bet)
    }

    /// Export as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Import from JSON, validating the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
