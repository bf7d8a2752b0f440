//! Timing profiles for event timestamps
//!
//! The core decides outcomes instantly; these profiles only control the
//! timestamps stamped onto emitted events so presentation can pace reel
//! stops and the outcome reveal. `Instant` collapses everything to a single
//! tick and drives the test suites.

use serde::{Deserialize, Serialize};

/// Named timing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay pacing
    Normal,
    /// Fast mode
    Turbo,
    /// Everything at t=0, for tests and headless simulation
    Instant,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Detailed timing configuration, all values in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub profile: TimingProfile,
    /// Time the first reel spins before stopping
    pub reel_spin_duration_ms: f64,
    /// Gap between consecutive reel stops
    pub reel_stop_interval_ms: f64,
    /// Delay between the last reel stop and the outcome event
    pub outcome_delay_ms: f64,
}

impl TimingConfig {
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_spin_duration_ms: 2000.0,
            reel_stop_interval_ms: 200.0,
            outcome_delay_ms: 150.0,
        }
    }

    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_spin_duration_ms: 500.0,
            reel_stop_interval_ms: 80.0,
            outcome_delay_ms: 50.0,
        }
    }

    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            reel_spin_duration_ms: 0.0,
            reel_stop_interval_ms: 0.0,
            outcome_delay_ms: 0.0,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Total time from spin start to the last reel stop.
    pub fn total_spin_duration(&self, reel_count: u8) -> f64 {
        self.reel_spin_duration_ms
            + (reel_count.saturating_sub(1)) as f64 * self.reel_stop_interval_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Monotonic timestamp generator for a single spin's event sequence.
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    current_ms: f64,
    config: TimingConfig,
}

impl TimestampGenerator {
    pub fn new(config: TimingConfig) -> Self {
        Self {
            current_ms: 0.0,
            config,
        }
    }

    /// Back to the start of a spin.
    pub fn reset(&mut self) {
        self.current_ms = 0.0;
    }

    pub fn current(&self) -> f64 {
        self.current_ms
    }

    /// Advance by a duration and return the new timestamp.
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(0.0);
        self.current_ms
    }

    /// Timestamp for reel `reel_index` stopping.
    pub fn reel_stop(&mut self, reel_index: u8) -> f64 {
        if reel_index == 0 {
            self.advance(self.config.reel_spin_duration_ms)
        } else {
            self.advance(self.config.reel_stop_interval_ms)
        }
    }

    /// Timestamp for the outcome reveal.
    pub fn outcome(&mut self) -> f64 {
        self.advance(self.config.outcome_delay_ms)
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}
