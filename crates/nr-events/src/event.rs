//! GameEvent - the canonical moments of a spin's lifecycle
//!
//! An event is the semantic meaning of a moment, not an animation. The
//! presentation layer decides how each one looks and sounds.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{AutoStopReason, Banner, LineWinInfo};

/// Canonical game event emitted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A spin was accepted: the final grid is already decided, presentation
    /// animates toward it. Columns are reels, rows top-to-bottom.
    SpinStart {
        grid: Vec<Vec<u8>>,
        /// True when the spin consumed a bonus spin instead of balance
        bonus_spin: bool,
        /// Bet locked in for this spin
        bet: u64,
    },

    /// A reel's final symbols are revealed (top to bottom).
    ReelStop { reel_index: u8, symbols: Vec<u8> },

    /// The spin settled: wins, scatter result and mutated balances.
    Outcome {
        wins: Vec<LineWinInfo>,
        scatter_count: u8,
        bonus_spins_awarded: u32,
        /// Sum of all line payouts credited this spin
        total_payout: u64,
        balance: u64,
        /// Cumulative win over the session
        session_win: u64,
        banner: Banner,
    },

    /// Bet amount changed (already clamped into bounds).
    BetChanged { bet: u64 },

    /// Auto-spin activated. `remaining` is `None` for an unbounded run.
    AutoSpinStarted { remaining: Option<u32> },

    /// Auto-spin deactivated.
    AutoSpinStopped { reason: AutoStopReason },
}

impl GameEvent {
    /// Stable type name, handy for logs and routing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SpinStart { .. } => "SPIN_START",
            Self::ReelStop { .. } => "REEL_STOP",
            Self::Outcome { .. } => "OUTCOME",
            Self::BetChanged { .. } => "BET_CHANGED",
            Self::AutoSpinStarted { .. } => "AUTO_SPIN_STARTED",
            Self::AutoSpinStopped { .. } => "AUTO_SPIN_STOPPED",
        }
    }
}

/// An event plus the presentation timestamp it should fire at, in
/// milliseconds from the start of the spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: GameEvent,
    pub timestamp_ms: f64,
}

impl EventRecord {
    pub fn new(event: GameEvent, timestamp_ms: f64) -> Self {
        Self {
            event,
            timestamp_ms,
        }
    }
}
