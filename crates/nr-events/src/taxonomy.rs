//! Shared vocabulary carried inside events
//!
//! Plain data types only. Symbols cross this boundary as raw `u8` catalog
//! indices so presentation can map them to textures without this crate
//! depending on the engine.

use serde::{Deserialize, Serialize};

/// A single winning payline, as reported to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWinInfo {
    /// Payline index (0-based)
    pub line_index: u8,
    /// Payout in credits
    pub payout: u64,
    /// True for the all-WILD full-line jackpot
    pub is_jackpot: bool,
    /// Matched symbol count (3..=5)
    pub match_length: u8,
    /// Reel index the match starts on (0..=2)
    pub start_reel: u8,
}

/// Which banner the presentation layer should show for a settled spin.
///
/// A scatter bonus takes precedence over the ordinary win banner even when
/// paylines also won; the payline credit is applied regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    /// Nothing to celebrate
    None,
    /// Ordinary payline win
    Win,
    /// All-WILD full-line jackpot
    Jackpot,
    /// Scatter threshold met, bonus spins awarded
    Bonus,
    /// Scatter count above the mega threshold
    MegaBonus,
}

/// Why auto-spin stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoStopReason {
    /// Player toggled it off
    Toggled,
    /// Configured spin limit exhausted
    LimitReached,
    /// Balance below bet with no bonus spins left
    OutOfBalance,
}
