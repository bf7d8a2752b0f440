//! Engine errors
//!
//! Nothing here unwinds state. A [`SpinRejection`] is a guarded no-op at
//! the point of request; a [`ConfigError`] is caught once at construction.

use thiserror::Error;

/// Why a spin request was not started. Always safely retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinRejection {
    /// A spin is already in flight; the request is ignored.
    #[error("spin already in progress")]
    SpinInProgress,

    /// No bonus spins and balance below the bet.
    #[error("insufficient balance for bet")]
    InsufficientBalance,
}

/// Invalid injected configuration, detected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one reel and one row")]
    EmptyGrid,

    #[error("bet bounds invalid: min {min} > max {max}")]
    BetBounds { min: u64, max: u64 },

    #[error("default bet {bet} outside [{min}, {max}]")]
    DefaultBet { bet: u64, min: u64, max: u64 },

    #[error("no paylines configured")]
    NoPaylines,

    #[error("payline {index} has width {width}, grid has {reels} reels")]
    PaylineWidth { index: u8, width: usize, reels: u8 },

    #[error("payline {index} references row {row}, grid has {rows} rows")]
    PaylineRow { index: u8, row: u8, rows: u8 },

    #[error("reel band {index} is empty")]
    EmptyBand { index: usize },

    #[error("invalid config JSON: {0}")]
    Json(String),
}
