//! # nr-engine - NovaReels outcome and payout engine
//!
//! The auditable core of a 5×3 reel slot game: everything that decides what
//! a spin is worth, independent of how it is drawn on screen.
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     │
//!     ├── SlotMachine (balance, bet, bonus spins, one spin in flight)
//!     │       ├── ReelSet (seedable column draws)
//!     │       ├── evaluate() (paylines + wilds + scatter)
//!     │       └── Paytable (pure payout math)
//!     ├── AutoSpinController (toggle, remaining, cancellation generation)
//!     └── Scheduler (settle delay, auto-spin delay - one task queue)
//!             │
//!             v
//!     EventRecord → EventSink (presentation)
//! ```
//!
//! Outcomes are a pure function of (seed, config): re-running a seeded
//! session reproduces every grid, win and balance mutation.

pub mod autospin;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod paylines;
pub mod paytable;
pub mod reels;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod stats;
pub mod symbols;

pub use autospin::*;
pub use config::*;
pub use error::*;
pub use evaluate::*;
pub use paylines::*;
pub use paytable::*;
pub use reels::*;
pub use scheduler::*;
pub use session::*;
pub use state::*;
pub use stats::*;
pub use symbols::*;
