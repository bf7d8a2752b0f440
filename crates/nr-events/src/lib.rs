//! # nr-events - NovaReels event layer
//!
//! The presentation boundary of the slot core. The engine never talks to a
//! renderer directly: it emits [`GameEvent`]s wrapped in timestamped
//! [`EventRecord`]s, and the presentation layer schedules its reel motion,
//! win banners and audio from those. Nothing in here re-derives game logic.
//!
//! ```text
//! nr-engine ──emit──▶ EventRecord { GameEvent, timestamp_ms } ──▶ EventSink
//! ```

pub mod event;
pub mod sink;
pub mod taxonomy;
pub mod timing;

pub use event::*;
pub use sink::*;
pub use taxonomy::*;
pub use timing::*;
