//! Auto-spin controller
//!
//! Tracks whether auto-spin is active, how many spins remain, and which
//! activation any scheduled continuation belongs to. Each activation bumps
//! a generation counter; a continuation scheduled under an older generation
//! is stale and must not fire. The controller never touches money or reels,
//! it only answers "should another spin start".

use crate::config::AutoSpinConfig;

#[derive(Debug)]
pub struct AutoSpinController {
    config: AutoSpinConfig,
    active: bool,
    /// Spins left in this activation; `None` means unbounded.
    remaining: Option<u32>,
    generation: u64,
}

impl AutoSpinController {
    pub fn new(config: AutoSpinConfig) -> Self {
        Self {
            config,
            active: false,
            remaining: None,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Generation of the current activation. Continuations carry this and
    /// are checked against it when they fire.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay_ms(&self) -> u64 {
        self.config.delay_ms
    }

    /// Flip auto-spin. Returns the new active state. Activation resets the
    /// remaining counter from config and invalidates old continuations.
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.deactivate();
        } else {
            self.generation += 1;
            self.remaining = self.config.limit;
            self.active = true;
        }
        self.active
    }

    /// Stop auto-spin without touching the generation; any in-flight
    /// continuation is already invalidated by `active` going false.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.remaining = None;
    }

    /// Claim one spin from this activation. A limit of N yields exactly N
    /// `true` answers; the N+1th deactivates and returns `false`.
    pub fn try_consume(&mut self) -> bool {
        if !self.active {
            return false;
        }
        match self.remaining {
            None => true,
            Some(0) => {
                self.deactivate();
                false
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                true
            }
        }
    }

    /// Is a continuation scheduled under `generation` still the live one?
    pub fn is_current(&self, generation: u64) -> bool {
        self.active && generation == self.generation
    }
}
