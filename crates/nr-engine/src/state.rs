//! Spin / bet / bonus state machine
//!
//! `SlotMachine` is the single writer of all monetary state. A spin is a
//! two-phase protocol: [`SlotMachine::request_spin`] validates, debits and
//! decides the grid (emitting `SpinStart` and the reel stops); the separate
//! [`SlotMachine::settle`] call evaluates it exactly once, applies payouts
//! and emits `Outcome`. `running` enforces one spin in flight; rejected
//! requests mutate nothing.

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use nr_events::{
    Banner, EventRecord, EventSink, GameEvent, LineWinInfo, TimestampGenerator,
};

use crate::config::GameConfig;
use crate::error::{ConfigError, SpinRejection};
use crate::evaluate::{evaluate, LineWin};
use crate::reels::{Grid, ReelSet};
use crate::stats::SessionStats;
use crate::symbols::{SymbolCatalog, SymbolId};

/// Shared handle to the presentation sink.
pub type SharedSink = Arc<Mutex<dyn EventSink>>;

/// The settled result of one spin, as applied to game state.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub wins: Vec<LineWin>,
    pub scatter_count: u8,
    pub bonus_spins_awarded: u32,
    /// Total payline payout credited this spin
    pub total_payout: u64,
    pub banner: Banner,
    /// Balance after the credit
    pub balance: u64,
    /// Cumulative session win after the credit
    pub session_win: u64,
    /// True when the spin consumed a bonus spin
    pub bonus_spin: bool,
}

struct PendingSpin {
    grid: Grid,
    bet: u64,
    bonus_spin: bool,
}

/// The slot machine core: balance, bet, bonus counter and one optional
/// spin in flight.
pub struct SlotMachine {
    config: GameConfig,
    reels: ReelSet,
    balance: u64,
    bet: u64,
    bonus_spins: u32,
    session_win: u64,
    running: bool,
    pending: Option<PendingSpin>,
    stats: SessionStats,
    timestamps: TimestampGenerator,
    sink: SharedSink,
}

impl SlotMachine {
    /// Build a machine from validated configuration.
    pub fn new(config: GameConfig, sink: SharedSink) -> Result<Self, ConfigError> {
        config.validate()?;
        let reels = ReelSet::new(
            SymbolCatalog::standard(),
            config.grid,
            config.draw.clone(),
        );
        let timestamps = TimestampGenerator::new(config.timing.clone());
        Ok(Self {
            balance: config.starting_balance,
            bet: config.default_bet,
            bonus_spins: 0,
            session_win: 0,
            running: false,
            pending: None,
            stats: SessionStats::default(),
            reels,
            timestamps,
            config,
            sink,
        })
    }

    /// Reseed the reels for a reproducible session.
    pub fn seed(&mut self, seed: u64) {
        self.reels.seed(seed);
    }

    // ── accessors ──────────────────────────────────────────────────────

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn bonus_spins(&self) -> u32 {
        self.bonus_spins
    }

    pub fn session_win(&self) -> u64 {
        self.session_win
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Stable symbol view of the last settled spin.
    pub fn symbol_at(&self, reel: usize, row: usize) -> Option<SymbolId> {
        self.reels.symbol_at(reel, row)
    }

    /// Can a spin start right now, ignoring `running`?
    pub fn can_afford_spin(&self) -> bool {
        self.bonus_spins > 0 || self.balance >= self.bet
    }

    // ── bet state machine ──────────────────────────────────────────────

    /// Adjust the bet by a signed delta, clamped into bounds. Ignored
    /// while a spin is in flight.
    pub fn adjust_bet(&mut self, delta: i64) -> u64 {
        if self.running {
            return self.bet;
        }
        let raw = self.bet.saturating_add_signed(delta);
        self.apply_bet(raw)
    }

    /// Set the bet directly, clamped into bounds. Ignored while a spin is
    /// in flight.
    pub fn set_bet(&mut self, value: u64) -> u64 {
        if self.running {
            return self.bet;
        }
        self.apply_bet(value)
    }

    fn apply_bet(&mut self, raw: u64) -> u64 {
        let clamped = self.config.clamp_bet(raw);
        if clamped != self.bet {
            self.bet = clamped;
            debug!("bet set to {}", self.bet);
            let ts = self.timestamps.current();
            self.emit(GameEvent::BetChanged { bet: self.bet }, ts);
        }
        self.bet
    }

    // ── spin state machine ─────────────────────────────────────────────

    /// Phase one: validate, debit, decide the grid. Emits `SpinStart` and
    /// one `ReelStop` per reel. Rejections leave every field untouched.
    pub fn request_spin(&mut self) -> Result<(), SpinRejection> {
        if self.running {
            return Err(SpinRejection::SpinInProgress);
        }
        let bonus_spin = self.bonus_spins > 0;
        if !bonus_spin && self.balance < self.bet {
            return Err(SpinRejection::InsufficientBalance);
        }

        if bonus_spin {
            self.bonus_spins -= 1;
        } else {
            self.balance -= self.bet;
        }
        self.running = true;
        self.timestamps.reset();

        let grid = self.reels.spin();
        debug!(
            "spin started (bonus={}, bet={}, balance={})",
            bonus_spin, self.bet, self.balance
        );

        let start_ts = self.timestamps.current();
        self.emit(
            GameEvent::SpinStart {
                grid: grid.to_raw(),
                bonus_spin,
                bet: self.bet,
            },
            start_ts,
        );
        for reel in 0..grid.reels() {
            let ts = self.timestamps.reel_stop(reel as u8);
            let symbols = grid
                .column(reel)
                .map(|c| c.iter().map(|s| s.0).collect())
                .unwrap_or_default();
            self.emit(
                GameEvent::ReelStop {
                    reel_index: reel as u8,
                    symbols,
                },
                ts,
            );
        }

        self.pending = Some(PendingSpin {
            grid,
            bet: self.bet,
            bonus_spin,
        });
        Ok(())
    }

    /// Phase two: evaluate the pending grid, apply payouts and bonus
    /// awards, emit `Outcome`. Returns `None` when no spin is pending, so
    /// a duplicate "grid ready" signal is harmless.
    pub fn settle(&mut self) -> Option<SpinOutcome> {
        let pending = self.pending.take()?;
        let catalog = self.reels.catalog().clone();
        let eval = evaluate(
            &pending.grid,
            &self.config.paylines,
            &self.config.paytable,
            &catalog,
            pending.bet,
        );

        // Scatter award and payline credit are independent; both apply.
        self.bonus_spins += eval.bonus_spins_awarded;
        self.balance += eval.total_payout;
        self.session_win += eval.total_payout;
        self.running = false;

        let banner = if eval.bonus_spins_awarded > 0 {
            if self.config.paytable.scatter.is_mega(eval.scatter_count) {
                Banner::MegaBonus
            } else {
                Banner::Bonus
            }
        } else if eval.has_jackpot() {
            Banner::Jackpot
        } else if eval.is_win() {
            Banner::Win
        } else {
            Banner::None
        };

        let debit = if pending.bonus_spin { 0 } else { pending.bet };
        self.stats.record(
            debit,
            eval.total_payout,
            eval.has_jackpot(),
            eval.bonus_spins_awarded > 0,
        );

        if eval.total_payout > 0 || eval.bonus_spins_awarded > 0 {
            info!(
                "spin settled: payout={} scatters={} bonus_awarded={} balance={}",
                eval.total_payout, eval.scatter_count, eval.bonus_spins_awarded, self.balance
            );
        }

        let outcome = SpinOutcome {
            wins: eval.wins,
            scatter_count: eval.scatter_count,
            bonus_spins_awarded: eval.bonus_spins_awarded,
            total_payout: eval.total_payout,
            banner,
            balance: self.balance,
            session_win: self.session_win,
            bonus_spin: pending.bonus_spin,
        };

        let ts = self.timestamps.outcome();
        self.emit(
            GameEvent::Outcome {
                wins: outcome.wins.iter().map(line_win_info).collect(),
                scatter_count: outcome.scatter_count,
                bonus_spins_awarded: outcome.bonus_spins_awarded,
                total_payout: outcome.total_payout,
                balance: outcome.balance,
                session_win: outcome.session_win,
                banner: outcome.banner,
            },
            ts,
        );

        Some(outcome)
    }

    pub(crate) fn emit(&self, event: GameEvent, timestamp_ms: f64) {
        self.sink.lock().emit(EventRecord::new(event, timestamp_ms));
    }

    /// Emit at the current spin-relative timestamp.
    pub(crate) fn emit_now(&self, event: GameEvent) {
        self.emit(event, self.timestamps.current());
    }

    pub(crate) fn sink(&self) -> SharedSink {
        Arc::clone(&self.sink)
    }
}

fn line_win_info(win: &LineWin) -> LineWinInfo {
    LineWinInfo {
        line_index: win.line_index,
        payout: win.payout,
        is_jackpot: win.is_jackpot,
        match_length: win.match_length,
        start_reel: win.start_reel,
    }
}
