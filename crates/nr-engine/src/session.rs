//! Game session - machine, auto-spin and scheduling wired together
//!
//! `GameSession` is the embedding surface. A host (UI shell, simulator,
//! test) pushes player intents in and drives virtual time forward; the
//! session turns those into spins, settlements and auto-spin continuations
//! through the [`Scheduler`]. Settlement is scheduled for the moment the
//! last reel would visually stop plus the outcome delay, and a host that
//! animates reels itself can call [`GameSession::notify_grid_settled`] to
//! settle early; the still-queued settle task then finds nothing pending.

use log::{debug, info};

use nr_events::{AutoStopReason, GameEvent};

use crate::autospin::AutoSpinController;
use crate::config::GameConfig;
use crate::error::{ConfigError, SpinRejection};
use crate::scheduler::{Scheduler, Task};
use crate::state::{SharedSink, SlotMachine, SpinOutcome};

pub struct GameSession {
    machine: SlotMachine,
    controller: AutoSpinController,
    scheduler: Scheduler,
}

impl GameSession {
    pub fn new(config: GameConfig, sink: SharedSink) -> Result<Self, ConfigError> {
        let controller = AutoSpinController::new(config.auto_spin);
        let machine = SlotMachine::new(config, sink)?;
        Ok(Self {
            machine,
            controller,
            scheduler: Scheduler::new(),
        })
    }

    /// Reseed the reels for a reproducible session.
    pub fn seed(&mut self, seed: u64) {
        self.machine.seed(seed);
    }

    pub fn machine(&self) -> &SlotMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut SlotMachine {
        &mut self.machine
    }

    pub fn auto_spin_active(&self) -> bool {
        self.controller.is_active()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    // ── player intents ─────────────────────────────────────────────────

    /// The spin button. Starts a spin and queues its settlement.
    pub fn spin_button(&mut self) -> Result<(), SpinRejection> {
        self.machine.request_spin()?;
        self.schedule_settle();
        Ok(())
    }

    pub fn adjust_bet(&mut self, delta: i64) -> u64 {
        self.machine.adjust_bet(delta)
    }

    pub fn set_bet(&mut self, value: u64) -> u64 {
        self.machine.set_bet(value)
    }

    /// The auto-spin button. Activation starts the first spin immediately
    /// (or after the current spin settles, if one is in flight).
    pub fn toggle_auto_spin(&mut self) {
        if self.controller.toggle() {
            info!("auto-spin on (limit: {:?})", self.controller.remaining());
            self.machine.emit_now(GameEvent::AutoSpinStarted {
                remaining: self.controller.remaining(),
            });
            if !self.machine.is_running() {
                self.attempt_auto_spin();
            }
        } else {
            self.stop_auto_spin(AutoStopReason::Toggled);
        }
    }

    /// A host that animates reels itself reports the grid visually settled;
    /// the outcome is applied now instead of at the scheduled time.
    pub fn notify_grid_settled(&mut self) -> Option<SpinOutcome> {
        let outcome = self.machine.settle()?;
        self.after_settle();
        Some(outcome)
    }

    // ── time ───────────────────────────────────────────────────────────

    /// Run every task due at or before `now_ms`, in due order.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            self.run(task);
        }
        self.scheduler.advance_clock(now_ms);
    }

    /// Drain the queue completely. With a bounded (or inactive) auto-spin
    /// this terminates once everything due has run.
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.scheduler.next_due_ms() {
            self.advance_to(due);
        }
    }

    // ── internals ──────────────────────────────────────────────────────

    fn run(&mut self, task: Task) {
        match task {
            Task::Settle => {
                // None here means the host already settled via
                // notify_grid_settled.
                if self.machine.settle().is_some() {
                    self.after_settle();
                }
            }
            Task::AutoSpinContinue { generation } => {
                if self.controller.is_current(generation) {
                    self.attempt_auto_spin();
                } else {
                    debug!("dropping stale auto-spin continuation");
                }
            }
        }
    }

    fn after_settle(&mut self) {
        if self.controller.is_active() {
            self.scheduler.schedule_in(
                self.controller.delay_ms(),
                Task::AutoSpinContinue {
                    generation: self.controller.generation(),
                },
            );
        }
    }

    fn attempt_auto_spin(&mut self) {
        if !self.controller.is_active() {
            return;
        }
        if self.machine.is_running() {
            // The running spin's settlement schedules the next
            // continuation; nothing is consumed from the limit here.
            debug!("auto-spin deferred, spin in flight");
            return;
        }
        if !self.machine.can_afford_spin() {
            self.controller.deactivate();
            self.stop_auto_spin(AutoStopReason::OutOfBalance);
            return;
        }
        if !self.controller.try_consume() {
            // try_consume deactivated on exhaustion
            self.stop_auto_spin(AutoStopReason::LimitReached);
            return;
        }
        match self.machine.request_spin() {
            Ok(()) => self.schedule_settle(),
            Err(SpinRejection::SpinInProgress) => {
                debug!("auto-spin raced a manual spin, deferring");
            }
            Err(SpinRejection::InsufficientBalance) => {
                self.controller.deactivate();
                self.stop_auto_spin(AutoStopReason::OutOfBalance);
            }
        }
    }

    fn stop_auto_spin(&mut self, reason: AutoStopReason) {
        info!("auto-spin off ({reason:?})");
        self.machine
            .emit_now(GameEvent::AutoSpinStopped { reason });
    }

    fn schedule_settle(&mut self) {
        let timing = &self.machine.config().timing;
        let reels = self.machine.config().grid.reels;
        let delay =
            (timing.total_spin_duration(reels) + timing.outcome_delay_ms).ceil() as u64;
        self.scheduler.schedule_in(delay, Task::Settle);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use nr_events::{CollectingSink, EventRecord};

    use super::*;

    fn session_with(config: GameConfig) -> (GameSession, Arc<Mutex<CollectingSink>>) {
        let sink = Arc::new(Mutex::new(CollectingSink::new()));
        let session = GameSession::new(config, sink.clone()).unwrap();
        (session, sink)
    }

    fn session() -> (GameSession, Arc<Mutex<CollectingSink>>) {
        session_with(GameConfig::instant())
    }

    fn count_spin_starts(records: &[EventRecord]) -> usize {
        records
            .iter()
            .filter(|r| matches!(r.event, GameEvent::SpinStart { .. }))
            .count()
    }

    fn stop_reasons(records: &[EventRecord]) -> Vec<AutoStopReason> {
        records
            .iter()
            .filter_map(|r| match r.event {
                GameEvent::AutoSpinStopped { reason } => Some(reason),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_manual_spin_settles_at_scheduled_time() {
        let mut config = GameConfig::default();
        config.timing = nr_events::TimingConfig::turbo();
        let (mut session, sink) = session_with(config);
        session.seed(1);

        session.spin_button().unwrap();
        assert!(session.machine().is_running());

        // 500 + 4*80 + 50 = 870ms
        session.advance_to(869);
        assert!(session.machine().is_running());
        session.advance_to(870);
        assert!(!session.machine().is_running());

        let sink = sink.lock();
        assert!(matches!(
            sink.records().last().unwrap().event,
            GameEvent::Outcome { .. }
        ));
    }

    #[test]
    fn test_second_spin_press_rejected_while_running() {
        let (mut session, _sink) = session();
        session.seed(2);
        session.spin_button().unwrap();
        assert_eq!(session.spin_button(), Err(SpinRejection::SpinInProgress));
        session.run_until_idle();
        assert!(session.spin_button().is_ok());
        session.run_until_idle();
    }

    #[test]
    fn test_host_settle_beats_scheduled_settle() {
        let (mut session, sink) = session();
        session.seed(3);
        session.spin_button().unwrap();

        let outcome = session.notify_grid_settled().unwrap();
        assert!(!session.machine().is_running());

        // The queued settle task must not double-apply.
        let balance = session.machine().balance();
        session.run_until_idle();
        assert_eq!(session.machine().balance(), balance);
        assert_eq!(balance, outcome.balance);

        let sink = sink.lock();
        let outcomes = sink
            .records()
            .iter()
            .filter(|r| matches!(r.event, GameEvent::Outcome { .. }))
            .count();
        assert_eq!(outcomes, 1);
    }

    #[test]
    fn test_auto_spin_limit_runs_exactly_n_spins() {
        let mut config = GameConfig::instant();
        config.auto_spin.limit = Some(3);
        // Keep the balance high enough that the limit is what stops it.
        config.starting_balance = 1_000_000;
        let (mut session, sink) = session_with(config);
        session.seed(4);

        session.toggle_auto_spin();
        session.run_until_idle();

        let sink = sink.lock();
        assert_eq!(count_spin_starts(sink.records()), 3);
        assert_eq!(stop_reasons(sink.records()), vec![AutoStopReason::LimitReached]);
        assert!(!session.auto_spin_active());
    }

    #[test]
    fn test_auto_spin_stops_when_balance_runs_out() {
        let mut config = GameConfig::instant();
        config.starting_balance = 250;
        config.default_bet = 100;
        let (mut session, sink) = session_with(config);
        session.seed(1234);

        // Wins can stretch the run, so drain with a generous bound instead
        // of run_until_idle.
        session.toggle_auto_spin();
        for _ in 0..10_000 {
            if session.scheduler.is_idle() {
                break;
            }
            let due = session.scheduler.next_due_ms().unwrap();
            session.advance_to(due);
        }

        assert!(!session.auto_spin_active());
        let sink = sink.lock();
        assert_eq!(stop_reasons(sink.records()), vec![AutoStopReason::OutOfBalance]);
        assert!(session.machine().balance() < session.machine().bet());
    }

    #[test]
    fn test_toggle_off_cancels_pending_continuation() {
        let mut config = GameConfig::instant();
        config.auto_spin.delay_ms = 100;
        config.starting_balance = 1_000_000;
        let (mut session, sink) = session_with(config);
        session.seed(5);

        session.toggle_auto_spin();
        // First spin settles at t=0; the continuation sits at t=100.
        session.advance_to(0);
        assert_eq!(count_spin_starts(sink.lock().records()), 1);

        session.toggle_auto_spin(); // off
        session.run_until_idle();

        let sink = sink.lock();
        assert_eq!(count_spin_starts(sink.records()), 1);
        assert_eq!(stop_reasons(sink.records()), vec![AutoStopReason::Toggled]);
    }

    #[test]
    fn test_rapid_retoggle_does_not_double_spin() {
        let mut config = GameConfig::instant();
        config.auto_spin.delay_ms = 100;
        config.auto_spin.limit = Some(1);
        config.starting_balance = 1_000_000;
        let (mut session, sink) = session_with(config);
        session.seed(6);

        session.toggle_auto_spin();
        session.advance_to(0); // spin 1 settles, continuation queued
        session.toggle_auto_spin(); // off: old generation now stale
        session.toggle_auto_spin(); // on: fresh limit, spins immediately

        session.run_until_idle();

        // One spin per activation, the stale continuation fires nothing
        // extra.
        let sink = sink.lock();
        assert_eq!(count_spin_starts(sink.records()), 2);
    }

    #[test]
    fn test_activation_during_manual_spin_waits_for_settle() {
        let mut config = GameConfig::instant();
        config.auto_spin.limit = Some(1);
        let (mut session, sink) = session_with(config);
        session.seed(7);

        session.spin_button().unwrap();
        session.toggle_auto_spin();
        // The manual spin is still pending; activation must not spin yet.
        assert_eq!(count_spin_starts(sink.lock().records()), 1);

        session.run_until_idle();
        // Manual settle chains into the single auto spin.
        let sink = sink.lock();
        assert_eq!(count_spin_starts(sink.records()), 2);
    }

    #[test]
    fn test_bonus_spins_keep_auto_spin_alive_without_balance() {
        use crate::reels::{DrawMode, ReelBand};
        use crate::symbols::SymbolId;

        // Guaranteed scatters everywhere: the first paid spin awards a pile
        // of bonus spins, after which the balance no longer gates play.
        let mut config = GameConfig::instant();
        config.starting_balance = 100;
        config.default_bet = 100;
        config.auto_spin.limit = Some(5);
        config.draw = DrawMode::Bands {
            bands: vec![ReelBand::new(vec![SymbolId(9)])],
        };
        let (mut session, sink) = session_with(config);
        session.seed(8);

        session.toggle_auto_spin();
        session.run_until_idle();

        let sink = sink.lock();
        assert_eq!(count_spin_starts(sink.records()), 5);
        assert_eq!(stop_reasons(sink.records()), vec![AutoStopReason::LimitReached]);
        // Balance was spent on spin one only; the rest were bonus spins.
        assert_eq!(session.machine().balance(), 0);
        assert!(session.machine().bonus_spins() > 0);
    }
}
