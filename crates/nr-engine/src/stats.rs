//! Session statistics

use serde::{Deserialize, Serialize};

/// Running counters for a session; audit-friendly, never consulted by the
/// game logic itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub losses: u64,
    pub bonus_rounds_triggered: u64,
    pub jackpots_won: u64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Return-to-player over the session, percent.
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Share of spins that won anything, percent.
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Record one settled spin. `debit` is zero for a bonus spin.
    pub fn record(&mut self, debit: u64, payout: u64, jackpot: bool, bonus_triggered: bool) {
        self.total_spins += 1;
        self.total_bet += debit;
        self.total_win += payout;
        if payout > 0 {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if jackpot {
            self.jackpots_won += 1;
        }
        if bonus_triggered {
            self.bonus_rounds_triggered += 1;
        }
        if debit > 0 {
            let ratio = payout as f64 / debit as f64;
            if ratio > self.max_win_ratio {
                self.max_win_ratio = ratio;
            }
        }
    }
}
