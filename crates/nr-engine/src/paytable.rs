//! Paytable - pure payout math
//!
//! Everything in here is a pure function over configuration constants.
//! Amounts are integer credits; tier bases are stored in tenths of the bet
//! so the 0.5× low tier stays exact without floating point.

use serde::{Deserialize, Serialize};

use crate::symbols::Tier;

/// Scatter bonus rule: `count >= required` awards
/// `base_spins + (count - required) * extra_per_scatter` bonus spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterRule {
    /// Minimum scatters anywhere on the grid to trigger
    pub required: u8,
    /// Spins awarded at the threshold
    pub base_spins: u32,
    /// Extra spins per scatter beyond the threshold
    pub extra_per_scatter: u32,
    /// Counts strictly above this show the mega banner
    pub mega_threshold: u8,
}

impl Default for ScatterRule {
    fn default() -> Self {
        Self {
            required: 4,
            base_spins: 5,
            extra_per_scatter: 3,
            mega_threshold: 5,
        }
    }
}

impl ScatterRule {
    /// Bonus spins granted for a scatter count. Zero below the threshold.
    pub fn award(&self, count: u8) -> u32 {
        if count < self.required {
            return 0;
        }
        self.base_spins + (count - self.required) as u32 * self.extra_per_scatter
    }

    pub fn is_mega(&self, count: u8) -> bool {
        count > self.mega_threshold
    }
}

/// Static pay table: tier base multipliers (in tenths of the bet), match
/// length multipliers, the jackpot multiplier and the scatter rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable {
    /// LOW tier base, tenths of bet (5 = 0.5×)
    pub low_base_tenths: u64,
    /// HIGH tier base, tenths of bet (20 = 2×)
    pub high_base_tenths: u64,
    /// Multiplier for a 4-of-a-kind over the 3-of-a-kind base
    pub multi_4: u64,
    /// Multiplier for a 5-of-a-kind
    pub multi_5: u64,
    /// Bet multiplier for the all-WILD full-line jackpot
    pub jackpot_multiplier: u64,
    /// Whether an all-WILD line pays the jackpot at all. When disabled the
    /// line has no target symbol and simply does not pay.
    pub wild_line_jackpot: bool,
    pub scatter: ScatterRule,
}

impl Default for Paytable {
    fn default() -> Self {
        Self {
            low_base_tenths: 5,
            high_base_tenths: 20,
            multi_4: 3,
            multi_5: 10,
            jackpot_multiplier: 2000,
            wild_line_jackpot: true,
            scatter: ScatterRule::default(),
        }
    }
}

impl Paytable {
    /// Payout for an ordinary line match. WILD and SCATTER never pay as the
    /// anchoring tier; lengths outside 3..=5 pay nothing.
    pub fn line_payout(&self, tier: Tier, match_length: u8, bet: u64) -> u64 {
        let base_tenths = match tier {
            Tier::Low => self.low_base_tenths,
            Tier::High => self.high_base_tenths,
            Tier::Wild | Tier::Scatter => return 0,
        };
        let length_mult = match match_length {
            3 => 1,
            4 => self.multi_4,
            5 => self.multi_5,
            _ => return 0,
        };
        bet * base_tenths * length_mult / 10
    }

    /// Payout for the all-WILD full-line jackpot.
    pub fn jackpot_payout(&self, bet: u64) -> u64 {
        bet * self.jackpot_multiplier
    }

    /// Bonus spins granted for a scatter count.
    pub fn scatter_award(&self, count: u8) -> u32 {
        self.scatter.award(count)
    }
}
