//! Payline evaluation
//!
//! Pure function of (grid, paylines, paytable, bet): re-evaluating the same
//! inputs always yields the same wins. At most one win per payline survives
//! (best-of-line), so overlapping matches on one line never double-pay.

use serde::{Deserialize, Serialize};

use crate::paylines::Payline;
use crate::paytable::Paytable;
use crate::reels::Grid;
use crate::symbols::{SymbolCatalog, SymbolId};

/// Earliest reel a match may start on; ties to the minimum length of 3 on
/// a 5-reel grid.
const MAX_START_REEL: usize = 2;
const MIN_MATCH: u8 = 3;

/// A winning payline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    pub line_index: u8,
    /// Payout in credits, already scaled by the bet
    pub payout: u64,
    /// All-WILD full-line jackpot
    pub is_jackpot: bool,
    /// Matched symbol count (3..=5; 5 for the jackpot)
    pub match_length: u8,
    /// Reel the match starts on
    pub start_reel: u8,
}

/// Everything a settled grid is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub wins: Vec<LineWin>,
    /// SCATTER symbols anywhere on the grid, payline-independent
    pub scatter_count: u8,
    /// Sum of all line payouts
    pub total_payout: u64,
    /// Bonus spins granted by the scatter rule
    pub bonus_spins_awarded: u32,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    pub fn has_jackpot(&self) -> bool {
        self.wins.iter().any(|w| w.is_jackpot)
    }
}

/// Evaluate a settled grid against the payline set and pay table.
pub fn evaluate(
    grid: &Grid,
    paylines: &[Payline],
    paytable: &Paytable,
    catalog: &SymbolCatalog,
    bet: u64,
) -> Evaluation {
    let mut wins = Vec::new();

    for line in paylines {
        if line.width() != grid.reels() {
            continue;
        }
        if let Some(win) = evaluate_line(grid, line, paytable, catalog, bet) {
            wins.push(win);
        }
    }

    let scatter_count = grid.iter().filter(|&s| catalog.is_scatter(s)).count() as u8;
    let total_payout = wins.iter().map(|w| w.payout).sum();
    let bonus_spins_awarded = paytable.scatter_award(scatter_count);

    Evaluation {
        wins,
        scatter_count,
        total_payout,
        bonus_spins_awarded,
    }
}

fn evaluate_line(
    grid: &Grid,
    line: &Payline,
    paytable: &Paytable,
    catalog: &SymbolCatalog,
    bet: u64,
) -> Option<LineWin> {
    let symbols: Vec<SymbolId> = line
        .rows
        .iter()
        .enumerate()
        .filter_map(|(reel, &row)| grid.symbol_at(reel, row as usize))
        .collect();
    if symbols.len() != line.width() {
        return None;
    }

    // Full-line jackpot: every position WILD. No ordinary matching then.
    if paytable.wild_line_jackpot && symbols.iter().all(|&s| catalog.is_wild(s)) {
        return Some(LineWin {
            line_index: line.index,
            payout: paytable.jackpot_payout(bet),
            is_jackpot: true,
            match_length: symbols.len() as u8,
            start_reel: 0,
        });
    }

    let mut best: Option<LineWin> = None;

    for start in 0..=MAX_START_REEL.min(symbols.len().saturating_sub(1)) {
        // Adopt the first non-WILD symbol from `start` rightward as the
        // target. A run of nothing but WILDs defines no target.
        let target = symbols[start..]
            .iter()
            .copied()
            .find(|&s| !catalog.is_wild(s));
        let target = match target {
            Some(t) => t,
            None => continue,
        };

        // Scatter pays by global count, never as a line target.
        if catalog.is_scatter(target) {
            continue;
        }

        let mut match_length = 1u8;
        for &next in &symbols[start + 1..] {
            if next == target || catalog.is_wild(next) {
                match_length += 1;
            } else {
                break;
            }
        }

        if match_length < MIN_MATCH {
            continue;
        }

        let payout = paytable.line_payout(catalog.tier(target), match_length, bet);
        if payout == 0 {
            continue;
        }

        // Best-of-line: strictly greater payout wins, ties keep the
        // earliest start.
        let replace = best.as_ref().map(|b| payout > b.payout).unwrap_or(true);
        if replace {
            best = Some(LineWin {
                line_index: line.index,
                payout,
                is_jackpot: false,
                match_length,
                start_reel: start as u8,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paylines::standard_5_paylines;

    const LOW: u8 = 0;
    const LOW2: u8 = 1;
    const LOW3: u8 = 2;
    const HIGH: u8 = 5;
    const WILD: u8 = 8;
    const SCATTER: u8 = 9;

    /// Build a grid from rows (row-major, as it reads on screen).
    fn grid(rows: [[u8; 5]; 3]) -> Grid {
        let columns = (0..5)
            .map(|reel| (0..3).map(|row| SymbolId(rows[row][reel])).collect())
            .collect();
        Grid::new(columns)
    }

    /// A row of distinct, non-matching symbols.
    const DEAD: [u8; 5] = [0, 1, 2, 3, 4];

    fn eval(g: &Grid, bet: u64) -> Evaluation {
        evaluate(
            g,
            &standard_5_paylines(),
            &Paytable::default(),
            &SymbolCatalog::standard(),
            bet,
        )
    }

    #[test]
    fn test_five_high_on_top_row() {
        let g = grid([[HIGH; 5], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        let win = &result.wins[0];
        assert_eq!(win.line_index, 0);
        assert_eq!(win.match_length, 5);
        assert!(!win.is_jackpot);
        // bet × HIGH base (2×) × MULTI_5 (10)
        assert_eq!(win.payout, 100 * 2 * 10);
    }

    #[test]
    fn test_all_wild_row_is_jackpot_only() {
        let g = grid([[WILD; 5], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        let win = &result.wins[0];
        assert!(win.is_jackpot);
        assert_eq!(win.match_length, 5);
        assert_eq!(win.start_reel, 0);
        assert_eq!(win.payout, 100 * 2000);
    }

    #[test]
    fn test_all_wild_line_with_jackpot_disabled_pays_nothing() {
        let g = grid([[WILD; 5], DEAD, [4, 3, 2, 1, 0]]);
        let mut pt = Paytable::default();
        pt.wild_line_jackpot = false;
        let result = evaluate(
            &g,
            &standard_5_paylines(),
            &pt,
            &SymbolCatalog::standard(),
            100,
        );
        assert!(result.wins.is_empty());
    }

    #[test]
    fn test_wild_adopts_first_non_wild_target() {
        // WILD WILD HIGH HIGH LOW → target HIGH, length 4 from start 0
        let g = grid([[WILD, WILD, HIGH, HIGH, LOW], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        let win = &result.wins[0];
        assert_eq!(win.match_length, 4);
        assert_eq!(win.start_reel, 0);
        assert_eq!(win.payout, 100 * 2 * 3);
    }

    #[test]
    fn test_trailing_wilds_extend_a_match() {
        // HIGH WILD WILD WILD WILD → 5-of-a-kind HIGH, not a jackpot
        let g = grid([[HIGH, WILD, WILD, WILD, WILD], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        let win = &result.wins[0];
        assert!(!win.is_jackpot);
        assert_eq!(win.match_length, 5);
        assert_eq!(win.payout, 100 * 2 * 10);
    }

    #[test]
    fn test_match_must_start_by_reel_two() {
        // Only reels 2..4 match: qualifies (start 2, length 3)
        let g = grid([[LOW, LOW2, HIGH, HIGH, HIGH], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        assert_eq!(result.wins[0].start_reel, 2);
        assert_eq!(result.wins[0].match_length, 3);

        // Only reels 3..4: too short, and a start there would not qualify
        let g = grid([[LOW, LOW2, LOW3, HIGH, HIGH], DEAD, [4, 3, 2, 1, 0]]);
        assert!(eval(&g, 100).wins.is_empty());
    }

    #[test]
    fn test_best_of_line_never_double_pays() {
        // LOW LOW LOW LOW LOW: starts 0,1,2 all qualify; only the longest
        // (highest-paying) survives.
        let g = grid([[LOW; 5], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert_eq!(result.wins.len(), 1);
        let win = &result.wins[0];
        assert_eq!(win.start_reel, 0);
        assert_eq!(win.match_length, 5);
        assert_eq!(win.payout, 100 * 5);
    }

    #[test]
    fn test_higher_paying_later_start_beats_earlier() {
        // Start 0: LOW×3 (50). Start 2: HIGH×3 (200). Best-of-line keeps
        // the HIGH match even though it starts later.
        let g = grid([[LOW, LOW, LOW, HIGH, HIGH], DEAD, [4, 3, 2, 1, 0]]);
        // Reel 2 must bridge both: make it WILD so start 0 gives LOW-led
        // 3-match and start 2 gives WILD-led HIGH 3-match.
        let g2 = grid([[LOW, LOW, WILD, HIGH, HIGH], DEAD, [4, 3, 2, 1, 0]]);
        assert_eq!(eval(&g, 100).wins[0].payout, 50);
        let result = eval(&g2, 100);
        assert_eq!(result.wins.len(), 1);
        assert_eq!(result.wins[0].payout, 200);
        assert_eq!(result.wins[0].start_reel, 2);
    }

    #[test]
    fn test_scatter_never_anchors_a_line() {
        let g = grid([[SCATTER, SCATTER, SCATTER, HIGH, HIGH], DEAD, [4, 3, 2, 1, 0]]);
        let result = eval(&g, 100);
        assert!(result.wins.is_empty());
        assert_eq!(result.scatter_count, 3);
        assert_eq!(result.bonus_spins_awarded, 0);
    }

    #[test]
    fn test_scatter_counts_whole_grid() {
        let g = grid([
            [SCATTER, 0, 1, 2, SCATTER],
            [3, SCATTER, 4, 0, 1],
            [2, 3, 4, SCATTER, 0],
        ]);
        let result = eval(&g, 100);
        assert_eq!(result.scatter_count, 4);
        assert_eq!(result.bonus_spins_awarded, 5);
    }

    #[test]
    fn test_at_most_one_win_per_line_lengths_in_range() {
        // Exercise a batch of seeded random grids against the invariant.
        use crate::config::GridSpec;
        use crate::reels::{DrawMode, ReelSet};

        let mut reels = ReelSet::new(
            SymbolCatalog::standard(),
            GridSpec::standard_5x3(),
            DrawMode::Uniform,
        );
        reels.seed(2024);
        let lines = standard_5_paylines();
        for _ in 0..500 {
            let g = reels.spin();
            let result = evaluate(
                &g,
                &lines,
                &Paytable::default(),
                &SymbolCatalog::standard(),
                100,
            );
            let mut seen = std::collections::HashSet::new();
            for win in &result.wins {
                assert!(seen.insert(win.line_index), "two wins on one line");
                assert!((3..=5).contains(&win.match_length));
            }
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let g = grid([[HIGH, WILD, HIGH, LOW, SCATTER], [LOW; 5], DEAD]);
        let a = eval(&g, 250);
        let b = eval(&g, 250);
        assert_eq!(a, b);
    }
}
