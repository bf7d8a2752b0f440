//! Payline definitions
//!
//! A payline is one row index per reel. The set is static configuration:
//! validated once at construction, never mutated.

use serde::{Deserialize, Serialize};

/// A payline: an ordered path of row indices, one per reel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row position for each reel
    pub rows: Vec<u8>,
}

impl Payline {
    pub fn new(index: u8, rows: Vec<u8>) -> Self {
        Self { index, rows }
    }

    /// Same row across all reels.
    pub fn straight(index: u8, row: u8, reel_count: u8) -> Self {
        Self {
            index,
            rows: vec![row; reel_count as usize],
        }
    }

    /// Row for a given reel, if the line covers it.
    pub fn row_at(&self, reel: usize) -> Option<u8> {
        self.rows.get(reel).copied()
    }

    pub fn width(&self) -> usize {
        self.rows.len()
    }
}

/// The standard 5-line layout for a 5×3 grid: three straights, a V and an
/// inverted V.
pub fn standard_5_paylines() -> Vec<Payline> {
    vec![
        Payline::straight(0, 0, 5),
        Payline::straight(1, 1, 5),
        Payline::straight(2, 2, 5),
        Payline::new(3, vec![0, 1, 2, 1, 0]),
        Payline::new(4, vec![2, 1, 0, 1, 2]),
    ]
}
