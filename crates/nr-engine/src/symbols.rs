//! Symbol catalog and tier classification
//!
//! A symbol is an opaque index into a fixed, ordered catalog; its tier is a
//! pure function of that identity. Nothing here knows about textures or
//! loading order; presentation maps indices to art on its own side.

use serde::{Deserialize, Serialize};

/// Opaque symbol identity: an index into the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SymbolId(pub u8);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payout role of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Low-paying regular symbol
    Low,
    /// High-paying regular symbol
    High,
    /// Substitutes for any non-scatter symbol
    Wild,
    /// Pays by total count anywhere on the grid
    Scatter,
}

impl Tier {
    /// Regular symbols can anchor an ordinary line match.
    pub fn is_regular(self) -> bool {
        matches!(self, Tier::Low | Tier::High)
    }
}

/// A symbol definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolDef {
    pub id: SymbolId,
    pub name: String,
    pub tier: Tier,
}

/// The fixed, ordered symbol catalog for a session.
///
/// Order never changes while a session lives; every grid cell and every
/// reel band indexes into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolCatalog {
    symbols: Vec<SymbolDef>,
}

impl SymbolCatalog {
    /// The standard 10-symbol catalog: 5 LOW, 3 HIGH, WILD, SCATTER.
    pub fn standard() -> Self {
        let def = |id: u8, name: &str, tier: Tier| SymbolDef {
            id: SymbolId(id),
            name: name.to_string(),
            tier,
        };
        Self {
            symbols: vec![
                def(0, "Moon", Tier::Low),
                def(1, "Comet", Tier::Low),
                def(2, "Meteor", Tier::Low),
                def(3, "Ice", Tier::Low),
                def(4, "Constellation", Tier::Low),
                def(5, "Sun", Tier::High),
                def(6, "Galaxy", Tier::High),
                def(7, "BlackHole", Tier::High),
                def(8, "Wild", Tier::Wild),
                def(9, "Scatter", Tier::Scatter),
            ],
        }
    }

    /// Number of symbols in the catalog.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&SymbolDef> {
        self.symbols.get(id.index())
    }

    /// Tier of a symbol. Out-of-catalog ids never occur in grids produced
    /// by this engine; they classify as Low to keep lookups total.
    pub fn tier(&self, id: SymbolId) -> Tier {
        self.get(id).map(|s| s.tier).unwrap_or(Tier::Low)
    }

    pub fn is_wild(&self, id: SymbolId) -> bool {
        self.tier(id) == Tier::Wild
    }

    pub fn is_scatter(&self, id: SymbolId) -> bool {
        self.tier(id) == Tier::Scatter
    }

    /// First wild symbol in the catalog, if any.
    pub fn wild_id(&self) -> Option<SymbolId> {
        self.symbols
            .iter()
            .find(|s| s.tier == Tier::Wild)
            .map(|s| s.id)
    }

    /// First scatter symbol in the catalog, if any.
    pub fn scatter_id(&self) -> Option<SymbolId> {
        self.symbols
            .iter()
            .find(|s| s.tier == Tier::Scatter)
            .map(|s| s.id)
    }

    /// Ids of all regular (LOW/HIGH) symbols.
    pub fn regular_ids(&self) -> Vec<SymbolId> {
        self.symbols
            .iter()
            .filter(|s| s.tier.is_regular())
            .map(|s| s.id)
            .collect()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
