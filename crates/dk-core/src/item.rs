//! Items and data-driven item lists

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Unique identifier for item instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// One concrete item lying in the world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

/// Content-defined identifier of an item list ("chest", "coffin_loot", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemListId(pub String);

impl From<&str> for ItemListId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for ItemListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weighted entry of an item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListEntry {
    pub name: String,
    pub weight: u32,
}

impl ItemListEntry {
    pub fn new(name: &str, weight: u32) -> Self {
        Self {
            name: name.to_owned(),
            weight,
        }
    }
}

/// A loot table: draws between min_count and max_count weighted picks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub entries: Vec<ItemListEntry>,
    pub min_count: u32,
    pub max_count: u32,
}

impl ItemList {
    pub fn new(entries: Vec<ItemListEntry>, min_count: u32, max_count: u32) -> Self {
        Self {
            entries,
            min_count,
            max_count,
        }
    }

    /// Draw item names from the table. Count first, then one weighted
    /// pick per item, so the draw order is reproducible from the seed.
    pub fn random(&self, rng: &mut GameRng) -> Vec<String> {
        let count = rng.get(self.min_count, self.max_count);
        (0..count)
            .filter_map(|_| rng.weighted(&self.entries, |e| e.weight))
            .map(|e| e.name.clone())
            .collect()
    }
}
