//! Furniture: placeable world objects and their usage behaviors

use serde::{Deserialize, Serialize};

use crate::content::FurnitureTypeId;
use crate::creature::TribeId;

pub mod usage;

pub use usage::{BuiltinUsage, UsageEffect, UsageType};

/// One placed piece of furniture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub furniture_type: FurnitureTypeId,
    pub name: String,
    pub tribe: TribeId,
    /// Behavior exposed to creatures standing on or next to this furniture.
    /// Shared per type: instances never mutate it.
    pub usage: Option<UsageType>,
}

impl Furniture {
    pub fn has_usage(&self, wanted: BuiltinUsage) -> bool {
        matches!(&self.usage, Some(UsageType::Builtin(id)) if *id == wanted)
    }
}
