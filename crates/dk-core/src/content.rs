//! Content factory: registries resolving data identifiers to instances

use core::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::creature::{CreatureTemplate, CreatureTemplateId, TribeId};
use crate::furniture::{Furniture, UsageType};
use crate::item::{ItemList, ItemListId};

/// Content-defined identifier of a furniture type ("CHEST", "OPENED_CHEST", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FurnitureTypeId(pub String);

impl From<&str> for FurnitureTypeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for FurnitureTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blueprint for a furniture type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureDef {
    pub name: String,
    pub usage: Option<UsageType>,
}

impl FurnitureDef {
    pub fn new(name: &str, usage: Option<UsageType>) -> Self {
        Self {
            name: name.to_owned(),
            usage,
        }
    }
}

/// Lookup failures for ids that were never registered.
/// These surface integration bugs at content-load time; the usage
/// dispatcher itself degrades to "nothing happens" instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown creature template '{0}'")]
    UnknownCreature(CreatureTemplateId),
    #[error("unknown item list '{0}'")]
    UnknownItemList(ItemListId),
    #[error("unknown furniture type '{0}'")]
    UnknownFurniture(FurnitureTypeId),
}

/// The registries the dispatcher consults: creature templates,
/// item lists and furniture types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentFactory {
    creature_templates: HashMap<CreatureTemplateId, CreatureTemplate>,
    item_lists: HashMap<ItemListId, ItemList>,
    furniture_types: HashMap<FurnitureTypeId, FurnitureDef>,
}

impl ContentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_creature(&mut self, template: CreatureTemplate) {
        self.creature_templates.insert(template.id.clone(), template);
    }

    pub fn register_item_list(&mut self, id: impl Into<ItemListId>, list: ItemList) {
        self.item_lists.insert(id.into(), list);
    }

    pub fn register_furniture(&mut self, id: impl Into<FurnitureTypeId>, def: FurnitureDef) {
        self.furniture_types.insert(id.into(), def);
    }

    pub fn creature_template(
        &self,
        id: &CreatureTemplateId,
    ) -> Result<&CreatureTemplate, ContentError> {
        self.creature_templates
            .get(id)
            .ok_or_else(|| ContentError::UnknownCreature(id.clone()))
    }

    pub fn item_list(&self, id: &ItemListId) -> Result<&ItemList, ContentError> {
        self.item_lists
            .get(id)
            .ok_or_else(|| ContentError::UnknownItemList(id.clone()))
    }

    /// Instantiate furniture of the given type, owned by the given tribe
    pub fn make_furniture(
        &self,
        id: &FurnitureTypeId,
        tribe: TribeId,
    ) -> Result<Furniture, ContentError> {
        let def = self
            .furniture_types
            .get(id)
            .ok_or_else(|| ContentError::UnknownFurniture(id.clone()))?;
        Ok(Furniture {
            furniture_type: id.clone(),
            name: def.name.clone(),
            tribe,
            usage: def.usage.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::BuiltinUsage;

    #[test]
    fn test_make_furniture_copies_def() {
        let mut content = ContentFactory::new();
        content.register_furniture(
            "CHEST",
            FurnitureDef::new("treasure chest", Some(UsageType::Builtin(BuiltinUsage::Chest))),
        );
        let f = content
            .make_furniture(&"CHEST".into(), TribeId::Keeper)
            .unwrap();
        assert_eq!(f.name, "treasure chest");
        assert_eq!(f.tribe, TribeId::Keeper);
        assert!(f.has_usage(BuiltinUsage::Chest));
    }

    #[test]
    fn test_unknown_ids_error() {
        let content = ContentFactory::new();
        let err = content
            .make_furniture(&"NO_SUCH".into(), TribeId::Keeper)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown furniture type 'NO_SUCH'"
        );
        assert!(content.item_list(&"loot".into()).is_err());
        assert!(content.creature_template(&"RAT".into()).is_err());
    }
}
