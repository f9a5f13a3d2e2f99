//! Central mutable game state
//!
//! Owns the level store, the creature registry, factions, content and
//! the RNG. Single-threaded and synchronous: handlers mutate it in
//! place and every effect is visible before the next handler runs.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::collective::Collective;
use crate::content::ContentFactory;
use crate::creature::{Creature, CreatureId, CreatureTemplate, LastingEffect, TribeId};
use crate::event::{GameEvent, MessageLog, PlayerMessage, SoundId};
use crate::furniture::{Furniture, usage};
use crate::item::{Item, ItemId};
use crate::rng::GameRng;
use crate::world::{Level, LevelId, Pos};

/// Serde helper for the portal pairing map — stored as a sequence of
/// position pairs so text formats with string-only map keys work.
mod portal_links_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(map: &HashMap<Pos, Pos>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<(&Pos, &Pos)> = map.iter().collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<Pos, Pos>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(Pos, Pos)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

/// Main game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All levels, keyed by id
    pub levels: HashMap<LevelId, Level>,

    /// All live creatures
    pub creatures: HashMap<CreatureId, Creature>,

    /// Active factions, scanned linearly for territory queries
    pub collectives: Vec<Collective>,

    /// Content registries
    pub content: ContentFactory,

    /// Random number generator
    pub rng: GameRng,

    /// Turn counter
    pub turns: u64,

    /// Bidirectional portal pairing; both directions are stored
    #[serde(with = "portal_links_serde")]
    pub portal_links: HashMap<Pos, Pos>,

    /// Narration for the current action
    #[serde(skip)]
    pub log: MessageLog,

    /// Events for the current action
    #[serde(skip)]
    pub events: Vec<GameEvent>,

    /// Sounds for the current action
    #[serde(skip)]
    pub sounds: Vec<(Pos, SoundId)>,

    next_creature_id: u32,
    next_item_id: u32,
}

impl GameState {
    pub fn new(rng: GameRng) -> Self {
        Self {
            levels: HashMap::new(),
            creatures: HashMap::new(),
            collectives: Vec::new(),
            content: ContentFactory::new(),
            rng,
            turns: 0,
            portal_links: HashMap::new(),
            log: MessageLog::default(),
            events: Vec::new(),
            sounds: Vec::new(),
            next_creature_id: 1,
            next_item_id: 1,
        }
    }

    pub fn add_level(&mut self, level: Level) {
        self.levels.insert(level.id, level);
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    // --- creatures ---

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn creature_at(&self, pos: Pos) -> Option<&Creature> {
        let id = self.levels.get(&pos.level)?.cell(pos.coord).creature?;
        self.creatures.get(&id)
    }

    pub fn creature_at_mut(&mut self, pos: Pos) -> Option<&mut Creature> {
        let id = self.levels.get(&pos.level)?.cell(pos.coord).creature?;
        self.creatures.get_mut(&id)
    }

    /// Third-person referent of a creature, e.g. "the rat"
    pub fn the_name(&self, id: CreatureId) -> String {
        self.creature(id).map(|c| c.the_name()).unwrap_or_default()
    }

    /// Place a new creature on a cell assumed free
    pub fn spawn_creature(
        &mut self,
        template: &CreatureTemplate,
        tribe: TribeId,
        pos: Pos,
    ) -> CreatureId {
        let id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;
        let creature = Creature::new(id, template, tribe, pos);
        if let Some(level) = self.levels.get_mut(&pos.level) {
            level.cell_mut(pos.coord).creature = Some(id);
        }
        self.creatures.insert(id, creature);
        id
    }

    /// Land a new creature at the target cell, or the first free
    /// neighbor in fixed order. Returns None when nothing accepts it.
    pub fn land_creature(
        &mut self,
        template: &CreatureTemplate,
        tribe: TribeId,
        pos: Pos,
    ) -> Option<CreatureId> {
        let level = self.levels.get(&pos.level)?;
        let landing = core::iter::once(pos.coord)
            .chain(pos.coord.neighbors8())
            .find(|&c| level.is_free(c))?;
        Some(self.spawn_creature(template, tribe, Pos::new(pos.level, landing)))
    }

    pub fn can_move_creature(&self, id: CreatureId, to: Pos) -> bool {
        self.creatures.contains_key(&id)
            && self
                .levels
                .get(&to.level)
                .is_some_and(|level| level.is_free(to.coord))
    }

    /// Move a creature, updating occupancy on both levels involved.
    /// The destination is not validated; callers check [`Self::can_move_creature`]
    /// when the move may be refused.
    pub fn move_creature(&mut self, id: CreatureId, to: Pos) {
        let Some(from) = self.creatures.get(&id).map(|c| c.pos) else {
            return;
        };
        if let Some(level) = self.levels.get_mut(&from.level) {
            level.cell_mut(from.coord).creature = None;
        }
        if let Some(level) = self.levels.get_mut(&to.level) {
            level.cell_mut(to.coord).creature = Some(id);
        }
        if let Some(c) = self.creatures.get_mut(&id) {
            c.pos = to;
        }
    }

    /// Level transition through a landing link: take the target cell,
    /// or the nearest free cell around it, or stay put.
    pub fn change_level(&mut self, id: CreatureId, target: Pos) {
        if self.can_move_creature(id, target) {
            self.move_creature(id, target);
        } else if let Some(landing) = self.closest_landing(target) {
            self.move_creature(id, landing);
        }
    }

    pub fn closest_landing(&self, around: Pos) -> Option<Pos> {
        let level = self.levels.get(&around.level)?;
        level
            .closest_landing(around.coord)
            .map(|c| Pos::new(around.level, c))
    }

    /// Whether one creature currently sees another: same level and an
    /// unobstructed line between them.
    pub fn can_see(&self, a: CreatureId, b: CreatureId) -> bool {
        let (Some(a), Some(b)) = (self.creature(a), self.creature(b)) else {
            return false;
        };
        a.pos.level == b.pos.level
            && self
                .levels
                .get(&a.pos.level)
                .is_some_and(|level| level.has_line_of_sight(a.pos.coord, b.pos.coord))
    }

    pub fn add_effect(&mut self, id: CreatureId, effect: LastingEffect, duration: u64) {
        let expires_at = self.turns + duration;
        if let Some(c) = self.creatures.get_mut(&id) {
            c.add_effect(effect, expires_at);
        }
    }

    pub fn remove_effect(&mut self, id: CreatureId, effect: LastingEffect) {
        if let Some(c) = self.creatures.get_mut(&id) {
            c.remove_effect(effect);
        }
    }

    // --- furniture ---

    pub fn furniture_at(&self, pos: Pos) -> Option<&Furniture> {
        self.levels.get(&pos.level)?.furniture_at(pos.coord)
    }

    /// Install furniture at a cell. Installing a portal pairs it with
    /// an unpaired portal already on the same level, if one exists.
    pub fn install_furniture(&mut self, pos: Pos, furniture: Furniture) {
        let links_portals = furniture.has_usage(crate::furniture::BuiltinUsage::Portal);
        if let Some(level) = self.levels.get_mut(&pos.level) {
            level.cell_mut(pos.coord).furniture = Some(furniture);
        }
        if links_portals {
            if let Some(partner) = self.find_unpaired_portal(pos) {
                self.portal_links.insert(pos, partner);
                self.portal_links.insert(partner, pos);
            }
        }
    }

    fn find_unpaired_portal(&self, except: Pos) -> Option<Pos> {
        let level = self.levels.get(&except.level)?;
        level
            .furniture_coords()
            .filter(|(c, f)| {
                *c != except.coord && f.has_usage(crate::furniture::BuiltinUsage::Portal)
            })
            .map(|(c, _)| Pos::new(except.level, c))
            .find(|p| !self.portal_links.contains_key(p))
    }

    /// Remove furniture, running its pre-removal hook first so stateful
    /// usages (portals) can clean up while the link is still resolvable.
    pub fn remove_furniture(&mut self, pos: Pos) {
        let hook = self
            .furniture_at(pos)
            .and_then(|f| f.usage.clone());
        if let Some(usage_type) = hook {
            usage::before_removed(self, &usage_type, pos);
        }
        if let Some(level) = self.levels.get_mut(&pos.level) {
            level.cell_mut(pos.coord).furniture = None;
        }
    }

    pub fn replace_furniture(&mut self, pos: Pos, furniture: Furniture) {
        self.remove_furniture(pos);
        self.install_furniture(pos, furniture);
    }

    // --- portals ---

    pub fn portal_link(&self, pos: Pos) -> Option<Pos> {
        self.portal_links.get(&pos).copied()
    }

    /// Drop the pairing in both directions
    pub fn unlink_portal(&mut self, pos: Pos) {
        if let Some(other) = self.portal_links.remove(&pos) {
            self.portal_links.remove(&other);
        }
    }

    // --- stairs ---

    pub fn landing_link(&self, pos: Pos) -> Option<Pos> {
        self.levels.get(&pos.level)?.cell(pos.coord).landing_link
    }

    pub fn set_landing_link(&mut self, pos: Pos, target: Pos) {
        if let Some(level) = self.levels.get_mut(&pos.level) {
            level.cell_mut(pos.coord).landing_link = Some(target);
        }
    }

    // --- items ---

    /// Materialize items on a cell; returns their fresh ids
    pub fn spawn_items(&mut self, pos: Pos, names: Vec<String>) -> Vec<ItemId> {
        let Some(level) = self.levels.get_mut(&pos.level) else {
            return Vec::new();
        };
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = ItemId(self.next_item_id);
            self.next_item_id += 1;
            level.cell_mut(pos.coord).items.push(Item { id, name });
            ids.push(id);
        }
        ids
    }

    pub fn items_at(&self, pos: Pos) -> &[Item] {
        self.levels
            .get(&pos.level)
            .map(|level| level.cell(pos.coord).items.as_slice())
            .unwrap_or(&[])
    }

    // --- narration, events, sounds ---

    /// "You ..." narration addressed to the subject
    pub fn second_person(&mut self, target: CreatureId, text: impl Into<String>) {
        self.log.push_private(target, PlayerMessage::new(text));
    }

    /// Third-person narration visible to bystanders
    pub fn third_person(&mut self, text: impl Into<String>) {
        self.log.push_broadcast(PlayerMessage::new(text));
    }

    pub fn private_message(&mut self, target: CreatureId, message: PlayerMessage) {
        self.log.push_private(target, message);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn push_sound(&mut self, pos: Pos, sound: SoundId) {
        self.sounds.push((pos, sound));
    }
}
