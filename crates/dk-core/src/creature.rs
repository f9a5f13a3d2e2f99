//! Creature instances, templates and spawn groups

use core::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GameRng;
use crate::world::Pos;

/// Unique identifier for creature instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Faction allegiance of creatures, furniture and collectives
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TribeId {
    Keeper,
    Adventurer,
    Human,
    Monster,
    Pest,
    Wildlife,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Undefined,
}

/// Gross body shape; gates interactions that need hands or literacy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BodyPlan {
    Humanoid,
    Quadruped,
    Bird,
    Serpent,
    Amorphous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub plan: BodyPlan,
}

impl Body {
    pub const fn of(plan: BodyPlan) -> Self {
        Self { plan }
    }

    pub const fn humanoid() -> Self {
        Self::of(BodyPlan::Humanoid)
    }

    pub const fn is_humanoid(&self) -> bool {
        matches!(self.plan, BodyPlan::Humanoid)
    }
}

/// Timed status effects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LastingEffect {
    TiedUp,
    Sleep,
    Slowed,
    Poisoned,
}

/// One live creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub tribe: TribeId,
    pub body: Body,
    pub gender: Gender,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    /// Active effects mapped to their expiry turn
    effects: HashMap<LastingEffect, u64>,
}

impl Creature {
    pub fn new(id: CreatureId, template: &CreatureTemplate, tribe: TribeId, pos: Pos) -> Self {
        Self {
            id,
            name: template.name.clone(),
            tribe,
            body: template.body,
            gender: template.gender,
            pos,
            hp: template.hp,
            max_hp: template.hp,
            effects: HashMap::new(),
        }
    }

    /// Third-person referent, e.g. "the rat"
    pub fn the_name(&self) -> String {
        format!("the {}", self.name)
    }

    pub fn add_effect(&mut self, effect: LastingEffect, expires_at: u64) {
        let entry = self.effects.entry(effect).or_insert(0);
        *entry = (*entry).max(expires_at);
    }

    pub fn remove_effect(&mut self, effect: LastingEffect) {
        self.effects.remove(&effect);
    }

    pub fn has_effect(&self, effect: LastingEffect, now: u64) -> bool {
        self.effects.get(&effect).is_some_and(|&until| until > now)
    }

    pub fn is_asleep(&self, now: u64) -> bool {
        self.has_effect(LastingEffect::Sleep, now)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// Content-defined identifier of a creature template ("RAT", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureTemplateId(pub String);

impl From<&str> for CreatureTemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for CreatureTemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blueprint a creature instance is stamped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub id: CreatureTemplateId,
    pub name: String,
    pub body: Body,
    pub gender: Gender,
    pub hp: i32,
}

impl CreatureTemplate {
    pub fn new(id: impl Into<CreatureTemplateId>, name: &str, body: Body, hp: i32) -> Self {
        Self {
            id: id.into(),
            name: name.to_owned(),
            body,
            gender: Gender::Undefined,
            hp,
        }
    }
}

/// A weighted set of creature templates spawned for one tribe.
/// Carried by value inside spawn descriptors, not registered anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureGroup {
    pub tribe: TribeId,
    entries: Vec<(CreatureTemplateId, u32)>,
}

impl CreatureGroup {
    pub fn new(tribe: TribeId, entries: Vec<(CreatureTemplateId, u32)>) -> Self {
        Self { tribe, entries }
    }

    pub fn single_type(tribe: TribeId, id: impl Into<CreatureTemplateId>) -> Self {
        Self::new(tribe, vec![(id.into(), 1)])
    }

    /// Pick a template id. Single-entry groups still consume one draw,
    /// keeping the draw sequence independent of group composition.
    pub fn random(&self, rng: &mut GameRng) -> Option<&CreatureTemplateId> {
        rng.weighted(&self.entries, |(_, w)| *w).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Coord, LevelId};

    fn rat() -> CreatureTemplate {
        CreatureTemplate::new("RAT", "rat", Body::of(BodyPlan::Quadruped), 4)
    }

    fn at(x: i32, y: i32) -> Pos {
        Pos::new(LevelId(0), Coord::new(x, y))
    }

    #[test]
    fn test_effect_expiry() {
        let mut c = Creature::new(CreatureId(1), &rat(), TribeId::Pest, at(1, 1));
        c.add_effect(LastingEffect::TiedUp, 100);
        assert!(c.has_effect(LastingEffect::TiedUp, 0));
        assert!(c.has_effect(LastingEffect::TiedUp, 99));
        assert!(!c.has_effect(LastingEffect::TiedUp, 100));
    }

    #[test]
    fn test_add_effect_keeps_longer_expiry() {
        let mut c = Creature::new(CreatureId(1), &rat(), TribeId::Pest, at(1, 1));
        c.add_effect(LastingEffect::Sleep, 50);
        c.add_effect(LastingEffect::Sleep, 20);
        assert!(c.is_asleep(40));
        c.remove_effect(LastingEffect::Sleep);
        assert!(!c.is_asleep(0));
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut c = Creature::new(CreatureId(1), &rat(), TribeId::Pest, at(1, 1));
        c.take_damage(100);
        assert_eq!(c.hp, 0);
        c.heal(100);
        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_single_type_group_always_picks_it() {
        let group = CreatureGroup::single_type(TribeId::Pest, "RAT");
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert_eq!(group.random(&mut rng).unwrap().0, "RAT");
        }
    }
}
