//! Atomic game effects
//!
//! An [`Effect`] is an already-defined, self-contained consequence that
//! can be applied to a world location. Furniture with a generic usage
//! carries one of these; scrolls, traps and rituals reuse the same set.

use serde::{Deserialize, Serialize};

use crate::creature::LastingEffect;
use crate::event::SoundId;
use crate::gamestate::GameState;
use crate::world::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Damage the creature standing at the location
    Damage { amount: i32 },
    /// Heal the creature standing at the location
    Heal { amount: i32 },
    /// Apply a timed status to the creature standing at the location
    Lasting { effect: LastingEffect, turns: u64 },
    /// Emit a sound from the location
    Sound(SoundId),
}

impl Effect {
    pub fn apply(&self, state: &mut GameState, pos: Pos) {
        match self {
            Effect::Damage { amount } => {
                if let Some(c) = state.creature_at_mut(pos) {
                    c.take_damage(*amount);
                }
            }
            Effect::Heal { amount } => {
                if let Some(c) = state.creature_at_mut(pos) {
                    c.heal(*amount);
                }
            }
            Effect::Lasting { effect, turns } => {
                if let Some(id) = state.creature_at(pos).map(|c| c.id) {
                    state.add_effect(id, *effect, *turns);
                }
            }
            Effect::Sound(sound) => state.push_sound(pos, *sound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{Body, BodyPlan, CreatureTemplate, TribeId};
    use crate::rng::GameRng;
    use crate::world::{Coord, Level, LevelId};

    fn state_with_creature() -> (GameState, Pos) {
        let mut state = GameState::new(GameRng::new(0));
        state.add_level(Level::new(LevelId(0), 8, 8));
        let pos = Pos::new(LevelId(0), Coord::new(2, 2));
        let template = CreatureTemplate::new("RAT", "rat", Body::of(BodyPlan::Quadruped), 10);
        state.spawn_creature(&template, TribeId::Pest, pos);
        (state, pos)
    }

    #[test]
    fn test_damage_and_heal_hit_occupant() {
        let (mut state, pos) = state_with_creature();
        Effect::Damage { amount: 4 }.apply(&mut state, pos);
        assert_eq!(state.creature_at(pos).unwrap().hp, 6);
        Effect::Heal { amount: 2 }.apply(&mut state, pos);
        assert_eq!(state.creature_at(pos).unwrap().hp, 8);
    }

    #[test]
    fn test_empty_cell_is_a_no_op() {
        let (mut state, _) = state_with_creature();
        let empty = Pos::new(LevelId(0), Coord::new(5, 5));
        Effect::Damage { amount: 4 }.apply(&mut state, empty);
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_lasting_applies_to_occupant() {
        let (mut state, pos) = state_with_creature();
        Effect::Lasting {
            effect: LastingEffect::Poisoned,
            turns: 5,
        }
        .apply(&mut state, pos);
        let c = state.creature_at(pos).unwrap();
        assert!(c.has_effect(LastingEffect::Poisoned, 0));
    }

    #[test]
    fn test_sound_is_recorded() {
        let (mut state, pos) = state_with_creature();
        Effect::Sound(SoundId::Shatter).apply(&mut state, pos);
        assert_eq!(state.sounds, vec![(pos, SoundId::Shatter)]);
    }
}
