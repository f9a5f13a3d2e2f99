//! Collectives: factions owning territory and a roster of minions

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::{CreatureId, TribeId};
use crate::world::Pos;

/// Role tag attached to a collective member
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MinionTrait {
    Fighter,
    Worker,
    Prisoner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub creature: CreatureId,
    pub traits: Vec<MinionTrait>,
}

/// One faction: a tribe, its claimed cells, and its roster.
/// Members keep insertion order so roster scans are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collective {
    pub tribe: TribeId,
    territory: HashSet<Pos>,
    members: Vec<Member>,
    leader: Option<CreatureId>,
}

impl Collective {
    pub fn new(tribe: TribeId) -> Self {
        Self {
            tribe,
            territory: HashSet::new(),
            members: Vec::new(),
            leader: None,
        }
    }

    pub fn claim(&mut self, pos: Pos) {
        self.territory.insert(pos);
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.territory.contains(&pos)
    }

    pub fn add_member(&mut self, creature: CreatureId, traits: Vec<MinionTrait>) {
        self.members.push(Member { creature, traits });
    }

    pub fn set_leader(&mut self, creature: CreatureId) {
        self.leader = Some(creature);
    }

    pub fn leader(&self) -> Option<CreatureId> {
        self.leader
    }

    /// Members carrying the given trait, in roster order
    pub fn creatures_with(&self, wanted: MinionTrait) -> Vec<CreatureId> {
        self.members
            .iter()
            .filter(|m| m.traits.contains(&wanted))
            .map(|m| m.creature)
            .collect()
    }
}
