//! Furniture usage dispatch
//!
//! Resolves what happens when a creature uses a piece of furniture:
//! a closed catalog of built-in behaviors plus an open-ended generic
//! effect behavior defined by content. The interaction layer asks
//! [`can_handle`] first, presents [`usage_question`], then calls
//! [`handle`] on confirmation. [`before_removed`] must run once before
//! furniture carrying a usage is removed from the world.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::content::FurnitureTypeId;
use crate::creature::{Creature, CreatureGroup, CreatureId, Gender, LastingEffect, TribeId};
use crate::effect::Effect;
use crate::event::{GameEvent, PlayerMessage, SoundId};
use crate::gamestate::GameState;
use crate::item::ItemListId;
use crate::world::Pos;
use crate::{THRONE_SUMMON_DIST, TIE_UP_TURNS, UNKNOWN_DIST};

/// The fixed catalog of built-in usage behaviors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BuiltinUsage {
    Chest,
    Coffin,
    VampireCoffin,
    KeeperBoard,
    Stairs,
    TieUp,
    Train,
    ArcheryRange,
    Study,
    Portal,
    SitOnThrone,
    DemonRitual,
}

/// Data-driven usage: a verb for the prompt plus the effect to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEffect {
    pub verb: String,
    pub effect: Effect,
}

/// What happens when a creature uses a piece of furniture.
/// Exactly one kind: either a built-in behavior or a generic effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsageType {
    Builtin(BuiltinUsage),
    Effect(UsageEffect),
}

/// Per-call chest configuration: what the chest turns into, and what
/// (if anything) comes out. At most one of creature spawn / item drop
/// triggers per use; a spawn roll that succeeds short-circuits the drop.
struct ChestInfo {
    opened_type: FurnitureTypeId,
    creature_info: Option<CreatureInfo>,
    item_info: Option<ItemInfo>,
}

struct CreatureInfo {
    group: CreatureGroup,
    /// Spawn probability in percent
    chance: u32,
    count: u32,
    msg: String,
}

struct ItemInfo {
    items: ItemListId,
    msg: String,
}

/// Execute a usage behavior.
///
/// Panics if `actor` is not a live creature; that is an integration
/// bug, not a recoverable outcome. Every branch terminates in either a
/// state mutation plus narration, a narration-only "nothing happened",
/// or true silence for the intentionally inert behaviors.
pub fn handle(state: &mut GameState, usage: &UsageType, pos: Pos, actor: CreatureId) {
    let actor_pos = state
        .creature(actor)
        .map(|c| c.pos)
        .expect("furniture usage requires a live actor");
    match usage {
        UsageType::Builtin(id) => match id {
            BuiltinUsage::Chest => {
                let count = state.rng.get(3, 6);
                use_chest(
                    state,
                    pos,
                    actor,
                    ChestInfo {
                        opened_type: "OPENED_CHEST".into(),
                        creature_info: Some(CreatureInfo {
                            group: CreatureGroup::single_type(TribeId::Pest, "RAT"),
                            chance: 10,
                            count,
                            msg: "It's full of rats!".into(),
                        }),
                        item_info: Some(ItemInfo {
                            items: "chest".into(),
                            msg: "There is an item inside".into(),
                        }),
                    },
                );
            }
            BuiltinUsage::Coffin => use_chest(
                state,
                pos,
                actor,
                ChestInfo {
                    opened_type: "OPENED_COFFIN".into(),
                    creature_info: None,
                    item_info: Some(ItemInfo {
                        items: "chest".into(),
                        msg: "There is a rotting corpse inside. You find an item.".into(),
                    }),
                },
            ),
            BuiltinUsage::VampireCoffin => use_chest(
                state,
                pos,
                actor,
                ChestInfo {
                    opened_type: "OPENED_COFFIN".into(),
                    creature_info: Some(CreatureInfo {
                        group: CreatureGroup::single_type(TribeId::Monster, "VAMPIRE_LORD"),
                        chance: 100,
                        count: 1,
                        msg: "There is a rotting corpse inside. The corpse is alive!".into(),
                    }),
                    item_info: None,
                },
            ),
            BuiltinUsage::KeeperBoard => {
                state.push_event(GameEvent::MessageBoardUsed { pos, actor });
            }
            BuiltinUsage::Stairs => {
                if let Some(link) = state.landing_link(pos) {
                    state.change_level(actor, link);
                }
            }
            BuiltinUsage::TieUp => state.add_effect(actor, LastingEffect::TiedUp, TIE_UP_TURNS),
            BuiltinUsage::Train => state.push_sound(pos, SoundId::MissedAttack),
            BuiltinUsage::Portal => use_portal(state, pos, actor),
            BuiltinUsage::SitOnThrone => sit_on_throne(state, pos, actor),
            // Passive: their effect is realized as location properties elsewhere
            BuiltinUsage::DemonRitual | BuiltinUsage::Study | BuiltinUsage::ArcheryRange => {}
        },
        UsageType::Effect(e) => e.effect.apply(state, actor_pos),
    }
}

/// Eligibility check the caller must make before offering the prompt.
/// Chests and boards need hands and literacy; everything else is open
/// to any body plan.
pub fn can_handle(usage: &UsageType, c: &Creature) -> bool {
    match usage {
        UsageType::Builtin(id) => match id {
            BuiltinUsage::Chest
            | BuiltinUsage::Coffin
            | BuiltinUsage::VampireCoffin
            | BuiltinUsage::KeeperBoard => c.body.is_humanoid(),
            BuiltinUsage::Stairs
            | BuiltinUsage::TieUp
            | BuiltinUsage::Train
            | BuiltinUsage::ArcheryRange
            | BuiltinUsage::Study
            | BuiltinUsage::Portal
            | BuiltinUsage::SitOnThrone
            | BuiltinUsage::DemonRitual => true,
        },
        UsageType::Effect(_) => true,
    }
}

/// Player-facing confirmation prompt, e.g. "open the chest"
pub fn usage_question(usage: &UsageType, furniture_name: &str) -> String {
    match usage {
        UsageType::Builtin(id) => {
            let verb = match id {
                BuiltinUsage::Chest | BuiltinUsage::Coffin | BuiltinUsage::VampireCoffin => "open",
                BuiltinUsage::KeeperBoard => "view",
                BuiltinUsage::Portal => "enter",
                BuiltinUsage::SitOnThrone => "sit on",
                BuiltinUsage::Stairs
                | BuiltinUsage::TieUp
                | BuiltinUsage::Train
                | BuiltinUsage::ArcheryRange
                | BuiltinUsage::Study
                | BuiltinUsage::DemonRitual => "use",
            };
            format!("{verb} {furniture_name}")
        }
        UsageType::Effect(e) => format!("{} {}", e.verb, furniture_name),
    }
}

/// Cleanup hook, called exactly once before furniture carrying this
/// usage is removed. Portals must drop their pairing while the link
/// can still be resolved.
pub fn before_removed(state: &mut GameState, usage: &UsageType, pos: Pos) {
    if let UsageType::Builtin(BuiltinUsage::Portal) = usage {
        state.unlink_portal(pos);
    }
}

fn use_chest(state: &mut GameState, pos: Pos, actor: CreatureId, info: ChestInfo) {
    let Some((name, tribe)) = state.furniture_at(pos).map(|f| (f.name.clone(), f.tribe)) else {
        return;
    };
    let actor_name = state.the_name(actor);
    state.second_person(actor, format!("You open the {name}"));
    state.third_person(format!("{actor_name} opens the {name}"));
    // The chest is used up before any contents resolve
    match state.content.make_furniture(&info.opened_type, tribe) {
        Ok(opened) => state.replace_furniture(pos, opened),
        Err(_) => state.remove_furniture(pos),
    }
    if let Some(ci) = &info.creature_info {
        if ci.chance > 0 && state.rng.percent(ci.chance) {
            let mut spawned = 0;
            for _ in 0..ci.count {
                let Some(template_id) = ci.group.random(&mut state.rng).cloned() else {
                    continue;
                };
                let Some(template) = state.content.creature_template(&template_id).ok().cloned()
                else {
                    continue;
                };
                if state.land_creature(&template, ci.group.tribe, pos).is_some() {
                    spawned += 1;
                }
            }
            if spawned > 0 {
                state.private_message(actor, PlayerMessage::new(ci.msg.clone()));
            }
            // the roll consumed this use; no item drop either way
            return;
        }
    }
    if let Some(ii) = &info.item_info {
        state.private_message(actor, PlayerMessage::new(ii.msg.clone()));
        if let Ok(list) = state.content.item_list(&ii.items) {
            let names = list.random(&mut state.rng);
            let items = state.spawn_items(pos, names);
            state.push_event(GameEvent::ItemsAppeared { pos, items });
        }
    }
}

fn use_portal(state: &mut GameState, pos: Pos, actor: CreatureId) {
    let actor_name = state.the_name(actor);
    state.second_person(actor, "You enter the portal");
    state.third_person(format!("{actor_name} enters the portal"));
    if let Some(other) = state.portal_link(pos) {
        let far_side_active = state
            .furniture_at(other)
            .is_some_and(|f| f.has_usage(BuiltinUsage::Portal));
        if far_side_active {
            if state.can_move_creature(actor, other) {
                state.move_creature(actor, other);
                return;
            }
            for n in other.coord.neighbors8() {
                let v = Pos::new(other.level, n);
                if state.can_move_creature(actor, v) {
                    state.move_creature(actor, v);
                    return;
                }
            }
            // far side fully blocked: stay put, flavor text already out
            return;
        }
    }
    state.private_message(
        actor,
        PlayerMessage::new("The portal is inactive. Create another one to open a connection."),
    );
}

/// Title suffix for summons narration, by the sitter's gender
fn address_suffix(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => ", Sire",
        Gender::Female => ", Dame",
        Gender::Undefined => "",
    }
}

fn sit_on_throne(state: &mut GameState, pos: Pos, actor: CreatureId) {
    use crate::collective::MinionTrait;

    let Some((name, throne_tribe)) = state.furniture_at(pos).map(|f| (f.name.clone(), f.tribe))
    else {
        return;
    };
    let Some((actor_name, actor_tribe, actor_gender)) = state
        .creature(actor)
        .map(|c| (c.the_name(), c.tribe, c.gender))
    else {
        return;
    };
    state.third_person(format!("{actor_name} sits on the {name}"));
    state.second_person(actor, format!("You sit on the {name}"));
    if throne_tribe == actor_tribe {
        state.private_message(
            actor,
            PlayerMessage::new("Frankly, it's not as exciting as it sounds"),
        );
        return;
    }
    // First collective whose territory holds the throne; unclaimed
    // territory means the summons has nobody to reach.
    let Some(owner) = state.collectives.iter().position(|col| col.contains(pos)) else {
        return;
    };
    let mut targets = state.collectives[owner].creatures_with(MinionTrait::Fighter);
    if let Some(leader) = state.collectives[owner].leader() {
        targets.push(leader);
    }
    let mut was_teleported = false;
    for member in targets {
        let Some(member_pos) = state.creature(member).map(|c| c.pos) else {
            continue;
        };
        // Off-level distance is unknown; treat as far so those members
        // still answer the summons.
        let far = member_pos.dist8(pos).unwrap_or(UNKNOWN_DIST) > THRONE_SUMMON_DIST;
        if far || !state.can_see(actor, member) {
            if let Some(landing) = state.closest_landing(pos) {
                state.move_creature(member, landing);
                state.remove_effect(member, LastingEffect::Sleep);
                was_teleported = true;
            }
        }
    }
    if was_teleported {
        let suffix = address_suffix(actor_gender);
        state.private_message(
            actor,
            PlayerMessage::high(format!("Thy audience hath been summoned{suffix}")),
        );
    } else {
        state.private_message(actor, PlayerMessage::new("Nothing happens"));
    }
}
