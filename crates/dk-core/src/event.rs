//! Game events, sounds and the narration log
//!
//! The core never prints or plays anything: narration, sounds and
//! cross-subsystem events are recorded here and drained by the
//! interaction layer after each action.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::CreatureId;
use crate::item::ItemId;
use crate::world::Pos;

/// Broadcast notification consumed by systems outside this core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New items materialized at a location (e.g. out of an opened chest)
    ItemsAppeared { pos: Pos, items: Vec<ItemId> },
    /// A creature used a message board; the board UI is owned elsewhere
    MessageBoardUsed { pos: Pos, actor: CreatureId },
}

/// Audible feedback emitted into the world
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SoundId {
    MissedAttack,
    Thud,
    Creak,
    Shatter,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
)]
pub enum MessagePriority {
    #[default]
    Normal,
    High,
    Critical,
}

/// One line of narration with its display priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMessage {
    pub text: String,
    pub priority: MessagePriority,
}

impl PlayerMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: MessagePriority::Normal,
        }
    }

    pub fn high(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: MessagePriority::High,
        }
    }
}

/// A log entry is either private to one creature or a broadcast
/// (third-person narration everyone nearby may see).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub target: Option<CreatureId>,
    pub message: PlayerMessage,
}

/// Accumulated narration for the current action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn push_private(&mut self, target: CreatureId, message: PlayerMessage) {
        self.entries.push(LogEntry {
            target: Some(target),
            message,
        });
    }

    pub fn push_broadcast(&mut self, message: PlayerMessage) {
        self.entries.push(LogEntry {
            target: None,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages addressed privately to one creature
    pub fn messages_for(&self, target: CreatureId) -> Vec<&PlayerMessage> {
        self.entries
            .iter()
            .filter(|e| e.target == Some(target))
            .map(|e| &e.message)
            .collect()
    }

    /// Broadcast (third-person) messages
    pub fn broadcasts(&self) -> Vec<&PlayerMessage> {
        self.entries
            .iter()
            .filter(|e| e.target.is_none())
            .map(|e| &e.message)
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_partitions_by_audience() {
        let mut log = MessageLog::default();
        log.push_private(CreatureId(1), PlayerMessage::new("You open the chest"));
        log.push_broadcast(PlayerMessage::new("the dwarf opens the chest"));
        log.push_private(CreatureId(2), PlayerMessage::high("Run!"));

        let first = log.messages_for(CreatureId(1));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "You open the chest");
        assert_eq!(log.broadcasts().len(), 1);
        assert_eq!(
            log.messages_for(CreatureId(2))[0].priority,
            MessagePriority::High
        );
    }
}
