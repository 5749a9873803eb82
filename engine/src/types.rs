use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::STAGE_COUNT;

/// One of the three sequential blocks of five questions.
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Stage {
    /// The 1-based stage number as shown to players.
    pub fn number(self) -> u8 {
        self.into()
    }

    /// Zero-based index for table lookups.
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// The following stage, or `None` after stage three.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::One => Some(Stage::Two),
            Stage::Two => Some(Stage::Three),
            Stage::Three => None,
        }
    }
}

/// A single quiz question as served by the question-set provider. The
/// correct option index never leaves the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
}

/// Read-only listing data for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMeta {
    pub id: String,
    pub creator_basename: String,
    /// Stake required to join, in whole QST.
    pub stake_amount: u64,
    pub player_count: u32,
    pub player_limit: u32,
    /// Epoch milliseconds.
    pub created_at: u64,
    /// Epoch milliseconds.
    pub ends_at: u64,
}

/// One player's observed progress through a game, as polled from the
/// leaderboard endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgressRecord {
    pub id: String,
    pub basename: String,
    /// Stage number 1..=3.
    pub stage: u8,
    /// Question index 0..=5; 5 marks the stage as cleared.
    pub question: u8,
    /// Seconds from join to completion; only set for finishers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl PlayerProgressRecord {
    /// Question value that marks a stage as fully answered.
    pub const STAGE_CLEARED: u8 = 5;

    /// Whether this record represents a full 15-question completion.
    pub fn is_completed(&self) -> bool {
        self.stage == STAGE_COUNT && self.question == Self::STAGE_CLEARED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering_and_successors() {
        assert_eq!(Stage::One.next(), Some(Stage::Two));
        assert_eq!(Stage::Two.next(), Some(Stage::Three));
        assert_eq!(Stage::Three.next(), None);
        assert_eq!(Stage::Three.number(), 3);
        assert_eq!(Stage::Three.index(), 2);
        assert!(Stage::One < Stage::Three);
    }

    #[test]
    fn stage_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Stage::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Stage>("3").unwrap(), Stage::Three);
        assert!(serde_json::from_str::<Stage>("4").is_err());
    }

    #[test]
    fn completion_requires_final_stage_sentinel() {
        let mut record = PlayerProgressRecord {
            id: "p1".into(),
            basename: "p1.base.eth".into(),
            stage: 3,
            question: 4,
            completion_time: None,
            rank: None,
        };
        assert!(!record.is_completed());
        record.question = PlayerProgressRecord::STAGE_CLEARED;
        assert!(record.is_completed());
        record.stage = 2;
        assert!(!record.is_completed());
    }
}
