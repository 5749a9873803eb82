use serde::{Deserialize, Serialize};

use crate::session::Phase;

/// Stake refund and reward outcome for a finished session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Percentage of the stake returned to the player.
    pub refund_percent: u8,
    /// Whether the player may mint the winner NFT.
    pub nft_eligible: bool,
    /// QST reward, in whole tokens.
    pub token_reward: u64,
}

/// Refund percentage by elimination stage (stage 1, 2, 3).
pub const ELIMINATION_REFUNDS: [u8; 3] = [0, 30, 70];

/// QST paid to ranks 1, 2, 3.
pub const RANK_REWARDS: [u64; 3] = [5, 4, 3];

/// The settlement table, reproduced exactly:
///
/// | terminal state                      | refund | NFT | tokens |
/// |-------------------------------------|--------|-----|--------|
/// | eliminated at stage 1               |    0 % | no  | 0      |
/// | eliminated at stage 2               |   30 % | no  | 0      |
/// | eliminated at stage 3               |   70 % | no  | 0      |
/// | completed, rank > 3 or unranked     |  100 % | no  | 0      |
/// | completed, rank 1-3                 |  100 % | yes | 5/4/3  |
///
/// Returns `None` while the session is still in progress.
pub fn settle(phase: Phase, rank: Option<u32>) -> Option<Settlement> {
    match phase {
        Phase::InProgress { .. } => None,
        Phase::Eliminated { stage } => Some(Settlement {
            refund_percent: ELIMINATION_REFUNDS[stage.index()],
            nft_eligible: false,
            token_reward: 0,
        }),
        Phase::Completed => {
            let token_reward = match rank {
                Some(r @ 1..=3) => RANK_REWARDS[r as usize - 1],
                _ => 0,
            };
            Some(Settlement {
                refund_percent: 100,
                nft_eligible: token_reward > 0,
                token_reward,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    fn eliminated(stage: Stage) -> Phase {
        Phase::Eliminated { stage }
    }

    #[test]
    fn elimination_refunds_follow_the_table() {
        for (stage, refund) in [(Stage::One, 0), (Stage::Two, 30), (Stage::Three, 70)] {
            let settlement = settle(eliminated(stage), None).unwrap();
            assert_eq!(settlement.refund_percent, refund);
            assert!(!settlement.nft_eligible);
            assert_eq!(settlement.token_reward, 0);
        }
    }

    #[test]
    fn unranked_completion_refunds_fully_without_rewards() {
        let settlement = settle(Phase::Completed, None).unwrap();
        assert_eq!(settlement.refund_percent, 100);
        assert!(!settlement.nft_eligible);
        assert_eq!(settlement.token_reward, 0);
    }

    #[test]
    fn top_three_completions_earn_nft_and_tokens() {
        let settlement = settle(Phase::Completed, Some(2)).unwrap();
        assert_eq!(settlement.refund_percent, 100);
        assert!(settlement.nft_eligible);
        assert_eq!(settlement.token_reward, RANK_REWARDS[1]);
    }

    #[test]
    fn fourth_place_is_a_plain_completion() {
        let settlement = settle(Phase::Completed, Some(4)).unwrap();
        assert_eq!(settlement.refund_percent, 100);
        assert!(!settlement.nft_eligible);
        assert_eq!(settlement.token_reward, 0);
    }

    #[test]
    fn no_settlement_while_in_progress() {
        let phase = Phase::InProgress {
            stage: Stage::One,
            question: 3,
        };
        assert_eq!(settle(phase, None), None);
    }
}
