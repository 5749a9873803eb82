use thiserror::Error;

use crate::types::Stage;
use crate::{QUESTIONS_PER_STAGE, TOTAL_QUESTIONS};

/// Where a session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress { stage: Stage, question: u8 },
    Eliminated { stage: Stage },
    Completed,
}

/// What to do when the countdown reaches zero mid-game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Treat expiry as an elimination at the current stage.
    #[default]
    Eliminate,
    /// Keep the session on screen but stop accepting answers.
    StopScoring,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an answer is already being evaluated")]
    AnswerPending,
    #[error("no answer is awaiting evaluation")]
    NoAnswerPending,
    #[error("session has already ended")]
    SessionOver,
    #[error("session time has expired")]
    TimeExpired,
}

/// Outcome of one evaluated answer or a timer expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Correct answer inside a stage.
    NextQuestion { stage: Stage, question: u8 },
    /// Correct answer on the last question of stage one or two.
    StageCleared { cleared: Stage, next: Stage, score: u8 },
    /// Correct answer on the last question of stage three. Terminal.
    Completed { score: u8 },
    /// Incorrect answer. Terminal.
    Eliminated { stage: Stage, score: u8 },
    /// Countdown hit zero under `TimeoutPolicy::Eliminate`. Terminal.
    TimedOut { stage: Stage, score: u8 },
}

impl Transition {
    /// Stage result to mirror on chain, if this transition crossed a stage
    /// boundary or ended the session. The chain write is best-effort; local
    /// state never waits for it.
    pub fn chain_submission(&self) -> Option<(Stage, u8)> {
        match *self {
            Transition::NextQuestion { .. } => None,
            Transition::StageCleared { cleared, score, .. } => Some((cleared, score)),
            Transition::Completed { score } => Some((Stage::Three, score)),
            Transition::Eliminated { stage, score } => Some((stage, score)),
            Transition::TimedOut { stage, score } => Some((stage, score)),
        }
    }
}

/// One player's traversal of the 3x5 quiz.
///
/// All mutation happens on the UI event loop; the `submitting` flag is the
/// only mutual-exclusion mechanism and rejects a second submission while one
/// is in flight. Once a terminal phase is reached the session is immutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    phase: Phase,
    score: u8,
    time_remaining_ms: u64,
    submitting: bool,
    timeout_policy: TimeoutPolicy,
}

impl GameSession {
    pub fn new(time_remaining_ms: u64) -> Self {
        Self::with_timeout_policy(time_remaining_ms, TimeoutPolicy::default())
    }

    pub fn with_timeout_policy(time_remaining_ms: u64, timeout_policy: TimeoutPolicy) -> Self {
        Self {
            phase: Phase::InProgress {
                stage: Stage::One,
                question: 0,
            },
            score: 0,
            time_remaining_ms,
            submitting: false,
            timeout_policy,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count of correct answers so far. Never decreases.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn time_remaining_ms(&self) -> u64 {
        self.time_remaining_ms
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.phase, Phase::InProgress { .. })
    }

    /// Take the submission guard before calling the answer evaluator.
    /// Returns the stage and question the answer belongs to.
    pub fn begin_submit(&mut self) -> Result<(Stage, u8), SessionError> {
        let (stage, question) = match self.phase {
            Phase::InProgress { stage, question } => (stage, question),
            _ => return Err(SessionError::SessionOver),
        };
        if self.submitting {
            return Err(SessionError::AnswerPending);
        }
        if self.time_remaining_ms == 0 {
            return Err(SessionError::TimeExpired);
        }
        self.submitting = true;
        Ok((stage, question))
    }

    /// Release the guard without advancing; the evaluator call failed and
    /// the player may retry the same question.
    pub fn cancel_submit(&mut self) {
        self.submitting = false;
    }

    /// Apply the evaluator's verdict for the answer taken with
    /// [`begin_submit`](Self::begin_submit).
    pub fn resolve_submit(&mut self, is_correct: bool) -> Result<Transition, SessionError> {
        if !self.submitting {
            return Err(SessionError::NoAnswerPending);
        }
        self.submitting = false;
        let (stage, question) = match self.phase {
            Phase::InProgress { stage, question } => (stage, question),
            _ => return Err(SessionError::SessionOver),
        };

        if !is_correct {
            self.phase = Phase::Eliminated { stage };
            return Ok(Transition::Eliminated {
                stage,
                score: self.score,
            });
        }

        self.score += 1;
        if question + 1 < QUESTIONS_PER_STAGE {
            let question = question + 1;
            self.phase = Phase::InProgress { stage, question };
            return Ok(Transition::NextQuestion { stage, question });
        }
        match stage.next() {
            Some(next) => {
                self.phase = Phase::InProgress {
                    stage: next,
                    question: 0,
                };
                Ok(Transition::StageCleared {
                    cleared: stage,
                    next,
                    score: self.score,
                })
            }
            None => {
                debug_assert_eq!(self.score, TOTAL_QUESTIONS);
                self.phase = Phase::Completed;
                Ok(Transition::Completed { score: self.score })
            }
        }
    }

    /// Advance the countdown by `elapsed_ms`. Returns the terminal
    /// transition if the clock ran out under `TimeoutPolicy::Eliminate`.
    /// Any in-flight submission is dropped so a late evaluator response
    /// cannot mutate the session.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<Transition> {
        if self.is_terminal() {
            return None;
        }
        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(elapsed_ms);
        if self.time_remaining_ms > 0 {
            return None;
        }
        match (self.timeout_policy, self.phase) {
            (TimeoutPolicy::Eliminate, Phase::InProgress { stage, .. }) => {
                self.submitting = false;
                self.phase = Phase::Eliminated { stage };
                Some(Transition::TimedOut {
                    stage,
                    score: self.score,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: u64 = 3_600_000;

    fn answer(session: &mut GameSession, is_correct: bool) -> Transition {
        session.begin_submit().unwrap();
        session.resolve_submit(is_correct).unwrap()
    }

    #[test]
    fn perfect_run_scores_every_answer_and_completes_on_the_fifteenth() {
        let mut session = GameSession::new(HOUR_MS);
        for k in 1..=15u8 {
            assert!(!session.is_terminal(), "terminal before answer {k}");
            let transition = answer(&mut session, true);
            assert_eq!(session.score(), k);
            match k {
                5 => assert_eq!(
                    transition,
                    Transition::StageCleared {
                        cleared: Stage::One,
                        next: Stage::Two,
                        score: 5
                    }
                ),
                10 => assert_eq!(
                    transition,
                    Transition::StageCleared {
                        cleared: Stage::Two,
                        next: Stage::Three,
                        score: 10
                    }
                ),
                15 => assert_eq!(transition, Transition::Completed { score: 15 }),
                _ => assert!(matches!(transition, Transition::NextQuestion { .. })),
            }
        }
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[test]
    fn stage_advances_exactly_every_fifth_correct_answer() {
        let mut session = GameSession::new(HOUR_MS);
        for k in 0..15u8 {
            let expected_stage = match k / 5 {
                0 => Stage::One,
                1 => Stage::Two,
                _ => Stage::Three,
            };
            match session.phase() {
                Phase::InProgress { stage, question } => {
                    assert_eq!(stage, expected_stage);
                    assert_eq!(question, k % 5);
                }
                other => panic!("unexpected phase {other:?}"),
            }
            answer(&mut session, true);
        }
    }

    #[test]
    fn first_wrong_answer_eliminates_at_current_stage() {
        // Seven correct answers put the player at stage 2, question 2.
        let mut session = GameSession::new(HOUR_MS);
        for _ in 0..7 {
            answer(&mut session, true);
        }
        let transition = answer(&mut session, false);
        assert_eq!(
            transition,
            Transition::Eliminated {
                stage: Stage::Two,
                score: 7
            }
        );
        assert_eq!(session.phase(), Phase::Eliminated { stage: Stage::Two });
        // Terminal state is idempotent: nothing more is accepted.
        assert_eq!(session.begin_submit(), Err(SessionError::SessionOver));
        assert_eq!(session.score(), 7);
    }

    #[test]
    fn double_submit_is_rejected_while_first_is_in_flight() {
        let mut session = GameSession::new(HOUR_MS);
        session.begin_submit().unwrap();
        assert_eq!(session.begin_submit(), Err(SessionError::AnswerPending));
        session.resolve_submit(true).unwrap();
        assert_eq!(session.score(), 1);
        // Exactly one transition happened; the guard is free again.
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn evaluator_failure_releases_guard_without_advancing() {
        let mut session = GameSession::new(HOUR_MS);
        let before = session.clone();
        session.begin_submit().unwrap();
        session.cancel_submit();
        assert_eq!(session, before);
        // Retry goes through.
        answer(&mut session, true);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn resolve_without_begin_is_rejected() {
        let mut session = GameSession::new(HOUR_MS);
        assert_eq!(
            session.resolve_submit(true),
            Err(SessionError::NoAnswerPending)
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn expiry_eliminates_at_current_stage_by_default() {
        let mut session = GameSession::new(3_000);
        for _ in 0..5 {
            answer(&mut session, true);
        }
        assert_eq!(session.tick(1_000), None);
        let transition = session.tick(2_000);
        assert_eq!(
            transition,
            Some(Transition::TimedOut {
                stage: Stage::Two,
                score: 5
            })
        );
        assert_eq!(session.phase(), Phase::Eliminated { stage: Stage::Two });
        // Later ticks are no-ops on a settled session.
        assert_eq!(session.tick(1_000), None);
    }

    #[test]
    fn expiry_drops_an_in_flight_answer() {
        let mut session = GameSession::new(1_000);
        session.begin_submit().unwrap();
        assert!(session.tick(1_000).is_some());
        // The evaluator's late response no longer lands.
        assert_eq!(
            session.resolve_submit(true),
            Err(SessionError::NoAnswerPending)
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn stop_scoring_policy_keeps_phase_but_rejects_answers() {
        let mut session = GameSession::with_timeout_policy(1_000, TimeoutPolicy::StopScoring);
        answer(&mut session, true);
        assert_eq!(session.tick(1_000), None);
        assert_eq!(
            session.phase(),
            Phase::InProgress {
                stage: Stage::One,
                question: 1
            }
        );
        assert_eq!(session.begin_submit(), Err(SessionError::TimeExpired));
    }

    #[test]
    fn chain_submission_fires_on_boundaries_only() {
        let mut session = GameSession::new(HOUR_MS);
        for k in 1..=15u8 {
            let submission = answer(&mut session, true).chain_submission();
            match k {
                5 => assert_eq!(submission, Some((Stage::One, 5))),
                10 => assert_eq!(submission, Some((Stage::Two, 10))),
                15 => assert_eq!(submission, Some((Stage::Three, 15))),
                _ => assert_eq!(submission, None),
            }
        }

        let mut session = GameSession::new(HOUR_MS);
        answer(&mut session, true);
        let submission = answer(&mut session, false).chain_submission();
        assert_eq!(submission, Some((Stage::One, 1)));
    }
}
