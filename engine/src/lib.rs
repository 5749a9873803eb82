pub mod leaderboard;
pub mod policy;
pub mod session;
pub mod types;

pub use leaderboard::*;
pub use policy::*;
pub use session::*;
pub use types::*;

/// Number of elimination stages in a game.
pub const STAGE_COUNT: u8 = 3;

/// Questions asked per stage.
pub const QUESTIONS_PER_STAGE: u8 = 5;

/// Total questions in a full game.
pub const TOTAL_QUESTIONS: u8 = STAGE_COUNT * QUESTIONS_PER_STAGE;

/// Options offered per question.
pub const OPTIONS_PER_QUESTION: usize = 4;
