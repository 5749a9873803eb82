mod api;
mod chain;
mod session_store;
mod use_game;
mod use_game_leaderboard;
mod use_global_leaderboard;

pub use api::*;
pub use chain::{
    claim_refund_transaction, connect_wallet, create_game_transaction, fetch_token_balance,
    join_game_transaction, submit_stage_result_transaction,
};
pub use session_store::{clear_session, load_session, save_session, WalletSession};
pub use use_game::{use_game, GameState};
pub use use_game_leaderboard::{use_game_leaderboard, GameLeaderboardState};
pub use use_global_leaderboard::{use_global_leaderboard, GlobalLeaderboardState};
