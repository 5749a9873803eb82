use dioxus::prelude::*;
use quizstake_engine::{rank_players, PlayerProgressRecord};
use std::cell::Cell;
use std::rc::Rc;

use super::api::fetch_leaderboard_records;

const POLL_INTERVAL_MS: u32 = 5_000;

#[derive(Clone, Default)]
pub struct GameLeaderboardState {
    /// Records in display order, ranks assigned to finishers.
    pub records: Vec<PlayerProgressRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Poll the per-game leaderboard and keep it ranked.
pub fn use_game_leaderboard(game_id: &str) -> Signal<GameLeaderboardState> {
    let game_id = game_id.to_string();
    let mut state = use_signal(|| GameLeaderboardState {
        loading: true,
        ..Default::default()
    });

    // Track if polling has started to prevent multiple loops
    let polling_started = use_hook(|| Rc::new(Cell::new(false)));

    use_effect(move || {
        if !polling_started.get() {
            polling_started.set(true);

            let game_id = game_id.clone();
            spawn(async move {
                loop {
                    match fetch_leaderboard_records(&game_id).await {
                        Ok(records) => {
                            let mut state_mut = state.write();
                            state_mut.records = rank_players(records);
                            state_mut.loading = false;
                            state_mut.error = None;
                        }
                        Err(e) => {
                            tracing::error!("Leaderboard fetch error: {}", e);
                            let mut state_mut = state.write();
                            state_mut.error = Some(e);
                            state_mut.loading = false;
                        }
                    }

                    gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
                }
            });
        }
    });

    state
}
