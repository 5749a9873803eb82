use dioxus::prelude::*;

use super::api::{fetch_global_leaderboard, GlobalStanding};

#[derive(Clone, Default)]
pub struct GlobalLeaderboardState {
    pub standings: Vec<GlobalStanding>,
    pub loading: bool,
    pub error: Option<String>,
}

/// All-time standings across games, ordered by wins.
pub fn use_global_leaderboard() -> Signal<GlobalLeaderboardState> {
    let mut state = use_signal(|| GlobalLeaderboardState {
        loading: true,
        ..Default::default()
    });

    let _resource = use_resource(move || async move {
        match fetch_global_leaderboard().await {
            Ok(standings) => {
                let mut state_mut = state.write();
                state_mut.standings = standings;
                state_mut.loading = false;
            }
            Err(e) => {
                let mut state_mut = state.write();
                state_mut.error = Some(e);
                state_mut.loading = false;
            }
        }
    });

    state
}
