use dioxus::prelude::*;
use quizstake_engine::{GameMeta, Question};

use super::api::fetch_game;

#[derive(Clone, Default)]
pub struct GameState {
    pub meta: Option<GameMeta>,
    pub questions: Vec<Question>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Load one game's meta and question set when the page mounts.
pub fn use_game(game_id: &str) -> Signal<GameState> {
    let game_id = game_id.to_string();
    let mut state = use_signal(|| GameState {
        loading: true,
        ..Default::default()
    });

    // Use use_resource instead of use_effect + spawn for safer async
    let _resource = use_resource(move || {
        let game_id = game_id.clone();
        async move {
            match fetch_game(&game_id).await {
                Ok(detail) => {
                    let mut state_mut = state.write();
                    state_mut.meta = Some(detail.meta);
                    state_mut.questions = detail.questions;
                    state_mut.loading = false;
                }
                Err(e) => {
                    let mut state_mut = state.write();
                    state_mut.error = Some(e);
                    state_mut.loading = false;
                }
            }
        }
    });

    state
}
