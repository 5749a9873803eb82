use dioxus::prelude::*;
use quizstake_engine::GameMeta;

use crate::hooks::{fetch_games, join_game, join_game_transaction};
use crate::route::Route;
use crate::WalletState;

#[component]
pub fn Marketplace() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let nav = navigator();

    let mut games = use_signal(Vec::<GameMeta>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    // Id of the game a join is in flight for
    let mut joining = use_signal(|| None::<String>);
    let mut join_error = use_signal(|| None::<String>);

    let _resource = use_resource(move || async move {
        match fetch_games().await {
            Ok(list) => {
                games.set(list);
                loading.set(false);
            }
            Err(e) => {
                error.set(Some(e));
                loading.set(false);
            }
        }
    });

    let wallet_read = wallet.read();
    let wallet_ready = wallet_read.connected && wallet_read.basename.is_some();
    let address = wallet_read.address.clone();
    let basename = wallet_read.basename.clone();
    drop(wallet_read);

    let games_list = games.read().clone();

    rsx! {
        div { class: "max-w-4xl mx-auto",
            div { class: "flex justify-between items-center mb-8",
                h1 { class: "text-3xl font-bold", "Open Games" }
                Link {
                    to: Route::CreateGame {},
                    class: "btn btn-primary",
                    "Create a Game"
                }
            }

            if !wallet_ready {
                div { class: "mb-6 p-3 elevated rounded-lg elevated-border border text-sm text-low",
                    "Connect a wallet and link a basename to join games."
                }
            }

            if let Some(e) = join_error.read().as_ref() {
                div { class: "mb-6 p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-sm text-red-400",
                    "{e}"
                }
            }

            if *loading.read() {
                div { class: "text-center py-12",
                    div { class: "animate-spin w-8 h-8 border-2 border-quiz-400 border-t-transparent rounded-full mx-auto mb-4" }
                    p { class: "text-gray-500", "Loading games..." }
                }
            } else if let Some(e) = error.read().as_ref() {
                div { class: "text-center py-12",
                    p { class: "text-red-400", "Error: {e}" }
                }
            } else if games_list.is_empty() {
                div { class: "text-center py-12",
                    p { class: "text-gray-500", "No open games right now. Create one!" }
                }
            } else {
                div { class: "grid md:grid-cols-2 gap-4",
                    for game in games_list.iter().cloned() {
                        {
                            let game_id = game.id.clone();
                            let full = game.player_count >= game.player_limit;
                            let in_flight = joining.read().as_deref() == Some(game.id.as_str());
                            let address = address.clone();
                            let basename = basename.clone();
                            rsx! {
                                div { class: "elevated rounded-lg p-4 elevated-border border",
                                    div { class: "flex justify-between items-start mb-3",
                                        div {
                                            p { class: "text-high font-mono", "{game.creator_basename}" }
                                            p { class: "text-low text-xs", "Game #{game.id}" }
                                        }
                                        span { class: "text-gold font-mono", "{game.stake_amount} QST" }
                                    }

                                    div { class: "space-y-1 text-sm mb-4",
                                        div { class: "flex justify-between",
                                            span { class: "text-low", "Players" }
                                            span { class: "text-high font-mono",
                                                "{game.player_count}/{game.player_limit}"
                                            }
                                        }
                                        div { class: "flex justify-between",
                                            span { class: "text-low", "Ends in" }
                                            span { class: "text-high font-mono", {format_time_left(game.ends_at)} }
                                        }
                                    }

                                    button {
                                        class: "w-full controls-primary py-2 rounded-lg font-semibold",
                                        disabled: !wallet_ready || full || joining.read().is_some(),
                                        onclick: move |_| {
                                            let (Some(address), Some(basename)) = (address.clone(), basename.clone()) else {
                                                return;
                                            };
                                            let game_id = game_id.clone();

                                            joining.set(Some(game_id.clone()));
                                            join_error.set(None);

                                            spawn(async move {
                                                // The API authorizes the join, then the wallet stakes.
                                                let result: Result<String, String> = async {
                                                    let ticket = join_game(&game_id, &address, &basename).await?;
                                                    join_game_transaction(&address, &game_id, &basename, &ticket.signature)
                                                        .await
                                                }
                                                .await;

                                                match result {
                                                    Ok(tx) => {
                                                        tracing::info!("Joined game {}: {}", game_id, tx);
                                                        nav.push(Route::Play { id: game_id });
                                                    }
                                                    Err(e) => {
                                                        join_error.set(Some(format!("Failed to join: {e}")));
                                                    }
                                                }
                                                joining.set(None);
                                            });
                                        },
                                        if in_flight {
                                            "Joining..."
                                        } else if full {
                                            "Full"
                                        } else {
                                            "Join for {game.stake_amount} QST"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_time_left(ends_at_ms: u64) -> String {
    let now = js_sys::Date::now() as u64;
    let remaining_secs = ends_at_ms.saturating_sub(now) / 1000;
    if remaining_secs == 0 {
        return "ended".to_string();
    }
    let hours = remaining_secs / 3600;
    let minutes = (remaining_secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
