use dioxus::prelude::*;

use crate::hooks::use_global_leaderboard;

#[component]
pub fn Leaderboard() -> Element {
    let leaderboard = use_global_leaderboard();
    let mut search = use_signal(String::new);

    let state = leaderboard.read();

    rsx! {
        div { class: "max-w-4xl mx-auto",
            div { class: "flex justify-between items-center mb-8",
                h1 { class: "text-3xl font-bold", "Global Leaderboard" }
                input {
                    class: "elevated-control rounded px-3 py-2 text-sm w-64 outline-none",
                    placeholder: "Search by basename",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                }
            }

            div { class: "card",
                if state.loading {
                    div { class: "text-center py-12",
                        div { class: "animate-spin w-8 h-8 border-2 border-quiz-400 border-t-transparent rounded-full mx-auto mb-4" }
                        p { class: "text-gray-500", "Loading leaderboard..." }
                    }
                } else if let Some(error) = &state.error {
                    div { class: "text-center py-12",
                        p { class: "text-red-400", "Error: {error}" }
                    }
                } else if state.standings.is_empty() {
                    div { class: "text-center py-12",
                        p { class: "text-gray-500", "No games finished yet. Be the first!" }
                    }
                } else {
                    // Header
                    div { class: "grid grid-cols-6 gap-4 pb-3 border-b border-gray-700 text-sm text-gray-500",
                        div { "Rank" }
                        div { class: "col-span-2", "Basename" }
                        div { class: "text-right", "Wins" }
                        div { class: "text-right", "Win Rate" }
                        div { class: "text-right", "NFTs" }
                    }

                    // Entries
                    div { class: "divide-y divide-gray-800",
                        for (i, standing) in state
                            .standings
                            .iter()
                            .filter(|s| {
                                let term = search.read().to_lowercase();
                                term.is_empty() || s.basename.to_lowercase().contains(&term)
                            })
                            .enumerate()
                        {
                            {
                                let rank = i + 1;
                                let win_rate = if standing.games_played > 0 {
                                    standing.games_won as f64 / standing.games_played as f64 * 100.0
                                } else {
                                    0.0
                                };
                                rsx! {
                                    div { class: "grid grid-cols-6 gap-4 py-3 items-center",
                                        // Rank
                                        div {
                                            if rank <= 3 {
                                                span { class: "text-2xl",
                                                    match rank {
                                                        1 => "🥇",
                                                        2 => "🥈",
                                                        3 => "🥉",
                                                        _ => "",
                                                    }
                                                }
                                            } else {
                                                span { class: "text-gray-400 font-mono", "#{rank}" }
                                            }
                                        }

                                        // Basename
                                        div { class: "col-span-2 font-mono text-sm text-gray-300",
                                            "{standing.basename}"
                                        }

                                        // Wins
                                        div { class: "text-right",
                                            span { class: "font-mono text-quiz-400", "{standing.games_won}" }
                                            span { class: "text-xs text-gray-500", " / {standing.games_played}" }
                                        }

                                        // Win rate
                                        div { class: "text-right font-mono text-gray-400",
                                            "{win_rate:.1}%"
                                        }

                                        // NFTs
                                        div { class: "text-right font-mono text-gold",
                                            "{standing.nfts}"
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
