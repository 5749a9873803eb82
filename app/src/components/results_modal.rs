use dioxus::prelude::*;
use quizstake_engine::{settle, Phase};

use crate::hooks::claim_refund_transaction;
use crate::route::Route;
use crate::WalletState;

#[derive(Props, Clone, PartialEq)]
pub struct ResultsModalProps {
    pub game_id: String,
    pub phase: Phase,
    pub score: u8,
    pub rank: Option<u32>,
    pub on_close: EventHandler<()>,
}

/// Terminal-state dialog: renders the settlement table entry for the way
/// the session ended and offers the on-chain refund claim.
#[component]
pub fn ResultsModal(props: ResultsModalProps) -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let mut claiming = use_signal(|| false);
    let mut claim_result = use_signal(|| None::<Result<String, String>>);

    // Nothing to show while the session is still running.
    let Some(settlement) = settle(props.phase, props.rank) else {
        return rsx! {};
    };

    let completed = matches!(props.phase, Phase::Completed);
    let subtitle = match props.phase {
        Phase::Completed => "You answered all 15 questions correctly.".to_string(),
        Phase::Eliminated { stage } => format!(
            "You've been eliminated at stage {} with {} correct answers.",
            stage.number(),
            props.score
        ),
        Phase::InProgress { .. } => String::new(),
    };
    let is_winner = settlement.nft_eligible;
    let game_id = props.game_id.clone();

    let claim_refund = move |_| {
        let game_id = game_id.clone();
        let address = wallet.read().address.clone();

        if let Some(address) = address {
            claiming.set(true);
            claim_result.set(None);

            spawn(async move {
                let result = claim_refund_transaction(&address, &game_id).await;
                claim_result.set(Some(result));
                claiming.set(false);
            });
        }
    };

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/60",
            div { class: "elevated rounded-lg p-6 w-full max-w-md elevated-border border text-center",
                h2 { class: "text-xl font-bold mb-1",
                    if completed { "Game Completed!" } else { "Game Over" }
                }
                p { class: "text-low text-sm mb-6", "{subtitle}" }

                // Trophy / rank badge
                div { class: "flex justify-center mb-6",
                    if is_winner {
                        div { class: "relative",
                            div { class: "h-20 w-20 rounded-full bg-gold/20 flex items-center justify-center text-4xl",
                                "🏆"
                            }
                            if let Some(rank) = props.rank {
                                div { class: "absolute -bottom-2 -right-2 h-9 w-9 rounded-full controls-gold flex items-center justify-center text-lg font-bold",
                                    "#{rank}"
                                }
                            }
                        }
                    } else if completed {
                        div { class: "h-20 w-20 rounded-full bg-blue-500/20 flex items-center justify-center text-4xl",
                            "🏆"
                        }
                    } else {
                        div { class: "h-20 w-20 rounded-full bg-red-500/20 flex items-center justify-center text-4xl",
                            "✖"
                        }
                    }
                }

                if is_winner {
                    p { class: "text-gold mb-2", "Top 3 finish - you've earned an NFT and a token reward!" }
                    p { class: "text-low text-xs mb-4",
                        "Winner NFT mints from "
                        code { class: "text-gold", "{crate::NFT_CONTRACT}" }
                    }
                }

                // Settlement breakdown
                div { class: "grid grid-cols-2 gap-4 mb-6",
                    div { class: "elevated-control rounded-lg p-3",
                        p { class: "text-low text-sm mb-1", "Refund" }
                        p { class: "text-high font-mono text-xl", "{settlement.refund_percent}%" }
                    }
                    div { class: "elevated-control rounded-lg p-3",
                        p { class: "text-low text-sm mb-1", "Reward" }
                        p { class: "text-high font-mono text-xl",
                            if settlement.token_reward > 0 {
                                "+{settlement.token_reward} QST"
                            } else {
                                "0 QST"
                            }
                        }
                    }
                }

                // Claim + navigation
                div { class: "flex justify-center gap-3",
                    if settlement.refund_percent > 0 {
                        button {
                            class: "controls-gold px-4 py-2 rounded font-semibold",
                            disabled: *claiming.read(),
                            onclick: claim_refund,
                            if *claiming.read() { "Claiming..." } else { "Claim refund" }
                        }
                    }
                    Link {
                        to: Route::Marketplace {},
                        class: "btn btn-secondary px-4 py-2",
                        "Play again"
                    }
                    button {
                        class: "btn btn-secondary px-4 py-2",
                        onclick: move |_| props.on_close.call(()),
                        "Close"
                    }
                }

                // Claim result
                if let Some(result) = claim_result.read().as_ref() {
                    match result {
                        Ok(tx) => {
                            let explorer_url = format!("https://sepolia.basescan.org/tx/{}", tx);
                            rsx! {
                                div { class: "mt-4 p-2 bg-green-500/10 border border-green-500/30 rounded text-sm",
                                    a {
                                        href: "{explorer_url}",
                                        target: "_blank",
                                        class: "text-green-400 underline",
                                        "View claim transaction"
                                    }
                                }
                            }
                        }
                        Err(e) => {
                            rsx! {
                                div { class: "mt-4 p-2 bg-red-500/10 border border-red-500/30 rounded text-sm text-red-400",
                                    "{e}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
