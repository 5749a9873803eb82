use dioxus::prelude::*;

use crate::route::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "max-w-4xl mx-auto text-center py-16",
            // Hero
            h1 { class: "text-5xl font-bold mb-6",
                span { class: "text-quiz-400", "QUIZ" }
                span { class: "text-gray-100", "STAKE" }
            }

            p { class: "text-xl text-gray-400 mb-8 max-w-2xl mx-auto",
                "Staked trivia on Base. Fifteen questions generated from a "
                "social feed, three elimination stages, and NFT trophies for "
                "the three fastest perfect scores."
            }

            // CTA buttons
            div { class: "flex justify-center gap-4 mb-16",
                Link {
                    to: Route::Marketplace {},
                    class: "btn btn-primary text-lg px-8 py-3",
                    "Browse Games"
                }
                Link {
                    to: Route::CreateGame {},
                    class: "btn btn-secondary text-lg px-8 py-3",
                    "Create a Game"
                }
            }

            // How it works
            div { class: "grid md:grid-cols-3 gap-8 mt-16",
                FeatureCard {
                    title: "Stake",
                    description: "Commit QST tokens to join a game before it fills up.",
                    icon: "🎟️",
                }
                FeatureCard {
                    title: "Answer",
                    description: "Clear three stages of five questions. One wrong answer ends your run.",
                    icon: "🧠",
                }
                FeatureCard {
                    title: "Win",
                    description: "Finish all fifteen for a full refund. The three fastest also mint an NFT.",
                    icon: "🏆",
                }
            }

            // Refund breakdown
            div { class: "mt-16 card max-w-xl mx-auto",
                h3 { class: "text-xl font-semibold text-quiz-400 mb-4", "Refund Structure" }
                div { class: "text-left space-y-2 text-gray-300",
                    p {
                        span { class: "text-gray-500", "Eliminated at stage 1: " }
                        "0% refund"
                    }
                    p {
                        span { class: "text-gray-500", "Eliminated at stage 2: " }
                        "30% refund"
                    }
                    p {
                        span { class: "text-gray-500", "Eliminated at stage 3: " }
                        "70% refund"
                    }
                    p {
                        span { class: "text-gray-500", "Perfect score: " }
                        span { class: "text-quiz-400 font-semibold", "100% refund + NFT for the top 3" }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FeatureCardProps {
    title: &'static str,
    description: &'static str,
    icon: &'static str,
}

#[component]
fn FeatureCard(props: FeatureCardProps) -> Element {
    rsx! {
        div { class: "card text-center",
            div { class: "text-4xl mb-4", "{props.icon}" }
            h3 { class: "text-lg font-semibold text-quiz-400 mb-2", "{props.title}" }
            p { class: "text-gray-400", "{props.description}" }
        }
    }
}
