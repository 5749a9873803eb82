use dioxus::prelude::*;
use quizstake_engine::{QUESTIONS_PER_STAGE, STAGE_COUNT};

/// Per-stage progress bars derived from the running score: each bar fills
/// as the five questions of its stage are answered correctly.
#[component]
pub fn StageProgress(score: u8) -> Element {
    rsx! {
        div { class: "space-y-4",
            for s in 1..=STAGE_COUNT {
                {
                    let answered = (score as i32 - (s as i32 - 1) * QUESTIONS_PER_STAGE as i32)
                        .clamp(0, QUESTIONS_PER_STAGE as i32);
                    let percent = answered * 100 / QUESTIONS_PER_STAGE as i32;
                    rsx! {
                        div {
                            div { class: "flex justify-between items-center mb-2",
                                span { class: "text-sm font-medium", "Stage {s}" }
                                span { class: "text-sm text-low", "{answered}/{QUESTIONS_PER_STAGE}" }
                            }
                            div { class: "h-2 rounded-full bg-gray-700 overflow-hidden",
                                div {
                                    class: "h-full bg-quiz-400 transition-all",
                                    style: "width: {percent}%",
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
