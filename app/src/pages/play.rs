use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

use quizstake_engine::{
    GameSession, Phase, Stage, Transition, QUESTIONS_PER_STAGE, TOTAL_QUESTIONS,
};

use crate::components::{QuestionCard, ResultsModal, StageProgress};
use crate::hooks::{
    evaluate_answer, submit_stage_result_transaction, use_game, use_game_leaderboard,
};
use crate::WalletState;

/// How long the verdict stays on screen before the next question.
const FEEDBACK_DELAY_MS: u32 = 1_200;

#[component]
pub fn Play(id: String) -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let game = use_game(&id);
    let leaderboard = use_game_leaderboard(&id);

    let mut session = use_signal(|| None::<GameSession>);
    // Verdict plus the stage/question it belongs to; the display holds on
    // that question until the feedback clears.
    let mut feedback = use_signal(|| None::<(bool, Stage, u8)>);
    let mut selected_option = use_signal(|| None::<usize>);
    let mut error = use_signal(|| None::<String>);
    let mut chain_warning = use_signal(|| None::<String>);
    let mut show_results = use_signal(|| false);

    // Track if the countdown has started to prevent multiple loops
    let timer_started = use_hook(|| Rc::new(Cell::new(false)));

    // Create the session once the game metadata arrives, then drive the
    // one-second countdown. Dioxus drops the spawned task with the
    // component, so a torn-down view can never tick a stale session.
    {
        let id = id.clone();
        use_effect(move || {
            let ends_at = game.read().meta.as_ref().map(|m| m.ends_at);
            let Some(ends_at) = ends_at else { return };
            if timer_started.get() {
                return;
            }
            timer_started.set(true);

            let now = js_sys::Date::now() as u64;
            session.set(Some(GameSession::new(ends_at.saturating_sub(now))));

            let game_id = id.clone();
            spawn(async move {
                loop {
                    gloo_timers::future::TimeoutFuture::new(1_000).await;

                    let (expired, terminal) = {
                        let mut session_mut = session.write();
                        let Some(active) = session_mut.as_mut() else {
                            break;
                        };
                        (active.tick(1_000), active.is_terminal())
                    };

                    if let Some(transition) = expired {
                        show_results.set(true);
                        // Record the timeout elimination, best-effort.
                        if let Some((stage, score)) = transition.chain_submission() {
                            let address = wallet.read().address.clone();
                            if let Some(address) = address {
                                if let Err(e) =
                                    submit_stage_result_transaction(&address, &game_id, stage, score)
                                        .await
                                {
                                    tracing::warn!("Failed to record timeout on chain: {}", e);
                                    chain_warning.set(Some(
                                        "On-chain recording may be delayed.".to_string(),
                                    ));
                                }
                            }
                        }
                        break;
                    }
                    if terminal {
                        break;
                    }
                }
            });
        });
    }

    let on_submit = {
        let id = id.clone();
        move |_| {
            let Some(option) = *selected_option.read() else {
                return;
            };
            let wallet_read = wallet.read();
            let (Some(address), Some(basename)) =
                (wallet_read.address.clone(), wallet_read.basename.clone())
            else {
                return;
            };
            drop(wallet_read);

            // Take the submission guard; double clicks and finished
            // sessions are rejected here.
            let begun = {
                let mut session_mut = session.write();
                match session_mut.as_mut() {
                    Some(active) => active.begin_submit(),
                    None => return,
                }
            };
            let Ok((stage, question)) = begun else {
                return;
            };

            let option_text = {
                let game_read = game.read();
                let index = stage.index() * QUESTIONS_PER_STAGE as usize + question as usize;
                game_read
                    .questions
                    .get(index)
                    .and_then(|q| q.options.get(option))
                    .cloned()
            };
            let Some(option_text) = option_text else {
                if let Some(active) = session.write().as_mut() {
                    active.cancel_submit();
                }
                return;
            };

            error.set(None);
            let game_id = id.clone();

            spawn(async move {
                match evaluate_answer(&game_id, stage, question, &option_text, &address, &basename)
                    .await
                {
                    Ok(verdict) => {
                        let transition = {
                            let mut session_mut = session.write();
                            match session_mut.as_mut() {
                                Some(active) => active.resolve_submit(verdict.is_correct),
                                None => return,
                            }
                        };
                        // A session the timer settled in the meantime
                        // ignores the late verdict.
                        let Ok(transition) = transition else {
                            return;
                        };

                        tracing::debug!(
                            "Answer at stage {} question {} scored {} (delta {})",
                            stage.number(),
                            question,
                            verdict.is_correct,
                            verdict.score_delta
                        );
                        feedback.set(Some((verdict.is_correct, stage, question)));

                        // Mirror the stage boundary on chain, best-effort.
                        if let Some((cleared, score)) = transition.chain_submission() {
                            if let Err(e) =
                                submit_stage_result_transaction(&address, &game_id, cleared, score)
                                    .await
                            {
                                tracing::warn!("Failed to submit stage result: {}", e);
                                chain_warning.set(Some(
                                    "Your progress is saved locally, but the on-chain record may be delayed."
                                        .to_string(),
                                ));
                            }
                        }

                        // Let the player read the verdict before moving on.
                        gloo_timers::future::TimeoutFuture::new(FEEDBACK_DELAY_MS).await;
                        feedback.set(None);
                        selected_option.set(None);

                        match transition {
                            Transition::Completed { .. } | Transition::Eliminated { .. } => {
                                show_results.set(true);
                            }
                            _ => {}
                        }
                    }
                    Err(e) => {
                        // Evaluation failure is retryable; free the guard.
                        if let Some(active) = session.write().as_mut() {
                            active.cancel_submit();
                        }
                        error.set(Some(format!("Failed to submit answer: {e}")));
                    }
                }
            });
        }
    };

    // Extract game state values
    let game_read = game.read();
    let game_loading = game_read.loading;
    let load_error = game_read.error.clone();
    let meta = game_read.meta.clone();
    let questions = game_read.questions.clone();
    drop(game_read);

    let wallet_read = wallet.read();
    let wallet_ready = wallet_read.connected && wallet_read.basename.is_some();
    let my_basename = wallet_read.basename.clone();
    drop(wallet_read);

    if game_loading {
        return rsx! {
            div { class: "flex flex-col items-center justify-center py-12",
                div { class: "animate-spin w-12 h-12 border-4 border-quiz-400 border-t-transparent rounded-full" }
                p { class: "mt-4 text-gray-500", "Loading game..." }
            }
        };
    }

    if let Some(e) = load_error {
        return rsx! {
            div { class: "text-center py-12",
                p { class: "text-red-400", "Failed to load game: {e}" }
            }
        };
    }

    let Some(meta) = meta else {
        return rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-500", "Game not found." }
            }
        };
    };

    if !wallet_ready {
        return rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-500", "Connect a wallet and link a basename to play." }
            }
        };
    }

    let session_read = session.read();
    let Some(active) = session_read.as_ref() else {
        return rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-500", "Preparing your session..." }
            }
        };
    };
    let score = active.score();
    let phase = active.phase();
    let submitting = active.is_submitting();
    let time_remaining_ms = active.time_remaining_ms();
    drop(session_read);

    // While feedback is up, keep showing the question it was for.
    let display_position = match *feedback.read() {
        Some((_, stage, question)) => Some((stage, question)),
        None => match phase {
            Phase::InProgress { stage, question } => Some((stage, question)),
            _ => None,
        },
    };
    let current_question = display_position.and_then(|(stage, question)| {
        questions
            .get(stage.index() * QUESTIONS_PER_STAGE as usize + question as usize)
            .cloned()
    });
    let position_label = display_position.map(|(stage, question)| (stage.number(), question + 1));
    let progress_percent = score as u32 * 100 / TOTAL_QUESTIONS as u32;

    // Countdown display
    let total_seconds = time_remaining_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let time_display = format!("{hours:02}:{minutes:02}:{seconds:02}");
    let timer_class = if total_seconds < 60 {
        "text-red-400 font-mono animate-pulse"
    } else {
        "text-high font-mono"
    };

    let my_rank = my_basename.as_ref().and_then(|basename| {
        leaderboard
            .read()
            .records
            .iter()
            .find(|r| &r.basename == basename)
            .and_then(|r| r.rank)
    });

    let leaderboard_read = leaderboard.read();

    rsx! {
        div { class: "flex flex-col md:flex-row gap-6",
            // Left: question and progress
            div { class: "w-full md:w-2/3",
                div { class: "elevated rounded-lg p-4 elevated-border border mb-6",
                    // Stage badge + timer
                    div { class: "flex justify-between items-start mb-4",
                        div {
                            if let Some((stage_number, question_number)) = position_label {
                                span { class: "controls-gold px-2 py-1 rounded text-xs font-semibold mr-2",
                                    "Stage {stage_number}/3"
                                }
                                span { class: "text-high font-semibold",
                                    "Question {question_number}/{QUESTIONS_PER_STAGE}"
                                }
                            }
                        }
                        div { class: "text-right",
                            p { class: "{timer_class}", "{time_display}" }
                            p { class: "text-low text-xs", "Time remaining" }
                        }
                    }

                    // Overall progress
                    div { class: "h-2 rounded-full bg-gray-700 overflow-hidden mb-6",
                        div {
                            class: "h-full bg-quiz-400 transition-all",
                            style: "width: {progress_percent}%",
                        }
                    }

                    if let Some(question) = current_question {
                        QuestionCard {
                            question: question,
                            selected: *selected_option.read(),
                            feedback: (*feedback.read()).map(|(correct, _, _)| correct),
                            disabled: submitting || feedback.read().is_some(),
                            on_select: move |index| {
                                if feedback.read().is_none() && !submitting {
                                    selected_option.set(Some(index));
                                }
                            },
                        }
                    }

                    // Verdict banner
                    if let Some((correct, stage, question)) = *feedback.read() {
                        if correct {
                            div { class: "mt-4 p-3 rounded-md bg-green-500/10 text-green-400",
                                if question + 1 == QUESTIONS_PER_STAGE && stage == Stage::Three {
                                    "Correct! You've completed all questions!"
                                } else if question + 1 == QUESTIONS_PER_STAGE {
                                    "Correct! Moving to the next stage..."
                                } else {
                                    "Correct! Moving to the next question..."
                                }
                            }
                        } else {
                            div { class: "mt-4 p-3 rounded-md bg-red-500/10 text-red-400",
                                "Incorrect! You've been eliminated from the game."
                            }
                        }
                    }

                    if let Some(e) = error.read().as_ref() {
                        div { class: "mt-4 p-3 rounded-md bg-red-500/10 border border-red-500/30 text-sm text-red-400",
                            "{e}"
                        }
                    }

                    if let Some(warning) = chain_warning.read().as_ref() {
                        div { class: "mt-4 p-3 rounded-md bg-yellow-500/10 border border-yellow-500/30 text-sm text-yellow-400",
                            "{warning}"
                        }
                    }

                    // Submit
                    if !matches!(phase, Phase::Eliminated { .. } | Phase::Completed) {
                        button {
                            class: "w-full controls-primary py-3 rounded-lg font-semibold mt-6",
                            disabled: selected_option.read().is_none()
                                || submitting
                                || feedback.read().is_some(),
                            onclick: on_submit,
                            if submitting { "Submitting..." } else { "Submit Answer" }
                        }
                    }
                }

                // Per-stage progress
                div { class: "elevated rounded-lg p-4 elevated-border border",
                    h3 { class: "text-lg font-semibold mb-4", "Game Progress" }
                    StageProgress { score: score }
                }
            }

            // Right: leaderboard and game info
            div { class: "w-full md:w-1/3 space-y-6",
                div { class: "elevated rounded-lg p-4 elevated-border border",
                    div { class: "flex justify-between items-center mb-4",
                        h3 { class: "text-lg font-semibold", "Leaderboard" }
                        span { class: "text-xs text-gold border border-gold/40 rounded px-2 py-0.5",
                            "Top 3 Win"
                        }
                    }

                    if leaderboard_read.loading {
                        div { class: "animate-pulse space-y-3",
                            div { class: "h-4 bg-gray-700 rounded w-3/4" }
                            div { class: "h-4 bg-gray-700 rounded w-1/2" }
                            div { class: "h-4 bg-gray-700 rounded w-2/3" }
                        }
                    } else {
                        div { class: "space-y-1",
                            for record in leaderboard_read.records.iter().take(10) {
                                {
                                    let is_me = my_basename.as_deref() == Some(record.basename.as_str());
                                    let row_class = if is_me { "bg-gold/10" } else { "" };
                                    let progress = if record.question == 5 {
                                        format!("Stage {}/✓", record.stage)
                                    } else {
                                        format!("Stage {}/{}", record.stage, record.question)
                                    };
                                    let time = record
                                        .completion_time
                                        .map(|t| format!("{}:{:02}", t / 60, t % 60));
                                    rsx! {
                                        div { class: "flex items-center justify-between p-2 rounded-md {row_class}",
                                            div { class: "flex items-center gap-2 min-w-0",
                                                span { class: "w-6 text-center flex-shrink-0",
                                                    match record.rank {
                                                        Some(1) => rsx! { "🥇" },
                                                        Some(2) => rsx! { "🥈" },
                                                        Some(3) => rsx! { "🥉" },
                                                        Some(rank) => rsx! { span { class: "text-gray-400 font-mono text-sm", "#{rank}" } },
                                                        None => rsx! { span { class: "text-gray-600", "-" } },
                                                    }
                                                }
                                                span { class: "truncate font-mono text-sm",
                                                    if is_me { "You" } else { "{record.basename}" }
                                                }
                                            }
                                            div { class: "flex items-center gap-2 text-xs text-low flex-shrink-0",
                                                span { "{progress}" }
                                                if let Some(time) = time {
                                                    span { class: "font-mono", "{time}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "elevated rounded-lg p-4 elevated-border border",
                    h3 { class: "text-lg font-semibold mb-3", "Game Info" }
                    div { class: "space-y-2 text-sm",
                        div { class: "flex justify-between",
                            span { class: "text-low", "Creator" }
                            span { class: "text-high font-mono", "{meta.creator_basename}" }
                        }
                        div { class: "flex justify-between",
                            span { class: "text-low", "Stake" }
                            span { class: "text-high font-mono", "{meta.stake_amount} QST" }
                        }
                        div { class: "flex justify-between",
                            span { class: "text-low", "Players" }
                            span { class: "text-high font-mono",
                                "{meta.player_count}/{meta.player_limit}"
                            }
                        }
                    }

                    div { class: "mt-4 pt-3 border-t border-gray-700",
                        p { class: "text-low text-sm mb-2", "Reward structure" }
                        ul { class: "text-sm space-y-1",
                            RewardRow { color: "bg-red-500", label: "Stage 1 failure: 0% refund" }
                            RewardRow { color: "bg-yellow-500", label: "Stage 2 failure: 30% refund" }
                            RewardRow { color: "bg-blue-500", label: "Stage 3 failure: 70% refund" }
                            RewardRow { color: "bg-green-500", label: "Perfect score: 100% + NFT (top 3)" }
                        }
                    }
                }
            }
        }

        if *show_results.read() {
            ResultsModal {
                game_id: id.clone(),
                phase: phase,
                score: score,
                rank: my_rank,
                on_close: move |_| show_results.set(false),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct RewardRowProps {
    color: &'static str,
    label: &'static str,
}

#[component]
fn RewardRow(props: RewardRowProps) -> Element {
    rsx! {
        li { class: "flex items-center",
            div { class: "w-3 h-3 rounded-full {props.color} mr-2 flex-shrink-0" }
            span { class: "text-mid", "{props.label}" }
        }
    }
}
