use dioxus::prelude::*;
use quizstake_engine::{Question, TOTAL_QUESTIONS};

use crate::hooks::{create_game, create_game_transaction, generate_questions, CreateGameRequest};
use crate::route::Route;
use crate::WalletState;

/// Three-step wizard: generate questions from a social handle, pick the
/// stake parameters, then register the game with the API and on chain.
#[component]
pub fn CreateGame() -> Element {
    let wallet = use_context::<Signal<WalletState>>();

    let mut step = use_signal(|| 1u8);
    let mut username = use_signal(String::new);
    let mut questions = use_signal(Vec::<Question>::new);
    let mut generating = use_signal(|| false);
    let mut stake_amount = use_signal(|| 5u64);
    let mut player_limit = use_signal(|| 10u32);
    let mut duration_hours = use_signal(|| 24u64);
    let mut creating = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut created_tx = use_signal(|| None::<String>);

    let wallet_read = wallet.read();
    let wallet_ready = wallet_read.connected && wallet_read.basename.is_some();
    let address = wallet_read.address.clone();
    let basename = wallet_read.basename.clone();
    drop(wallet_read);

    let handle_display = username.read().trim().to_string();
    let question_count = questions.read().len();

    let generate = move |_| {
        let handle = username.read().trim().to_string();
        if handle.is_empty() || *generating.read() {
            return;
        }

        generating.set(true);
        error.set(None);

        spawn(async move {
            match generate_questions(&handle).await {
                Ok(generated) => {
                    questions.set(generated);
                    generating.set(false);
                    step.set(2);
                }
                Err(e) => {
                    error.set(Some(format!("Failed to generate questions: {e}")));
                    generating.set(false);
                }
            }
        });
    };

    let create = {
        let address = address.clone();
        let basename = basename.clone();
        move |_| {
            let (Some(address), Some(basename)) = (address.clone(), basename.clone()) else {
                return;
            };
            if *creating.read() {
                return;
            }

            let request = CreateGameRequest {
                basename,
                stake_amount: *stake_amount.read(),
                player_limit: *player_limit.read(),
                duration: *duration_hours.read() * 3600,
                username: username.read().trim().to_string(),
            };

            creating.set(true);
            error.set(None);

            spawn(async move {
                // The API commits the question hashes, then the wallet
                // registers the game under the creator's basename node.
                let result: Result<String, String> = async {
                    let game = create_game(&request).await?;
                    tracing::info!(
                        "Game {} registered with {} question hashes",
                        game.id,
                        game.question_hashes.len()
                    );
                    create_game_transaction(&address, &request.basename).await
                }
                .await;

                match result {
                    Ok(tx) => {
                        created_tx.set(Some(tx));
                        step.set(4);
                    }
                    Err(e) => {
                        error.set(Some(format!("Failed to create game: {e}")));
                    }
                }
                creating.set(false);
            });
        }
    };

    rsx! {
        div { class: "max-w-2xl mx-auto",
            h1 { class: "text-3xl font-bold mb-2", "Create a Game" }
            p { class: "text-low mb-8",
                "Questions are generated from a public social feed; answers stay server-side as hashes."
            }

            if !wallet_ready {
                div { class: "mb-6 p-3 elevated rounded-lg elevated-border border text-sm text-low",
                    "Connect a wallet and link a basename to create a game."
                }
            }

            // Step indicator
            div { class: "flex items-center gap-2 mb-8",
                for s in 1..=3u8 {
                    {
                        let active = *step.read() >= s;
                        let class = if active { "controls-gold" } else { "elevated-control" };
                        rsx! {
                            div { class: "{class} h-8 w-8 rounded-full flex items-center justify-center text-sm font-bold",
                                "{s}"
                            }
                            if s < 3 {
                                div { class: "flex-1 h-px bg-gray-700" }
                            }
                        }
                    }
                }
            }

            if let Some(e) = error.read().as_ref() {
                div { class: "mb-6 p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-sm text-red-400",
                    "{e}"
                }
            }

            // Step 1: social handle
            if *step.read() == 1 {
                div { class: "card",
                    h3 { class: "text-lg font-semibold mb-4", "Whose feed are the questions about?" }
                    input {
                        class: "w-full elevated-control rounded px-3 py-2 mb-4 font-mono outline-none",
                        placeholder: "social handle, e.g. vitalik",
                        value: "{username}",
                        oninput: move |e| username.set(e.value()),
                    }
                    button {
                        class: "w-full controls-primary py-3 rounded-lg font-semibold",
                        disabled: username.read().trim().is_empty() || *generating.read(),
                        onclick: generate,
                        if *generating.read() { "Generating questions..." } else { "Generate {TOTAL_QUESTIONS} questions" }
                    }
                }
            }

            // Step 2: stake parameters
            if *step.read() == 2 {
                div { class: "card space-y-4",
                    h3 { class: "text-lg font-semibold", "Game parameters" }

                    div {
                        p { class: "text-low text-sm mb-2", "Stake (QST)" }
                        input {
                            class: "w-full elevated-control rounded px-3 py-2 font-mono outline-none",
                            r#type: "number",
                            min: "1",
                            value: "{stake_amount}",
                            oninput: move |e| {
                                if let Ok(value) = e.value().parse::<u64>() {
                                    stake_amount.set(value);
                                }
                            }
                        }
                    }

                    div {
                        p { class: "text-low text-sm mb-2", "Player limit" }
                        input {
                            class: "w-full elevated-control rounded px-3 py-2 font-mono outline-none",
                            r#type: "number",
                            min: "2",
                            value: "{player_limit}",
                            oninput: move |e| {
                                if let Ok(value) = e.value().parse::<u32>() {
                                    player_limit.set(value);
                                }
                            }
                        }
                    }

                    div {
                        p { class: "text-low text-sm mb-2", "Duration (hours)" }
                        input {
                            class: "w-full elevated-control rounded px-3 py-2 font-mono outline-none",
                            r#type: "number",
                            min: "1",
                            value: "{duration_hours}",
                            oninput: move |e| {
                                if let Ok(value) = e.value().parse::<u64>() {
                                    duration_hours.set(value);
                                }
                            }
                        }
                    }

                    div { class: "flex gap-3 pt-2",
                        button {
                            class: "btn btn-secondary px-4 py-2",
                            onclick: move |_| step.set(1),
                            "Back"
                        }
                        button {
                            class: "flex-1 controls-primary py-2 rounded-lg font-semibold",
                            onclick: move |_| step.set(3),
                            "Review"
                        }
                    }
                }
            }

            // Step 3: review and create
            if *step.read() == 3 {
                div { class: "card space-y-4",
                    h3 { class: "text-lg font-semibold", "Review" }

                    div { class: "space-y-2 text-sm",
                        ReviewRow { label: "Questions about", value: "@{handle_display}" }
                        ReviewRow { label: "Questions generated", value: "{question_count}" }
                        ReviewRow { label: "Stake", value: "{stake_amount} QST" }
                        ReviewRow { label: "Player limit", value: "{player_limit}" }
                        ReviewRow { label: "Duration", value: "{duration_hours}h" }
                    }

                    if let Some(first) = questions.read().first() {
                        div { class: "elevated-control rounded p-3 text-sm text-mid",
                            p { class: "text-low text-xs mb-1", "Sample question" }
                            "{first.text}"
                        }
                    }

                    div { class: "flex gap-3 pt-2",
                        button {
                            class: "btn btn-secondary px-4 py-2",
                            onclick: move |_| step.set(2),
                            "Back"
                        }
                        button {
                            class: "flex-1 controls-primary py-2 rounded-lg font-semibold",
                            disabled: !wallet_ready || *creating.read(),
                            onclick: create,
                            if *creating.read() { "Creating..." } else { "Create game" }
                        }
                    }
                }
            }

            // Step 4: done
            if *step.read() == 4 {
                div { class: "card text-center space-y-4",
                    div { class: "text-4xl", "🎉" }
                    h3 { class: "text-lg font-semibold", "Game created" }
                    if let Some(tx) = created_tx.read().as_ref() {
                        {
                            let explorer_url = format!("https://sepolia.basescan.org/tx/{}", tx);
                            rsx! {
                                a {
                                    href: "{explorer_url}",
                                    target: "_blank",
                                    class: "text-green-400 underline text-sm",
                                    "View transaction"
                                }
                            }
                        }
                    }
                    Link {
                        to: Route::Marketplace {},
                        class: "btn btn-primary inline-block px-6 py-2",
                        "Back to games"
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ReviewRowProps {
    label: &'static str,
    value: String,
}

#[component]
fn ReviewRow(props: ReviewRowProps) -> Element {
    rsx! {
        div { class: "flex justify-between",
            span { class: "text-low", "{props.label}" }
            span { class: "text-high font-mono", "{props.value}" }
        }
    }
}
