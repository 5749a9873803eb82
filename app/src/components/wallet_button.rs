use dioxus::prelude::*;
use futures::StreamExt;

use crate::components::BasenameModal;
use crate::hooks::{clear_session, connect_wallet, fetch_token_balance, save_session, WalletSession};
use crate::WalletState;

#[derive(Clone)]
enum WalletAction {
    Connect,
}

#[component]
pub fn WalletButton() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let mut show_basename_modal = use_signal(|| false);

    // Use coroutine for lifecycle-safe async operations
    let wallet_coro = use_coroutine(move |mut rx: UnboundedReceiver<WalletAction>| {
        async move {
            while let Some(action) = rx.next().await {
                match action {
                    WalletAction::Connect => match connect_wallet().await {
                        Ok(address) => {
                            let basename = wallet.read().basename.clone();
                            save_session(&WalletSession {
                                address: address.clone(),
                                basename,
                            });
                            let mut wallet_mut = wallet.write();
                            wallet_mut.connected = true;
                            wallet_mut.address = Some(address);
                        }
                        Err(e) => {
                            tracing::error!("Wallet connection failed: {}", e);
                        }
                    },
                }
            }
        }
    });

    // Poll the QST balance while a wallet is connected
    use_future(move || async move {
        loop {
            let address = wallet.read().address.clone();
            if let Some(address) = address {
                match fetch_token_balance(&address).await {
                    Ok(balance) => {
                        wallet.write().balance = Some(balance);
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch balance: {}", e);
                    }
                }
            }
            gloo_timers::future::TimeoutFuture::new(15_000).await;
        }
    });

    let request_connect = move |_| {
        wallet_coro.send(WalletAction::Connect);
    };

    let disconnect_wallet = move |_| {
        clear_session();
        let mut wallet_mut = wallet.write();
        wallet_mut.connected = false;
        wallet_mut.address = None;
        wallet_mut.basename = None;
        wallet_mut.balance = None;
    };

    let wallet_read = wallet.read();

    if wallet_read.connected {
        let address = wallet_read.address.clone().unwrap_or_default();
        let short_address = if address.len() > 10 {
            format!("{}...{}", &address[..6], &address[address.len() - 4..])
        } else {
            address.clone()
        };
        let basename = wallet_read.basename.clone();
        let balance = wallet_read.balance;

        rsx! {
            div { class: "flex items-center space-x-2",
                if let Some(balance) = balance {
                    span { class: "text-sm text-gold font-mono", "{balance} QST" }
                }
                if let Some(name) = basename {
                    button {
                        class: "text-sm text-quiz-400 font-mono",
                        onclick: move |_| show_basename_modal.set(true),
                        "{name}"
                    }
                } else {
                    button {
                        class: "btn btn-secondary text-sm",
                        onclick: move |_| show_basename_modal.set(true),
                        "Set basename"
                    }
                }
                span { class: "text-sm text-gray-400 font-mono", "{short_address}" }
                button {
                    class: "btn btn-secondary text-sm",
                    onclick: disconnect_wallet,
                    "Disconnect"
                }
            }
            if *show_basename_modal.read() {
                BasenameModal { on_close: move |_| show_basename_modal.set(false) }
            }
        }
    } else {
        rsx! {
            button {
                class: "btn btn-primary",
                onclick: request_connect,
                "Connect Wallet"
            }
        }
    }
}
