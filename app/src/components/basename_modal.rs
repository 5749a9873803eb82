use dioxus::prelude::*;

use crate::hooks::{link_basename, save_session, WalletSession};
use crate::WalletState;

/// Link a human-readable basename to the connected address. The linked name
/// is persisted through the session repository and shown on leaderboards.
#[component]
pub fn BasenameModal(on_close: EventHandler<()>) -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let mut handle = use_signal(String::new);
    let mut linking = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let username = handle.read().trim().to_string();
        if username.is_empty() || *linking.read() {
            return;
        }
        let Some(address) = wallet.read().address.clone() else {
            return;
        };

        linking.set(true);
        error.set(None);

        spawn(async move {
            match link_basename(&address, &username).await {
                Ok(linked) => {
                    save_session(&WalletSession {
                        address,
                        basename: Some(linked.basename.clone()),
                    });
                    wallet.write().basename = Some(linked.basename);
                    linking.set(false);
                    on_close.call(());
                }
                Err(e) => {
                    error.set(Some(e));
                    linking.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/60",
            div { class: "elevated rounded-lg p-6 w-full max-w-sm elevated-border border",
                h3 { class: "text-lg font-semibold mb-2", "Link a basename" }
                p { class: "text-low text-sm mb-4",
                    "Your basename is how other players see you. It is registered from your social handle."
                }
                input {
                    class: "w-full elevated-control rounded px-3 py-2 mb-3 font-mono text-sm outline-none",
                    placeholder: "social handle",
                    value: "{handle}",
                    oninput: move |e| handle.set(e.value()),
                }
                if let Some(e) = error.read().as_ref() {
                    p { class: "text-red-400 text-sm mb-3", "{e}" }
                }
                div { class: "flex justify-end gap-2",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: *linking.read() || handle.read().trim().is_empty(),
                        onclick: submit,
                        if *linking.read() { "Linking..." } else { "Link" }
                    }
                }
            }
        }
    }
}
