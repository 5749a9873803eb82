use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "quizstake.session";

/// Wallet identity persisted across page loads. Every browser-storage
/// access goes through these typed operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: String,
    pub basename: Option<String>,
}

pub fn load_session() -> Option<WalletSession> {
    LocalStorage::get(SESSION_KEY).ok()
}

pub fn save_session(session: &WalletSession) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
        tracing::warn!("Failed to persist wallet session: {}", e);
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}
