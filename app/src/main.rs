#![allow(non_snake_case)]

mod components;
mod hooks;
mod pages;
mod route;

use dioxus::prelude::*;
use route::Route;

// Configuration
pub const API_URL: &str = "https://api.quizstake.xyz";
pub const RPC_URL: &str = "https://sepolia.base.org";
pub const CHAIN_ID: u64 = 84532;

// Contract addresses (Base Sepolia deployment)
pub const GAME_CONTRACT: &str = "0x5C0eD3b4F8a91c7D2E6f04b8A3d9E1c5B7a62F18";
pub const TOKEN_CONTRACT: &str = "0x8B44aC9D517eF0b3D2C6A98e41F5b0E7d3c1A2f9";
pub const NFT_CONTRACT: &str = "0x3E7a91B5c6D8F20e4A1d7C3b9F0E5a82D4c6B1e0";

fn main() {
    #[cfg(feature = "web")]
    {
        tracing_wasm::set_as_global_default();
        dioxus::launch(App);
    }

    #[cfg(feature = "desktop")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    // Global state providers
    let mut wallet = use_context_provider(|| Signal::new(WalletState::default()));

    // Restore a previously linked wallet session from the session repository.
    use_hook(move || {
        if let Some(session) = hooks::load_session() {
            let mut wallet_mut = wallet.write();
            wallet_mut.connected = true;
            wallet_mut.address = Some(session.address);
            wallet_mut.basename = session.basename;
        }
    });

    rsx! {
        Router::<Route> {}
    }
}

// Global state types
#[derive(Clone, Default, Debug)]
pub struct WalletState {
    pub connected: bool,
    pub address: Option<String>,
    pub basename: Option<String>,
    /// Whole-token QST balance, refreshed in the background.
    pub balance: Option<u64>,
}
