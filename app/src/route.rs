use dioxus::prelude::*;

use crate::components::Layout;
use crate::pages::{CreateGame, Home, Leaderboard, Marketplace, Play};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Marketplace {},  // Game list first - players pick a game immediately
    #[route("/about")]
    Home {},
    #[route("/create")]
    CreateGame {},
    #[route("/game/:id")]
    Play { id: String },
    #[route("/leaderboard")]
    Leaderboard {},
}
