//! Terminal UI: play Connect Four against the search engine.

mod app;
mod game_view;

pub use app::{App, MAX_UI_DEPTH};
