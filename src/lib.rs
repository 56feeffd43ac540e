//! # Connect Four search
//!
//! Connect Four with an automated opponent driven by a depth-limited minimax
//! search with alpha-beta pruning, immediate win/block shortcuts, and a
//! bounded breadth-first position estimator. Ships with a Ratatui terminal UI
//! and an `analyze` command-line tool.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, the immutable search `Position`, live game state
//! - [`ai`]: Win/draw detection, heuristic, move generation, search engine, agents
//! - [`ui`]: Terminal UI for playing against the engine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
