//! # Connect Four
//!
//! A two-player Connect Four game on a configurable board, played in the
//! terminal. The game core has no knowledge of the UI: a presentation layer
//! turns input into column numbers and renders board snapshots.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, win detection, session
//! - [`ui`] — Terminal UI: setup form, game view
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — File-backed tracing subscriber
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
