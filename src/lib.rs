//! # Connect Four
//!
//! A two-player Connect Four engine. The board applies gravity-fed column
//! drops and detects four-in-a-row on any axis; turn order and win checks
//! stay in the caller's hands.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic (board engine, player, session driver)
//! - [`ui`]: Terminal front ends, a ratatui game view and plain text mode
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
