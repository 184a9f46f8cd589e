//! Core domain + application logic for the Cupid matchmaking bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! messaging port (trait) implemented in the adapter crate; persistence is a
//! local SQLite store owned by this crate.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod matching;
pub mod messaging;
pub mod store;

pub use errors::{Error, Result};
