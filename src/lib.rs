//! Puzzle kernel and HTTP service for Jumbl, a timed word-jumble game.
//!
//! Puzzles are built from a word list with a seeded generator so the daily
//! puzzle is the same for everyone, and any puzzle can be shared as a
//! URL-safe token.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod play;
pub mod services;
pub mod session;
pub mod utils;
