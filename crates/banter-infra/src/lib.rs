//! Infrastructure layer for Banter.
//!
//! Contains implementations of the traits defined in `banter-core`:
//! SQLite storage and the Groq completion provider, plus the
//! environment-sourced process configuration.

pub mod config;
pub mod llm;
pub mod sqlite;
