//! Business logic and repository trait definitions for Banter.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `banter-types` --
//! never on `banter-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
