//! Chat session/message orchestration.

pub mod repository;
pub mod service;
