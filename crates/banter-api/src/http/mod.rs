//! HTTP surface: router, CORS enforcement, handlers, and the embedded client.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod router;
pub mod ui;
