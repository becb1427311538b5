//! LLM provider abstraction and the reply proxy.

pub mod provider;
pub mod proxy;
