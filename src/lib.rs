//! chatflow — menu-driven chat with a remote free-text fallback.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod remote;
pub mod render;
pub mod shell;
