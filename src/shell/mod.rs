//! Presentation shells. They render history and forward user events; all
//! conversation logic lives in [`crate::engine`].

pub mod cli;
pub mod http;

pub use cli::{CliCommand, CliShell};
pub use http::{ChatState, chat_routes};
