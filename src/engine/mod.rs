//! Conversation engine — decides what each user action appends.
//!
//! A [`Conversation`] owns the history and the navigation stack. Menu clicks
//! resolve against the catalog synchronously; free text goes to a
//! [`QueryClient`](crate::remote::QueryClient) and may be split into
//! begin/complete so the caller can release the conversation while waiting.

pub mod action;
pub mod conversation;
pub mod message;

pub use action::Action;
pub use conversation::{Conversation, PendingQuery};
pub use message::{Message, Sender};
