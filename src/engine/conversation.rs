//! The conversation engine: one owned instance per conversation.
//!
//! Every handler appends zero or more messages to the history and returns the
//! slice it appended. History is never rewritten.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::{Catalog, CatalogEntry, Greeting, MenuOption};
use crate::config::EngineTexts;
use crate::error::QueryError;
use crate::navigation::{NavigationStack, OptionSet};
use crate::remote::QueryClient;

use super::action::Action;
use super::message::Message;

/// A free-text question that has been recorded but not yet answered.
///
/// Returned by [`Conversation::begin_free_text`] so the caller can run the
/// remote call without holding the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub conversation_id: Uuid,
    pub question: String,
}

/// State and handlers for a single conversation.
pub struct Conversation {
    id: Uuid,
    catalog: Arc<Catalog>,
    greeting: Arc<Greeting>,
    texts: EngineTexts,
    history: Vec<Message>,
    nav_stack: NavigationStack,
    /// The most recent option set offered by a bot message.
    current_options: OptionSet,
}

impl Conversation {
    /// Start a conversation seeded with the greeting.
    pub fn new(catalog: Arc<Catalog>, greeting: Arc<Greeting>, texts: EngineTexts) -> Self {
        let mut conversation = Self {
            id: Uuid::new_v4(),
            catalog,
            greeting,
            texts,
            history: Vec::new(),
            nav_stack: NavigationStack::new(),
            current_options: Vec::new(),
        };
        conversation.seed();
        conversation
    }

    fn seed(&mut self) {
        let greeting = Message::bot_with_options(&self.greeting.text, self.greeting.options.clone());
        self.append(greeting);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only view of the history, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn nav_stack(&self) -> &NavigationStack {
        &self.nav_stack
    }

    pub fn current_options(&self) -> &[MenuOption] {
        &self.current_options
    }

    pub fn texts(&self) -> &EngineTexts {
        &self.texts
    }

    /// Tear down and start over with a fresh id and the greeting.
    ///
    /// Answers still in flight for the old id are discarded when they land.
    pub fn reset(&mut self) {
        let old = self.id;
        self.id = Uuid::new_v4();
        self.history.clear();
        self.nav_stack.clear();
        self.current_options.clear();
        self.seed();
        tracing::debug!(old = %old, new = %self.id, "Conversation reset");
    }

    fn append(&mut self, message: Message) {
        if let Some(ref options) = message.options {
            self.current_options = options.clone();
        }
        self.history.push(message);
    }

    fn appended_since(&self, start: usize) -> &[Message] {
        &self.history[start..]
    }

    /// Handle a click on an ordinary catalog option.
    pub fn select_option(&mut self, label: &str) -> &[Message] {
        let start = self.history.len();
        self.append(Message::user(label));

        let catalog = Arc::clone(&self.catalog);
        match catalog.lookup(label) {
            Some(CatalogEntry::Answer(text)) => {
                tracing::debug!(conversation_id = %self.id, label, "Catalog answer");
                self.append(Message::bot(text));
            }
            Some(CatalogEntry::Menu {
                text,
                options,
                back_flag,
            }) => {
                if *back_flag {
                    // Capture what was on screen before this selection.
                    self.nav_stack.push(self.current_options.clone());
                }
                tracing::debug!(
                    conversation_id = %self.id,
                    label,
                    back_flag,
                    depth = self.nav_stack.len(),
                    "Catalog menu"
                );
                self.append(Message::bot_with_options(text, options.clone()));
            }
            None => {
                tracing::debug!(conversation_id = %self.id, label, "No catalog entry");
                self.append(Message::bot(&self.texts.fallback));
            }
        }

        self.appended_since(start)
    }

    /// Handle a click on the go-back option.
    pub fn go_back(&mut self) -> &[Message] {
        let start = self.history.len();
        self.append(Message::user(&self.texts.back_label));

        match self.nav_stack.pop() {
            Some(previous) => {
                tracing::debug!(
                    conversation_id = %self.id,
                    depth = self.nav_stack.len(),
                    "Restored previous options"
                );
                self.append(Message::bot_with_options(&self.texts.restore_prompt, previous));
            }
            None => {
                tracing::debug!(conversation_id = %self.id, "Nothing to go back to");
                self.append(Message::bot(&self.texts.no_previous));
            }
        }

        self.appended_since(start)
    }

    /// Record a free-text question. Returns `None` (and changes nothing) when
    /// the text is blank.
    pub fn begin_free_text(&mut self, text: &str) -> Option<PendingQuery> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }
        self.append(Message::user(question));
        Some(PendingQuery {
            conversation_id: self.id,
            question: question.to_string(),
        })
    }

    /// Apply the remote outcome for `pending`.
    ///
    /// Failures append nothing and are logged. An answer for a conversation
    /// that has since been reset is dropped.
    pub fn complete_free_text(
        &mut self,
        pending: &PendingQuery,
        outcome: Result<String, QueryError>,
    ) -> &[Message] {
        let start = self.history.len();

        if pending.conversation_id != self.id {
            tracing::debug!(
                stale = %pending.conversation_id,
                current = %self.id,
                "Discarding answer for a conversation that was reset"
            );
            return self.appended_since(start);
        }

        match outcome {
            Ok(answer) if answer.trim().is_empty() => {
                tracing::debug!(conversation_id = %self.id, "Remote returned an empty answer");
            }
            Ok(answer) => self.append(Message::bot(answer)),
            Err(e) => {
                tracing::warn!(
                    conversation_id = %self.id,
                    error = %e,
                    "Remote query failed; no reply for this turn"
                );
            }
        }

        self.appended_since(start)
    }

    /// Record `text`, ask `client`, and apply the answer.
    pub async fn send_free_text(&mut self, client: &dyn QueryClient, text: &str) -> &[Message] {
        let start = self.history.len();
        let Some(pending) = self.begin_free_text(text) else {
            return self.appended_since(start);
        };
        tracing::debug!(
            conversation_id = %self.id,
            client = client.name(),
            "Forwarding free text to remote"
        );
        let outcome = client.ask(&pending.question).await;
        self.complete_free_text(&pending, outcome);
        self.appended_since(start)
    }

    /// Route a typed action to its handler.
    pub async fn dispatch(&mut self, client: &dyn QueryClient, action: Action) -> &[Message] {
        match action {
            Action::SelectOption { label } => self.select_option(&label),
            Action::GoBack => self.go_back(),
            Action::SendFreeText { text } => self.send_free_text(client, &text).await,
        }
    }
}
