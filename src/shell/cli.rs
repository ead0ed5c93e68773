//! CLI shell — stdin/stdout REPL over one conversation.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::MenuOption;
use crate::engine::{Action, Conversation, Message};
use crate::error::ShellError;
use crate::remote::QueryClient;
use crate::render::LinkRenderer;

/// What a line of terminal input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Quit,
    Reset,
    Help,
    Act(Action),
    /// Blank line.
    Nothing,
}

impl CliCommand {
    /// Parse a line against the options currently on screen.
    ///
    /// A number picks the matching option (1-based). Anything that isn't a
    /// command or a valid option number is free text.
    pub fn parse(line: &str, current: &[MenuOption]) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => return Self::Nothing,
            "/quit" | "/exit" => return Self::Quit,
            "/reset" | "/restart" => return Self::Reset,
            "/help" | "/?" => return Self::Help,
            "/back" => return Self::Act(Action::GoBack),
            _ => {}
        }

        let picked = trimmed
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| current.get(i));
        if let Some(option) = picked {
            return Self::Act(Action::from_option(option));
        }

        Self::Act(Action::free_text(trimmed))
    }
}

const HELP: &str = "\
Type a number to pick an option, or ask anything in your own words.
  /back    previous options
  /reset   start over
  /quit    exit";

/// Terminal front end.
pub struct CliShell {
    conversation: Conversation,
    client: Arc<dyn QueryClient>,
    renderer: LinkRenderer,
}

impl CliShell {
    pub fn new(conversation: Conversation, client: Arc<dyn QueryClient>) -> Self {
        let renderer = LinkRenderer::new(&conversation.texts().link_text);
        Self {
            conversation,
            client,
            renderer,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Format one bot message with its numbered options.
    pub fn format_message(&self, message: &Message) -> String {
        let mut out = self.renderer.plain(&message.text);
        if let Some(ref options) = message.options {
            for (i, option) in options.iter().enumerate() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("  [{}] {}", i + 1, option.label()));
            }
        }
        out
    }

    fn format_bot_messages(&self, messages: &[Message]) -> String {
        messages
            .iter()
            .filter(|m| m.is_bot())
            .map(|m| self.format_message(m))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Handle one input line. `None` means the user asked to quit.
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        match CliCommand::parse(line, self.conversation.current_options()) {
            CliCommand::Quit => None,
            CliCommand::Nothing => Some(String::new()),
            CliCommand::Help => Some(HELP.to_string()),
            CliCommand::Reset => {
                self.conversation.reset();
                Some(self.format_bot_messages(self.conversation.history()))
            }
            CliCommand::Act(action) => {
                let client = Arc::clone(&self.client);
                let appended = self.conversation.dispatch(client.as_ref(), action).await.to_vec();
                Some(self.format_bot_messages(&appended))
            }
        }
    }

    /// Run until EOF or `/quit`.
    pub async fn run(mut self) -> Result<(), ShellError> {
        println!("\n{}\n", self.format_bot_messages(self.conversation.history()));
        eprint!("> ");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line).await {
                Some(output) if output.is_empty() => {}
                Some(output) => println!("\n{output}\n"),
                None => break,
            }
            eprint!("> ");
        }

        tracing::info!(
            messages = self.conversation.history().len(),
            "CLI session ended"
        );
        Ok(())
    }
}
