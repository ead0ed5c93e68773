//! User actions the presentation shell forwards to the engine.

use serde::{Deserialize, Serialize};

use crate::catalog::MenuOption;

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A menu option was clicked.
    SelectOption { label: String },
    /// The go-back option was clicked.
    GoBack,
    /// Text typed into the input box.
    SendFreeText { text: String },
}

impl Action {
    pub fn select(label: impl Into<String>) -> Self {
        Self::SelectOption {
            label: label.into(),
        }
    }

    pub fn free_text(text: impl Into<String>) -> Self {
        Self::SendFreeText { text: text.into() }
    }

    /// The action triggered by clicking `option`.
    pub fn from_option(option: &MenuOption) -> Self {
        match option {
            MenuOption::Select(label) => Self::select(label.clone()),
            MenuOption::Back(_) => Self::GoBack,
        }
    }

    /// Whether handling this action may wait on the remote client.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::SendFreeText { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(
            Action::from_option(&MenuOption::Select("Fees".into())),
            Action::select("Fees")
        );
        assert_eq!(
            Action::from_option(&MenuOption::Back("Go back".into())),
            Action::GoBack
        );
    }

    #[test]
    fn test_only_free_text_is_remote() {
        assert!(Action::free_text("hi").is_remote());
        assert!(!Action::GoBack.is_remote());
        assert!(!Action::select("Fees").is_remote());
    }

    #[test]
    fn test_parse_tagged_json() {
        let action: Action = serde_json::from_str(r#"{"type": "go_back"}"#).unwrap();
        assert_eq!(action, Action::GoBack);

        let action: Action =
            serde_json::from_str(r#"{"type": "select_option", "label": "Fees"}"#).unwrap();
        assert_eq!(action, Action::select("Fees"));
    }
}
