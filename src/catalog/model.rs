//! Catalog data model: menu options, entries, and the initial greeting.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A selectable option presented with a bot message.
///
/// Back navigation is a distinct variant, so a catalog entry whose label
/// happens to equal the back label text can never be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum MenuOption {
    /// An ordinary catalog label.
    Select(String),
    /// The go-back command. The string is display text only.
    Back(String),
}

impl MenuOption {
    /// Text shown on the button.
    pub fn label(&self) -> &str {
        match self {
            Self::Select(label) | Self::Back(label) => label,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, Self::Back(_))
    }

    /// Convert configured option strings, mapping the back label to
    /// [`MenuOption::Back`].
    pub fn from_labels<I, S>(labels: I, back_label: &str) -> Vec<MenuOption>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label: String = label.into();
                if label == back_label {
                    MenuOption::Back(label)
                } else {
                    MenuOption::Select(label)
                }
            })
            .collect()
    }
}

/// What the catalog holds for a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// Terminal answer, no follow-up options.
    Answer(String),
    /// Sub-menu node.
    Menu {
        text: String,
        options: Vec<MenuOption>,
        /// Remember the option set that led here so go-back can restore it.
        back_flag: bool,
    },
}

/// On-disk shape of a catalog value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Answer(String),
    Menu {
        text: String,
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        back_flag: bool,
    },
}

/// Immutable label → entry mapping, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from already-typed entries.
    pub fn new(entries: HashMap<String, CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse the JSON mapping `{ label: string | { text, options, back_flag } }`.
    pub fn from_json_str(json: &str, back_label: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawEntry> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                what: "response catalog".into(),
                source,
            })?;

        let entries = raw
            .into_iter()
            .map(|(label, entry)| {
                let entry = match entry {
                    RawEntry::Answer(text) => CatalogEntry::Answer(text),
                    RawEntry::Menu {
                        text,
                        options,
                        back_flag,
                    } => CatalogEntry::Menu {
                        text,
                        options: MenuOption::from_labels(options, back_label),
                        back_flag,
                    },
                };
                (label, entry)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Look up a label. `None` means "no predefined answer".
    pub fn lookup(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

/// First bot message of every conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub text: String,
    pub options: Vec<MenuOption>,
}

#[derive(Debug, Deserialize)]
struct RawGreeting {
    text: String,
    #[serde(default)]
    options: Vec<String>,
}

/// Either `{ "initialGreeting": {...} }` or the greeting object itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGreetingFile {
    Wrapped {
        #[serde(rename = "initialGreeting")]
        initial_greeting: RawGreeting,
    },
    Bare(RawGreeting),
}

impl Greeting {
    pub fn new(text: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    pub fn from_json_str(json: &str, back_label: &str) -> Result<Self, CatalogError> {
        let file: RawGreetingFile =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                what: "initial greeting".into(),
                source,
            })?;
        let raw = match file {
            RawGreetingFile::Wrapped { initial_greeting } => initial_greeting,
            RawGreetingFile::Bare(raw) => raw,
        };
        Ok(Self {
            text: raw.text,
            options: MenuOption::from_labels(raw.options, back_label),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "Opening hours": "We are open 9-5, Monday to Friday.",
        "Admissions": {
            "text": "What would you like to know about admissions?",
            "options": ["Deadlines", "Fees", "Go back"],
            "back_flag": true
        },
        "Fees": { "text": "Fees depend on the program." }
    }"#;

    #[test]
    fn test_parse_answer_and_menu_entries() {
        let catalog = Catalog::from_json_str(CATALOG, "Go back").unwrap();
        assert_eq!(catalog.len(), 3);

        assert_eq!(
            catalog.lookup("Opening hours"),
            Some(&CatalogEntry::Answer(
                "We are open 9-5, Monday to Friday.".into()
            ))
        );

        match catalog.lookup("Admissions") {
            Some(CatalogEntry::Menu {
                options, back_flag, ..
            }) => {
                assert!(*back_flag);
                assert_eq!(
                    options,
                    &vec![
                        MenuOption::Select("Deadlines".into()),
                        MenuOption::Select("Fees".into()),
                        MenuOption::Back("Go back".into()),
                    ]
                );
            }
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn test_menu_defaults() {
        let catalog = Catalog::from_json_str(CATALOG, "Go back").unwrap();
        assert_eq!(
            catalog.lookup("Fees"),
            Some(&CatalogEntry::Menu {
                text: "Fees depend on the program.".into(),
                options: vec![],
                back_flag: false,
            })
        );
    }

    #[test]
    fn test_lookup_miss() {
        let catalog = Catalog::from_json_str(CATALOG, "Go back").unwrap();
        assert!(catalog.lookup("unknown-label").is_none());
        assert!(!catalog.contains("unknown-label"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = Catalog::from_json_str("[1, 2]", "Go back").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_greeting_wrapped_and_bare() {
        let wrapped = r#"{"initialGreeting": {"text": "Hi!", "options": ["Admissions", "Opening hours"]}}"#;
        let bare = r#"{"text": "Hi!", "options": ["Admissions", "Opening hours"]}"#;

        let a = Greeting::from_json_str(wrapped, "Go back").unwrap();
        let b = Greeting::from_json_str(bare, "Go back").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.text, "Hi!");
        assert_eq!(a.options.len(), 2);
    }

    #[test]
    fn test_menu_option_serializes_with_kind() {
        let json = serde_json::to_value(MenuOption::Back("Go back".into())).unwrap();
        assert_eq!(json["kind"], "back");
        assert_eq!(json["label"], "Go back");
    }
}
