//! Option navigation stack for go-back.

use crate::catalog::MenuOption;

/// An ordered list of options shown at one point in the conversation.
pub type OptionSet = Vec<MenuOption>;

/// Plain LIFO of previously shown option sets.
///
/// No depth bound, no deduplication. A catalog cycle combined with
/// `back_flag` can grow it for as long as the conversation lasts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    sets: Vec<OptionSet>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, options: OptionSet) {
        self.sets.push(options);
    }

    /// Remove the most recent set. `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<OptionSet> {
        self.sets.pop()
    }

    pub fn peek(&self) -> Option<&OptionSet> {
        self.sets.last()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
