//! Lexical states and the stack tracking them.

use std::fmt;

/// A lexical state governing how the next characters are tokenised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Line classification. Always at the bottom of the stack.
    Initial,
    /// Inside a tag line; popped once its end-of-line token is handed out.
    Tags,
    /// Between doc string delimiters; every line is verbatim.
    DocString,
    /// Inside a table row; popped once its end-of-line token is handed out.
    Table,
}

impl Condition {
    /// Upper-case state name, as printed in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "INITIAL",
            Self::Tags => "TAGS",
            Self::DocString => "DOC_STRING",
            Self::Table => "TABLE",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for Condition {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Ordered stack of active conditions with [`Condition::Initial`] pinned at
/// the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConditionStack(Vec<Condition>);

impl ConditionStack {
    pub(crate) fn new() -> Self {
        Self(vec![Condition::Initial])
    }

    pub(crate) fn reset(&mut self) {
        self.0.truncate(1);
    }

    pub(crate) fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    /// Pop `condition` if it is on top. Returns whether anything was popped.
    pub(crate) fn pop_if(&mut self, condition: Condition) -> bool {
        if condition != Condition::Initial && self.top() == condition {
            self.0.pop();
            true
        } else {
            false
        }
    }

    pub(crate) fn top(&self) -> Condition {
        self.0.last().copied().unwrap_or(Condition::Initial)
    }

    pub(crate) fn as_slice(&self) -> &[Condition] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_cannot_be_popped() {
        let mut stack = ConditionStack::new();
        assert!(!stack.pop_if(Condition::Initial));
        assert_eq!(stack.as_slice(), [Condition::Initial]);
    }

    #[test]
    fn pops_only_matching_top() {
        let mut stack = ConditionStack::new();
        stack.push(Condition::Table);
        assert!(!stack.pop_if(Condition::Tags));
        assert!(stack.pop_if(Condition::Table));
        assert_eq!(stack.top(), Condition::Initial);
    }

    #[test]
    fn reset_keeps_initial() {
        let mut stack = ConditionStack::new();
        stack.push(Condition::DocString);
        stack.reset();
        assert_eq!(stack.as_slice(), [Condition::Initial]);
    }

    #[test]
    fn compares_with_state_names() {
        assert_eq!(Condition::Tags, "TAGS");
        assert_eq!(Condition::DocString.to_string(), "DOC_STRING");
    }
}
