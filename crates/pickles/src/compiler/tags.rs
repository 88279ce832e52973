//! Ordered, duplicate-free tag collections for executable units.

use std::collections::HashSet;
use std::ops::Deref;

use crate::ast::Tag;

/// Union of the tags of every scope enclosing a unit.
///
/// Tags keep the order in which they were first seen, outermost scope first,
/// and appear once each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Build a set from the tags of nested scopes, outermost first.
    pub(super) fn from_scopes<'a>(scopes: impl IntoIterator<Item = &'a [Tag]>) -> Self {
        let mut set = Self::default();
        for scope in scopes {
            set.extend_from(scope);
        }
        set
    }

    fn extend_from(&mut self, tags: &[Tag]) {
        let mut seen: HashSet<String> = self.0.iter().cloned().collect();
        for tag in tags {
            if seen.insert(tag.name.clone()) {
                self.0.push(tag.name.clone());
            }
        }
    }

    /// Returns `true` if the set holds `tag`, written with its `@`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    /// Consume the set, returning the tags in order.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for TagSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
