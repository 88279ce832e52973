//! `<placeholder>` substitution for scenario outline expansion.
//!
//! Text is scanned once; substituted values are copied verbatim and never
//! rescanned, so a value containing `<other>` stays as written.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `<name>` where the name does not start with whitespace and holds
/// no angle bracket or line break.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>\s][^<>\r\n]*)>")
        .unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Header and values of one Examples row.
#[derive(Debug, Clone, Copy)]
pub(super) struct ExampleRow<'a> {
    pub(super) headers: &'a [String],
    pub(super) values: &'a [String],
}

impl ExampleRow<'_> {
    fn value(&self, name: &str) -> Option<&str> {
        let index = self.headers.iter().position(|header| header == name)?;
        self.values.get(index).map(String::as_str)
    }

    /// Replace every placeholder in `text` with its value.
    ///
    /// Returns the name of the first placeholder with no matching column.
    pub(super) fn substitute(&self, text: &str) -> Result<String, String> {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = self
                .value(name.as_str())
                .ok_or_else(|| name.as_str().to_string())?;
            result.push_str(text.get(last..whole.start()).unwrap_or_default());
            result.push_str(value);
            last = whole.end();
        }
        result.push_str(text.get(last..).unwrap_or_default());
        Ok(result)
    }
}
