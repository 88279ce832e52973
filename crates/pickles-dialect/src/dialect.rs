//! The keyword table of a single spoken language.

use std::collections::HashSet;

use serde::Deserialize;

use crate::errors::DialectError;
use crate::keyword::{StepKeyword, StructuralKeyword};

/// Surface keywords for one language.
///
/// The field names follow Cucumber's `gherkin-languages.json`, so entries from
/// that file deserialize directly. As in that file, a step keyword ending in
/// a space must be followed by whitespace in a document (`"Given "`), while a
/// step keyword without one runs straight into the step text (`"假如"`).
/// Structural keywords are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialect {
    /// English name of the language.
    pub name: String,
    /// Name of the language in the language itself.
    pub native: String,
    /// Keywords opening a feature.
    pub feature: Vec<String>,
    /// Keywords opening a rule.
    #[serde(default)]
    pub rule: Vec<String>,
    /// Keywords opening a background.
    pub background: Vec<String>,
    /// Keywords opening a scenario.
    pub scenario: Vec<String>,
    /// Keywords opening a scenario outline.
    pub scenario_outline: Vec<String>,
    /// Keywords opening an examples block.
    pub examples: Vec<String>,
    /// `Given` keywords.
    pub given: Vec<String>,
    /// `When` keywords.
    pub when: Vec<String>,
    /// `Then` keywords.
    pub then: Vec<String>,
    /// `And` keywords.
    pub and: Vec<String>,
    /// `But` keywords.
    pub but: Vec<String>,
}

/// A step keyword as a lexer matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSurface<'a> {
    /// Semantic keyword.
    pub keyword: StepKeyword,
    /// Surface text without its separator.
    pub text: &'a str,
    /// Whether whitespace must follow `text`.
    pub separated: bool,
}

impl<'a> StepSurface<'a> {
    fn new(keyword: StepKeyword, stored: &'a str) -> Self {
        let text = stored.trim_end();
        Self {
            keyword,
            text,
            separated: text.len() != stored.len(),
        }
    }
}

const STRUCTURAL_ORDER: [StructuralKeyword; 6] = [
    StructuralKeyword::Feature,
    StructuralKeyword::Rule,
    StructuralKeyword::Background,
    StructuralKeyword::ScenarioOutline,
    StructuralKeyword::Scenario,
    StructuralKeyword::Examples,
];

// Conjunctions first: a surface keyword listed under several step types
// (Cucumber's `*`) resolves as a conjunction.
const STEP_ORDER: [StepKeyword; 5] = [
    StepKeyword::And,
    StepKeyword::But,
    StepKeyword::Given,
    StepKeyword::When,
    StepKeyword::Then,
];

impl Dialect {
    /// Surface keywords for a structural keyword.
    #[must_use]
    pub fn keywords(&self, keyword: StructuralKeyword) -> &[String] {
        match keyword {
            StructuralKeyword::Feature => &self.feature,
            StructuralKeyword::Rule => &self.rule,
            StructuralKeyword::Background => &self.background,
            StructuralKeyword::Scenario => &self.scenario,
            StructuralKeyword::ScenarioOutline => &self.scenario_outline,
            StructuralKeyword::Examples => &self.examples,
        }
    }

    /// Surface keywords for a step keyword.
    #[must_use]
    pub fn step_keywords(&self, keyword: StepKeyword) -> &[String] {
        match keyword {
            StepKeyword::Given => &self.given,
            StepKeyword::When => &self.when,
            StepKeyword::Then => &self.then,
            StepKeyword::And => &self.and,
            StepKeyword::But => &self.but,
        }
    }

    /// All structural keywords, longest surface form first.
    ///
    /// Longest-first ordering lets a matcher try `Scenario Outline` before
    /// `Scenario`.
    ///
    /// # Examples
    /// ```
    /// use pickles_dialect::{Dialects, StructuralKeyword};
    /// let en = Dialects::builtin().english();
    /// let table = en.structural_table();
    /// let outline = table.iter().position(|(_, kw)| *kw == "Scenario Outline");
    /// let scenario = table.iter().position(|(_, kw)| *kw == "Scenario");
    /// assert!(outline < scenario);
    /// ```
    #[must_use]
    pub fn structural_table(&self) -> Vec<(StructuralKeyword, &str)> {
        longest_first(
            STRUCTURAL_ORDER
                .iter()
                .flat_map(|kw| self.keywords(*kw).iter().map(move |s| (*kw, s.as_str()))),
            |(_, text)| text,
        )
    }

    /// All step keywords, longest surface form first.
    ///
    /// # Examples
    /// ```
    /// use pickles_dialect::{Dialects, StepKeyword};
    /// let en = Dialects::builtin().english();
    /// let given = en.step_table().into_iter().find(|s| s.keyword == StepKeyword::Given);
    /// assert_eq!(given.map(|s| (s.text, s.separated)), Some(("Given", true)));
    /// ```
    #[must_use]
    pub fn step_table(&self) -> Vec<StepSurface<'_>> {
        longest_first(
            STEP_ORDER.iter().flat_map(|kw| {
                self.step_keywords(*kw)
                    .iter()
                    .map(move |stored| StepSurface::new(*kw, stored))
            }),
            |surface| surface.text,
        )
    }

    /// Trim surrounding whitespace and drop blanks. A step keyword keeps a
    /// single trailing space when it had any.
    pub(crate) fn normalise(&mut self) {
        for list in [
            &mut self.feature,
            &mut self.rule,
            &mut self.background,
            &mut self.scenario,
            &mut self.scenario_outline,
            &mut self.examples,
        ] {
            normalise_list(list, |kw| kw.trim().to_string());
        }
        for list in [
            &mut self.given,
            &mut self.when,
            &mut self.then,
            &mut self.and,
            &mut self.but,
        ] {
            normalise_list(list, |kw| {
                let start = kw.trim_start();
                let text = start.trim_end();
                if text.is_empty() || text.len() == start.len() {
                    text.to_string()
                } else {
                    format!("{text} ")
                }
            });
        }
    }

    /// Check that every mandatory category has at least one keyword.
    ///
    /// `rule` is optional: older keyword tables predate rules.
    pub(crate) fn validate(&self, language: &str) -> Result<(), DialectError> {
        let categories: [(&'static str, &[String]); 10] = [
            ("feature", &self.feature),
            ("background", &self.background),
            ("scenario", &self.scenario),
            ("scenarioOutline", &self.scenario_outline),
            ("examples", &self.examples),
            ("given", &self.given),
            ("when", &self.when),
            ("then", &self.then),
            ("and", &self.and),
            ("but", &self.but),
        ];
        match categories.iter().find(|(_, list)| list.is_empty()) {
            Some((category, _)) => Err(DialectError::MissingKeywords {
                language: language.to_string(),
                category: *category,
            }),
            None => Ok(()),
        }
    }
}

fn normalise_list(list: &mut Vec<String>, normal: impl Fn(&str) -> String) {
    for kw in list.iter_mut() {
        let normalised = normal(kw.as_str());
        if normalised != *kw {
            *kw = normalised;
        }
    }
    list.retain(|kw| !kw.is_empty());
}

/// Deduplicate by surface text, keeping the first category, then sort by
/// descending character count. The sort is stable so ties keep table order.
fn longest_first<'a, T: Copy>(
    entries: impl Iterator<Item = T>,
    text: impl Fn(T) -> &'a str,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut table: Vec<_> = entries.filter(|entry| seen.insert(text(*entry))).collect();
    table.sort_by_key(|entry| std::cmp::Reverse(text(*entry).chars().count()));
    table
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    fn sample() -> Dialect {
        Dialect {
            name: "Test".into(),
            native: "Test".into(),
            feature: vec!["Feature".into()],
            rule: Vec::new(),
            background: vec!["Background".into()],
            scenario: vec!["Scenario".into()],
            scenario_outline: vec!["Scenario Outline".into()],
            examples: vec!["Examples".into()],
            given: vec!["Given ".into(), "*".into()],
            when: vec!["When".into(), "*".into()],
            then: vec!["Then".into()],
            and: vec!["And".into(), "*".into()],
            but: vec!["But".into()],
        }
    }

    #[test]
    fn normalise_keeps_one_separator_space() {
        let mut dialect = sample();
        dialect.given.push("   ".into());
        dialect.given.push(" Soit\t ".into());
        dialect.feature = vec![" Feature ".into()];
        dialect.normalise();
        assert_eq!(dialect.given, vec!["Given ", "*", "Soit "]);
        assert_eq!(dialect.feature, vec!["Feature"]);
    }

    #[test]
    fn shared_keywords_resolve_as_conjunctions() {
        let mut dialect = sample();
        dialect.normalise();
        let table = dialect.step_table();
        let star: Vec<_> = table.iter().filter(|s| s.text == "*").collect();
        assert_eq!(
            star,
            vec![&StepSurface {
                keyword: StepKeyword::And,
                text: "*",
                separated: false,
            }]
        );
    }

    #[test]
    fn trailing_space_marks_separated_keywords() {
        let mut dialect = sample();
        dialect.given = vec!["Given ".into(), "假如".into()];
        dialect.normalise();
        let given: Vec<_> = dialect
            .step_table()
            .into_iter()
            .filter(|s| s.keyword == StepKeyword::Given)
            .map(|s| (s.text, s.separated))
            .collect();
        assert_eq!(given, vec![("Given", true), ("假如", false)]);
    }

    #[test]
    fn validate_reports_first_empty_category() {
        let mut dialect = sample();
        dialect.examples.clear();
        let err = dialect.validate("xx").unwrap_err();
        assert_eq!(err.to_string(), "dialect `xx` defines no `examples` keywords");
    }

    #[test]
    fn missing_rule_keywords_are_accepted() {
        assert!(sample().validate("xx").is_ok());
    }
}
