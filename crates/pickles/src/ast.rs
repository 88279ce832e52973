//! Syntax tree produced by the [`Parser`](crate::Parser).
//!
//! The tree is owned top-down and holds no back references. Every node
//! records the [`Location`] of its first token.

use pickles_dialect::StepKeyword;

/// 1-based position in the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// Line number.
    pub line: usize,
    /// Column, counted in characters.
    pub column: usize,
}

impl Location {
    /// Construct a location.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single `@tag`, stored with its `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tag {
    /// Tag text, e.g. `@wip`.
    pub name: String,
    /// Where the tag appeared.
    pub location: Location,
}

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Feature {
    /// Tags preceding the `Feature:` line.
    pub tags: Vec<Tag>,
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Feature name.
    pub name: String,
    /// Free-text lines between the name and the first block.
    pub description: Vec<String>,
    /// Steps prepended to every scenario of the feature.
    pub background: Option<Background>,
    /// Scenarios and outlines declared directly under the feature.
    pub children: Vec<ScenarioDefinition>,
    /// Rules following the feature-level scenarios.
    pub rules: Vec<Rule>,
    /// Language code of the dialect the document was written in.
    pub language: String,
    /// Position of the `Feature:` keyword.
    pub location: Location,
}

/// A named group of scenarios with an optional background of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    /// Tags preceding the `Rule:` line.
    pub tags: Vec<Tag>,
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Rule name; may be empty.
    pub name: String,
    /// Free-text lines under the rule line.
    pub description: Vec<String>,
    /// Steps prepended to every scenario of this rule.
    pub background: Option<Background>,
    /// Scenarios and outlines in the rule.
    pub children: Vec<ScenarioDefinition>,
    /// Position of the `Rule:` keyword.
    pub location: Location,
}

/// Steps shared by every scenario in the enclosing feature or rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Background {
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Background name; usually empty.
    pub name: String,
    /// Free-text lines under the background line.
    pub description: Vec<String>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// Position of the `Background:` keyword.
    pub location: Location,
}

/// A scenario or a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ScenarioDefinition {
    /// A concrete scenario.
    Scenario(Scenario),
    /// A step template expanded once per example row.
    Outline(ScenarioOutline),
}

impl ScenarioDefinition {
    /// Name of the scenario or outline.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(scenario) => &scenario.name,
            Self::Outline(outline) => &outline.name,
        }
    }

    /// Tags of the scenario or outline.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Scenario(scenario) => &scenario.tags,
            Self::Outline(outline) => &outline.tags,
        }
    }

    /// Steps of the scenario or outline template.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Scenario(scenario) => &scenario.steps,
            Self::Outline(outline) => &outline.steps,
        }
    }

    /// Position of the keyword.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Scenario(scenario) => scenario.location,
            Self::Outline(outline) => outline.location,
        }
    }
}

/// A concrete scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    /// Tags preceding the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Scenario name; may be empty.
    pub name: String,
    /// Free-text lines under the keyword line.
    pub description: Vec<String>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// Position of the keyword.
    pub location: Location,
}

/// A scenario template whose steps contain `<placeholder>`s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioOutline {
    /// Tags preceding the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Outline name; may contain placeholders.
    pub name: String,
    /// Free-text lines under the keyword line.
    pub description: Vec<String>,
    /// Template steps in source order.
    pub steps: Vec<Step>,
    /// Example tables in source order.
    pub examples: Vec<Examples>,
    /// Position of the keyword.
    pub location: Location,
}

/// A table of values for a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Examples {
    /// Tags preceding the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword as written, without the colon.
    pub keyword: String,
    /// Examples name; may be empty.
    pub name: String,
    /// Free-text lines under the keyword line.
    pub description: Vec<String>,
    /// Header row followed by data rows.
    pub table: DataTable,
    /// Position of the keyword.
    pub location: Location,
}

impl Examples {
    /// The header row naming the placeholders.
    #[must_use]
    pub fn header(&self) -> Option<&TableRow> {
        self.table.rows.first()
    }

    /// Rows after the header.
    #[must_use]
    pub fn data_rows(&self) -> &[TableRow] {
        self.table.rows.get(1..).unwrap_or_default()
    }
}

/// A single step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step {
    /// Keyword exactly as written, separator included (`"And "`).
    pub keyword: String,
    /// Semantic keyword with `And`/`But` resolved to the preceding
    /// `Given`/`When`/`Then`.
    pub keyword_type: StepKeyword,
    /// Step text after the keyword.
    pub name: String,
    /// Optional table or doc string attached to the step.
    pub argument: Option<StepArgument>,
    /// Position of the keyword.
    pub location: Location,
}

/// Block argument following a step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StepArgument {
    /// A pipe-delimited table.
    DataTable(DataTable),
    /// A verbatim text block.
    DocString(DocString),
}

/// A pipe-delimited table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataTable {
    /// Rows in source order, all of the same width.
    pub rows: Vec<TableRow>,
    /// Position of the first row.
    pub location: Location,
}

impl DataTable {
    /// Cell values as plain strings, row by row.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(TableRow::values).collect()
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow {
    /// Cells from left to right.
    pub cells: Vec<TableCell>,
    /// Position of the opening pipe.
    pub location: Location,
}

impl TableRow {
    /// Cell values as plain strings.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.cells.iter().map(|cell| cell.value.clone()).collect()
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableCell {
    /// Unescaped value without enclosing whitespace.
    pub value: String,
    /// Position of the cell's first character, or of the pipe before an
    /// empty cell.
    pub location: Location,
}

/// A verbatim text block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocString {
    /// Lines with the delimiter's indentation removed, newlines kept.
    pub lines: Vec<String>,
    /// The delimiter that opened the block.
    pub delimiter: String,
    /// Number of indentation characters removed from each line.
    pub indent: usize,
    /// Position of the opening delimiter.
    pub location: Location,
}

impl DocString {
    /// The block's text without the newline of its final line.
    ///
    /// # Examples
    /// ```
    /// use pickles::ast::{DocString, Location};
    ///
    /// let doc = DocString {
    ///     lines: vec!["one\n".into(), "two\n".into()],
    ///     delimiter: "\"\"\"".into(),
    ///     indent: 0,
    ///     location: Location::new(1, 1),
    /// };
    /// assert_eq!(doc.content(), "one\ntwo");
    /// ```
    #[must_use]
    pub fn content(&self) -> String {
        let joined = self.lines.concat();
        match joined.strip_suffix('\n') {
            Some(rest) => rest.strip_suffix('\r').unwrap_or(rest).to_string(),
            None => joined,
        }
    }
}
