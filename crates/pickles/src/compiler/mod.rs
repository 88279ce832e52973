//! Lowers a [`Feature`] into flat, runnable [`ExecutableUnit`]s.
//!
//! Background steps are prepended to every scenario of their scope, and each
//! scenario outline is expanded once per Examples data row with its
//! `<placeholder>`s replaced by the row's values.

mod placeholder;
mod tags;

use log::debug;

use crate::ast::{
    DataTable, DocString, Feature, Location, ScenarioDefinition, ScenarioOutline, Step,
    StepArgument, TableCell, TableRow, Tag,
};
use crate::error::CompileError;

use placeholder::ExampleRow;
pub use tags::TagSet;

/// One fully resolved scenario, ready to be matched against step
/// definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExecutableUnit {
    /// Scenario name, with placeholders substituted for outline rows.
    pub name: String,
    /// Background steps followed by the scenario's own steps.
    pub steps: Vec<Step>,
    /// Union of the feature, rule, scenario and Examples tags.
    pub tags: TagSet,
    /// Position of the originating scenario or outline keyword.
    pub location: Location,
    /// Position of the Examples row an outline unit was expanded from.
    pub example_location: Option<Location>,
    /// Name of the enclosing rule, if any.
    pub rule: Option<String>,
}

/// Steps and tags contributed by the enclosing feature and rule.
struct Scope<'a> {
    background: Vec<&'a Step>,
    tags: Vec<&'a [Tag]>,
    rule: Option<&'a str>,
}

impl Scope<'_> {
    fn tags_with(&self, extra: &[&[Tag]]) -> TagSet {
        let mut scopes: Vec<&[Tag]> = self.tags.clone();
        scopes.extend_from_slice(extra);
        TagSet::from_scopes(scopes)
    }

    fn steps_with(&self, own: impl IntoIterator<Item = Step>) -> Vec<Step> {
        self.background
            .iter()
            .map(|step| (*step).clone())
            .chain(own)
            .collect()
    }
}

/// Compile a parsed feature into executable units.
///
/// Units follow source order: feature-level scenarios and outlines first,
/// then those of each rule. Outline rows are expanded in the order of their
/// Examples blocks and rows; an outline without data rows yields no unit.
///
/// # Errors
///
/// Returns [`CompileError`] when an outline step, table cell, doc string or
/// outline name uses a placeholder its Examples header does not define.
///
/// # Examples
/// ```
/// use pickles::{Parser, compile};
///
/// let feature = Parser::new()
///     .parse(concat!(
///         "Feature: Cukes\n",
///         "  Scenario Outline: eating\n",
///         "    Given I have <count> cukes\n",
///         "    Examples:\n",
///         "      | count |\n",
///         "      | 3     |\n",
///         "      | 5     |\n",
///     ))
///     .unwrap();
/// let units = compile(&feature).unwrap();
/// let names: Vec<_> = units
///     .iter()
///     .flat_map(|unit| unit.steps.iter().map(|step| step.name.as_str()))
///     .collect();
/// assert_eq!(names, ["I have 3 cukes", "I have 5 cukes"]);
/// ```
pub fn compile(feature: &Feature) -> Result<Vec<ExecutableUnit>, CompileError> {
    let mut units = Vec::new();
    let feature_scope = Scope {
        background: feature
            .background
            .iter()
            .flat_map(|background| &background.steps)
            .collect(),
        tags: vec![feature.tags.as_slice()],
        rule: None,
    };
    compile_definitions(&feature.children, &feature_scope, &mut units)?;

    for rule in &feature.rules {
        let mut background = feature_scope.background.clone();
        background.extend(rule.background.iter().flat_map(|bg| &bg.steps));
        let rule_scope = Scope {
            background,
            tags: vec![feature.tags.as_slice(), rule.tags.as_slice()],
            rule: Some(rule.name.as_str()),
        };
        compile_definitions(&rule.children, &rule_scope, &mut units)?;
    }

    debug!("compiled feature `{}` into {} units", feature.name, units.len());
    Ok(units)
}

fn compile_definitions(
    definitions: &[ScenarioDefinition],
    scope: &Scope<'_>,
    units: &mut Vec<ExecutableUnit>,
) -> Result<(), CompileError> {
    for definition in definitions {
        match definition {
            ScenarioDefinition::Scenario(scenario) => units.push(ExecutableUnit {
                name: scenario.name.clone(),
                steps: scope.steps_with(scenario.steps.iter().cloned()),
                tags: scope.tags_with(&[scenario.tags.as_slice()]),
                location: scenario.location,
                example_location: None,
                rule: scope.rule.map(str::to_string),
            }),
            ScenarioDefinition::Outline(outline) => expand_outline(outline, scope, units)?,
        }
    }
    Ok(())
}

fn expand_outline(
    outline: &ScenarioOutline,
    scope: &Scope<'_>,
    units: &mut Vec<ExecutableUnit>,
) -> Result<(), CompileError> {
    for examples in &outline.examples {
        let Some(header) = examples.header() else {
            continue;
        };
        let headers = header.values();
        for data in examples.data_rows() {
            let values = data.values();
            let row = ExampleRow {
                headers: &headers,
                values: &values,
            };
            let steps = outline
                .steps
                .iter()
                .map(|step| substitute_step(step, row))
                .collect::<Result<Vec<_>, _>>()?;
            units.push(ExecutableUnit {
                name: row
                    .substitute(&outline.name)
                    .map_err(|name| unresolved(name, outline.location, row))?,
                steps: scope.steps_with(steps),
                tags: scope.tags_with(&[outline.tags.as_slice(), examples.tags.as_slice()]),
                location: outline.location,
                example_location: Some(data.location),
                rule: scope.rule.map(str::to_string),
            });
        }
    }
    Ok(())
}

fn unresolved(placeholder: String, at: Location, row: ExampleRow<'_>) -> CompileError {
    CompileError::unresolved(placeholder, at.line, at.column, row.headers)
}

fn substitute_step(step: &Step, row: ExampleRow<'_>) -> Result<Step, CompileError> {
    let name = row
        .substitute(&step.name)
        .map_err(|name| unresolved(name, step.location, row))?;
    let argument = match &step.argument {
        None => None,
        Some(StepArgument::DataTable(table)) => {
            Some(StepArgument::DataTable(substitute_table(table, row)?))
        }
        Some(StepArgument::DocString(doc)) => {
            Some(StepArgument::DocString(substitute_doc_string(doc, row)?))
        }
    };
    Ok(Step {
        name,
        argument,
        ..step.clone()
    })
}

fn substitute_table(table: &DataTable, row: ExampleRow<'_>) -> Result<DataTable, CompileError> {
    let rows = table
        .rows
        .iter()
        .map(|table_row| {
            let cells = table_row
                .cells
                .iter()
                .map(|cell| {
                    Ok(TableCell {
                        value: row
                            .substitute(&cell.value)
                            .map_err(|name| unresolved(name, cell.location, row))?,
                        location: cell.location,
                    })
                })
                .collect::<Result<Vec<_>, CompileError>>()?;
            Ok(TableRow {
                cells,
                location: table_row.location,
            })
        })
        .collect::<Result<Vec<_>, CompileError>>()?;
    Ok(DataTable {
        rows,
        location: table.location,
    })
}

fn substitute_doc_string(doc: &DocString, row: ExampleRow<'_>) -> Result<DocString, CompileError> {
    let lines = doc
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let at = Location::new(doc.location.line + index + 1, doc.location.column);
            row.substitute(line)
                .map_err(|name| unresolved(name, at, row))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DocString {
        lines,
        ..doc.clone()
    })
}
