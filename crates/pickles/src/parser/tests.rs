//! Unit tests for the grammar rules.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn parser() -> Parser<'static> {
    Parser::new()
}

fn syntax_error(parser: &mut Parser<'_>, text: &str) -> SyntaxError {
    match parser.parse(text) {
        Err(ParseError::Syntax(err)) => err,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

fn only_scenario(feature: &Feature) -> &Scenario {
    match feature.children.as_slice() {
        [ScenarioDefinition::Scenario(scenario)] => scenario,
        other => panic!("expected a single scenario, got {other:?}"),
    }
}

fn only_outline(feature: &Feature) -> &ScenarioOutline {
    match feature.children.as_slice() {
        [ScenarioDefinition::Outline(outline)] => outline,
        other => panic!("expected a single outline, got {other:?}"),
    }
}

#[rstest]
fn parses_feature_header(mut parser: Parser<'static>) {
    let feature = parser
        .parse("@billing @slow\nFeature: Invoices\n  In order to get paid\n  As a vendor\n")
        .unwrap();
    assert_eq!(feature.keyword, "Feature");
    assert_eq!(feature.name, "Invoices");
    assert_eq!(feature.description, vec!["In order to get paid", "As a vendor"]);
    let tags: Vec<_> = feature.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["@billing", "@slow"]);
    assert_eq!(feature.location, Location::new(2, 1));
    assert_eq!(feature.language, "en");
    assert!(feature.background.is_none());
}

#[rstest]
fn comments_are_ignored(mut parser: Parser<'static>) {
    let feature = parser
        .parse("# top\nFeature: f\n  # inside\n  Scenario: s\n    # between\n    Given x\n")
        .unwrap();
    assert_eq!(only_scenario(&feature).steps.len(), 1);
}

#[rstest]
fn resolves_conjunctions(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  Scenario: s\n",
            "    Given a\n",
            "    And b\n",
            "    When c\n",
            "    But d\n",
            "    Then e\n",
            "    And f\n",
        ))
        .unwrap();
    let steps = &only_scenario(&feature).steps;
    let resolved: Vec<_> = steps
        .iter()
        .map(|s| (s.keyword.as_str(), s.keyword_type))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("Given ", StepKeyword::Given),
            ("And ", StepKeyword::Given),
            ("When ", StepKeyword::When),
            ("But ", StepKeyword::When),
            ("Then ", StepKeyword::Then),
            ("And ", StepKeyword::Then),
        ]
    );
}

#[rstest]
#[case("Feature: f\n  Scenario: s\n    And a\n", 3)]
#[case("Feature: f\n  Background:\n    Given a\n  Scenario: s\n    But b\n", 5)]
fn conjunction_needs_antecedent_in_same_block(
    mut parser: Parser<'static>,
    #[case] text: &str,
    #[case] line: usize,
) {
    let err = syntax_error(&mut parser, text);
    assert_eq!((err.line, err.column), (line, 5));
    assert_eq!(err.expected, "a preceding Given, When or Then step");
}

#[rstest]
fn parses_background(mut parser: Parser<'static>) {
    let feature = parser
        .parse("Feature: f\n  Background: setup\n    Given a\n  Scenario: s\n    When b\n")
        .unwrap();
    let background = feature.background.unwrap();
    assert_eq!(background.name, "setup");
    assert_eq!(background.steps.len(), 1);
    assert_eq!(background.location, Location::new(2, 3));
}

#[rstest]
fn background_tags_are_rejected(mut parser: Parser<'static>) {
    let err = syntax_error(&mut parser, "Feature: f\n  @tagged\n  Background:\n    Given a\n");
    assert_eq!((err.line, err.column), (2, 3));
    assert_eq!(err.found, "a tag `@tagged`");
}

#[rstest]
fn parses_data_table(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  Scenario: s\n",
            "    Given users\n",
            "      | name  | role  |\n",
            "      | alice | a \\| b |\n",
            "      |       | x  y  |\n",
        ))
        .unwrap();
    let step = only_scenario(&feature).steps.first().unwrap();
    let Some(StepArgument::DataTable(table)) = &step.argument else {
        panic!("expected a data table");
    };
    assert_eq!(
        table.values(),
        vec![
            vec!["name".to_string(), "role".to_string()],
            vec!["alice".to_string(), "a | b".to_string()],
            vec![String::new(), "x  y".to_string()],
        ]
    );
    assert_eq!(table.location, Location::new(4, 7));
    let cell = table.rows.get(1).and_then(|row| row.cells.first()).unwrap();
    assert_eq!(cell.location, Location::new(5, 9));
}

#[rstest]
fn table_rows_must_share_width(mut parser: Parser<'static>) {
    let err = syntax_error(
        &mut parser,
        "Feature: f\n  Scenario: s\n    Given t\n      | a | b |\n      | c |\n",
    );
    assert_eq!(err.line, 5);
    assert_eq!(err.expected, "a row of 2 cells");
    assert_eq!(err.found, "1 cells");
}

#[rstest]
fn parses_doc_string_and_strips_indentation(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  Scenario: s\n",
            "    Given a blog post\n",
            "      ```\n",
            "      Title\n",
            "        indented\n",
            "    shallow\n",
            "      ```\n",
            "    When it is published\n",
        ))
        .unwrap();
    let steps = &only_scenario(&feature).steps;
    let Some(StepArgument::DocString(doc)) = &steps.first().unwrap().argument else {
        panic!("expected a doc string");
    };
    assert_eq!(doc.lines, vec!["Title\n", "  indented\n", "shallow\n"]);
    assert_eq!(doc.delimiter, "```");
    assert_eq!(doc.indent, 6);
    assert_eq!(doc.location, Location::new(4, 7));
    assert_eq!(doc.content(), "Title\n  indented\nshallow");
    assert_eq!(steps.len(), 2);
}

#[rstest]
fn empty_doc_string_is_still_an_argument(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  Scenario: s\n",
            "    Given nothing to say\n",
            "      \"\"\"\n",
            "      \"\"\"\n",
            "    Then silence\n",
        ))
        .unwrap();
    let steps = &only_scenario(&feature).steps;
    let Some(StepArgument::DocString(doc)) = &steps.first().unwrap().argument else {
        panic!("expected a doc string");
    };
    assert!(doc.lines.is_empty());
    assert_eq!(doc.delimiter, "\"\"\"");
    assert_eq!(doc.location, Location::new(4, 7));
    assert_eq!(doc.content(), "");
    assert_eq!(steps.get(1).unwrap().argument, None);
}

#[rstest]
#[case("      \"\"\"\n      \"\"\"\n      \"\"\"\n      two\n      \"\"\"\n", 7)]
#[case("      \"\"\"\n      one\n      \"\"\"\n      ```\n      two\n      ```\n", 8)]
fn second_doc_string_on_a_step_is_rejected(
    mut parser: Parser<'static>,
    #[case] blocks: &str,
    #[case] line: usize,
) {
    let text = format!("Feature: f\n  Scenario: s\n    Given a\n{blocks}");
    let err = syntax_error(&mut parser, &text);
    assert_eq!(err.line, line);
    assert_eq!(err.found, "a doc string");
}

#[rstest]
fn definitions_expose_common_fields(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  @plain\n",
            "  Scenario: concrete\n",
            "    Given a\n",
            "  Scenario Outline: template <x>\n",
            "    Given <x>\n",
            "    When b\n",
        ))
        .unwrap();
    let summary: Vec<_> = feature
        .children
        .iter()
        .map(|definition| {
            (
                definition.name(),
                definition.tags().len(),
                definition.steps().len(),
                definition.location(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("concrete", 1, 1, Location::new(3, 3)),
            ("template <x>", 0, 2, Location::new(5, 3)),
        ]
    );
}

#[rstest]
fn parses_outline_with_examples(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  @outline\n",
            "  Scenario Outline: eating <count>\n",
            "    Given I have <count> cukes\n",
            "\n",
            "    @small\n",
            "    Examples: few\n",
            "      | count |\n",
            "      | 3     |\n",
            "\n",
            "    Examples:\n",
            "      | count |\n",
            "      | 5     |\n",
        ))
        .unwrap();
    let outline = only_outline(&feature);
    assert_eq!(outline.name, "eating <count>");
    assert_eq!(outline.examples.len(), 2);
    let first = outline.examples.first().unwrap();
    assert_eq!(first.name, "few");
    assert_eq!(first.tags.first().map(|t| t.name.as_str()), Some("@small"));
    assert_eq!(first.data_rows().len(), 1);
}

#[rstest]
fn outline_without_examples_is_accepted(mut parser: Parser<'static>) {
    let feature = parser
        .parse("Feature: f\n  Scenario Outline: o\n    Given <x>\n")
        .unwrap();
    assert!(only_outline(&feature).examples.is_empty());
}

#[rstest]
fn examples_require_a_table(mut parser: Parser<'static>) {
    let err = syntax_error(
        &mut parser,
        "Feature: f\n  Scenario Outline: o\n    Given <x>\n    Examples:\n",
    );
    assert_eq!(err.expected, "an examples table");
    assert_eq!(err.found, "end of input");
}

#[rstest]
fn examples_header_must_be_unique(mut parser: Parser<'static>) {
    let err = syntax_error(
        &mut parser,
        "Feature: f\n  Scenario Outline: o\n    Given <x>\n    Examples:\n      | x | x |\n      | 1 | 2 |\n",
    );
    assert_eq!((err.line, err.column), (5, 13));
    assert_eq!(err.found, "duplicate column `x`");
}

#[rstest]
fn parses_rules(mut parser: Parser<'static>) {
    let feature = parser
        .parse(concat!(
            "Feature: f\n",
            "  Scenario: top\n",
            "    Given a\n",
            "  @r\n",
            "  Rule: first\n",
            "    Background:\n",
            "      Given rule setup\n",
            "    Scenario: inner\n",
            "      Then b\n",
            "  Rule: second\n",
            "    Example: other\n",
            "      Then c\n",
        ))
        .unwrap();
    assert_eq!(feature.children.len(), 1);
    assert_eq!(feature.rules.len(), 2);
    let first = feature.rules.first().unwrap();
    assert_eq!(first.name, "first");
    assert_eq!(first.tags.len(), 1);
    assert!(first.background.is_some());
    assert_eq!(first.children.first().map(ScenarioDefinition::name), Some("inner"));
}

#[rstest]
#[case("", 1, "`Feature:`", "end of input")]
#[case("Scenario: s\n", 1, "`Feature:`", "`Scenario:`")]
#[case("Feature:\n", 2, "a feature name", "end of input")]
#[case("Feature: f\n  Given loose step\n", 2, DEFINITION_EXPECTED, "`Given`")]
#[case("Feature: f\n  Scenario: s\n    Given \n", 4, "a step name", "end of input")]
#[case("Feature: f\n  Scenario: s\n    Examples:\n", 3, DEFINITION_EXPECTED, "`Examples:`")]
#[case("Feature: f\n  @dangling\n", 2, DEFINITION_EXPECTED, "a tag `@dangling`")]
#[case("Feature: f\nFeature: g\n", 2, DEFINITION_EXPECTED, "`Feature:`")]
fn reports_first_violation(
    mut parser: Parser<'static>,
    #[case] text: &str,
    #[case] line: usize,
    #[case] expected: &str,
    #[case] found: &str,
) {
    let err = syntax_error(&mut parser, text);
    assert_eq!(err.line, line);
    assert_eq!(err.expected, expected);
    assert_eq!(err.found, found);
}

#[rstest]
fn lexical_errors_surface_unchanged(mut parser: Parser<'static>) {
    let err = parser
        .parse("Feature: f\n  Scenario: s\n    Given t\n      | a\n")
        .unwrap_err();
    assert_eq!(err, ParseError::Lex(LexError::UnterminatedTableRow { line: 4 }));
}

#[rstest]
fn parser_is_reusable(mut parser: Parser<'static>) {
    let first = parser.parse("# language: fr\nFonctionnalité: a\n").unwrap();
    let second = parser.parse("Feature: b\n").unwrap();
    assert_eq!(first.language, "fr");
    assert_eq!(second.language, "en");
}
