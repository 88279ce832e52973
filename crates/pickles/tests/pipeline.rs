//! End-to-end tests running fixture documents through parse and compile.

#![expect(clippy::expect_used, reason = "tests fail loudly on fixture errors")]

use std::fs;
use std::path::PathBuf;

use pickles::ast::StepArgument;
use pickles::{Error, ExecutableUnit, Feature, StepKeyword, compile, parse, parse_and_compile};
use rstest::rstest;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features")
        .join(name);
    fs::read_to_string(&path).expect("fixture should be readable")
}

fn parse_fixture(name: &str) -> Feature {
    parse(&fixture(name)).expect("fixture should parse")
}

fn compile_fixture(name: &str) -> Vec<ExecutableUnit> {
    compile(&parse_fixture(name)).expect("fixture should compile")
}

fn step_names(unit: &ExecutableUnit) -> Vec<&str> {
    unit.steps.iter().map(|step| step.name.as_str()).collect()
}

#[test]
fn compiles_background() {
    let units = compile_fixture("with_background.feature");
    assert_eq!(units.len(), 2);
    let first = units.first().expect("first unit");
    assert_eq!(
        step_names(first),
        vec!["a background step", "I have 3 more cukes in my belly"]
    );
    let second = units.get(1).expect("second unit");
    assert_eq!(second.steps.len(), 3);
}

#[test]
fn expands_outline_across_examples_blocks() {
    let units = compile_fixture("outline.feature");
    let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["eating 3 cukes", "eating 5 cukes", "eating 12 cukes"]
    );

    let last = units.last().expect("last unit");
    assert_eq!(
        step_names(last),
        vec![
            "a basket of <count> cukes",
            "I have 12 cukes",
            "I eat 5 of them",
            "I should have 7 cukes",
        ]
    );
    let Some(StepArgument::DataTable(table)) = &last.steps.last().expect("then step").argument
    else {
        panic!("expected a data table on the final step");
    };
    assert_eq!(
        table.values(),
        vec![vec!["remaining".to_string()], vec!["7".to_string()]]
    );

    let tags: Vec<_> = units.iter().map(|u| u.tags.to_vec()).collect();
    assert_eq!(
        tags,
        vec![
            vec!["@cukes", "@eating", "@small"],
            vec!["@cukes", "@eating", "@small"],
            vec!["@cukes", "@eating", "@large"],
        ]
    );
}

#[test]
fn keeps_feature_description() {
    let feature = parse_fixture("outline.feature");
    assert_eq!(
        feature.description,
        vec!["As a hungry person", "I want to eat cucumbers"]
    );
}

#[test]
fn rules_scope_their_backgrounds() {
    let units = compile_fixture("rules.feature");
    let summary: Vec<_> = units
        .iter()
        .map(|u| (u.name.as_str(), u.rule.as_deref(), u.steps.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("balance is visible", None, 2),
            ("under the limit", Some("transfers respect the daily limit"), 4),
            ("over the limit", Some("transfers respect the daily limit"), 4),
            ("audit entry", Some("transfers are logged"), 3),
        ]
    );
    let audit = units.last().expect("audit unit");
    let Some(StepArgument::DocString(doc)) = &audit.steps.last().expect("step").argument else {
        panic!("expected a doc string");
    };
    assert_eq!(doc.content(), "transfer: 10");
}

#[test]
fn french_document_uses_french_keywords() {
    let feature = parse_fixture("french.feature");
    assert_eq!(feature.language, "fr");
    assert_eq!(feature.keyword, "Fonctionnalité");

    let units = compile(&feature).expect("french fixture should compile");
    let unit = units.first().expect("one unit");
    assert_eq!(unit.name, "additionner 1 et 2");
    let resolved: Vec<_> = unit
        .steps
        .iter()
        .map(|s| (s.keyword.as_str(), s.keyword_type))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("Soit ", StepKeyword::Given),
            ("Quand ", StepKeyword::When),
            ("Alors ", StepKeyword::Then),
            ("Et ", StepKeyword::Then),
        ]
    );
}

#[test]
fn unknown_placeholder_fails_compilation() {
    let err = parse_and_compile(&fixture("unknown_placeholder.feature"))
        .expect_err("missing column should fail");
    assert_eq!(err.line(), 4);
    let Error::Compile(err) = err else {
        panic!("expected a compile error, got {err:?}");
    };
    assert_eq!(err.placeholder, "size");
    assert_eq!(
        err.to_string(),
        "line 4, column 5: placeholder '<size>' not found in Examples table. \
         Available columns: [count]"
    );
}

#[rstest]
#[case("Feature: f\n  Scenario: s\n    Given x\n      \"\"\"\n      never closed\n", 4)]
#[case("Feature: f\n  Scenario: s\n    Given x\n      | a | b\n", 4)]
#[case("Feature: f\n  Scenario: s\n    And x\n", 3)]
fn errors_carry_source_line(#[case] text: &str, #[case] line: usize) {
    let err = parse_and_compile(text).expect_err("document should be rejected");
    let Error::Parse(err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(err.line(), line);
}

#[test]
fn tokenize_matches_lexer_output() {
    let text = fixture("with_background.feature");
    let tokens = pickles::tokenize(&text).expect("fixture should tokenize");
    let mut lexer = pickles::Lexer::new();
    assert_eq!(tokens, lexer.tokenize(&text).expect("fixture should tokenize"));
    assert!(tokens.last().is_some_and(|t| t.is(pickles::TokenKind::Eof)));
}
