use crate::parser::parse_ruleset;
use crate::{Expression, ResourceLimits, VerdictError};

fn load(content: &str) -> Result<Vec<crate::NamedRule>, VerdictError> {
    parse_ruleset(
        content,
        Some("payments.rules".to_string()),
        &ResourceLimits::default(),
    )
}

#[test]
fn test_parse_ruleset_basic() {
    let rules = load(
        r#"# Payment screening
high_value: amount > 1000
uk_high_value: amount > 1000 AND country == UK

small_refund: amount < 50 AND kind == refund
"#,
    )
    .unwrap();

    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].name, "high_value");
    assert_eq!(rules[0].expression, Expression::greater_than("amount", 1000));
    assert_eq!(rules[1].name, "uk_high_value");
    assert_eq!(rules[2].name, "small_refund");
    assert_eq!(rules[2].source.as_deref(), Some("payments.rules"));
}

#[test]
fn test_parse_ruleset_records_spans() {
    let rules = load("a: x > 1\n  second: y == z\n").unwrap();
    let first = rules[0].span.unwrap();
    assert_eq!((first.start, first.end, first.line, first.col), (0, 8, 1, 1));

    let second = rules[1].span.unwrap();
    assert_eq!(second.line, 2);
    assert_eq!(second.col, 3);
    assert_eq!(second.start, 11);
}

#[test]
fn test_parse_ruleset_trims_rule_text() {
    let rules = load("spaced:    amount > 5   \r\n").unwrap();
    assert_eq!(rules[0].expression, Expression::greater_than("amount", 5));
}

#[test]
fn test_parse_ruleset_empty_source() {
    assert!(load("").unwrap().is_empty());
    assert!(load("# only a comment\n\n").unwrap().is_empty());
}

#[test]
fn test_parse_ruleset_relocates_syntax_errors() {
    let err = load("ok: amount > 1\nbroken: amount >= 10\n").unwrap_err();
    let details = err.details().unwrap();
    assert_eq!(details.source_id, "payments.rules");
    assert_eq!(details.span.line, 2);
    assert_eq!(details.span.col, 16);
    assert_eq!(
        &details.source_text[details.span.start..details.span.end],
        ">="
    );
}

#[test]
fn test_parse_ruleset_error_column_counts_characters() {
    let err = load("ok: a > 1\nr: país > x\n").unwrap_err();
    let details = err.details().unwrap();
    assert_eq!(details.span.line, 2);
    assert_eq!(details.span.col, 11);
    assert_eq!(&details.source_text[details.span.start..details.span.end], "x");
}

#[test]
fn test_parse_ruleset_missing_colon() {
    let err = load("amount > 1000\n").unwrap_err();
    assert!(err.to_string().contains("Missing ':'"));
}

#[test]
fn test_parse_ruleset_invalid_name() {
    let err = load("1st rule: amount > 1\n").unwrap_err();
    assert!(err.to_string().contains("Invalid rule name '1st rule'"));
}

#[test]
fn test_parse_ruleset_duplicate_names() {
    let err = load("dup: a > 1\ndup: b > 2\n").unwrap_err();
    let details = err.details().unwrap();
    assert!(details.message.contains("Duplicate rule name 'dup'"));
    assert_eq!(details.span.line, 2);
}

#[test]
fn test_parse_ruleset_collects_every_error() {
    let err = load("a: x >\nb: y > 1\nc: z == \n").unwrap_err();
    match err {
        VerdictError::MultipleErrors(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].details().unwrap().span.line, 1);
            assert_eq!(errors[1].details().unwrap().span.line, 3);
        }
        other => panic!("Expected multiple errors, got {:?}", other),
    }
}

#[test]
fn test_parse_ruleset_source_too_large() {
    let limits = ResourceLimits {
        max_source_bytes: 8,
        ..ResourceLimits::default()
    };
    let err = parse_ruleset("rule: amount > 1", None, &limits).unwrap_err();
    assert!(matches!(
        err,
        VerdictError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_source_bytes"
    ));
}
