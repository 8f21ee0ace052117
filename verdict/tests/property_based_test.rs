use proptest::prelude::*;
use std::collections::HashMap;
use verdict::{Engine, Value};

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not fields", |s| s != "and" && s != "or")
}

fn text_value() -> impl Strategy<Value = String> {
    "[A-Z]{2}".prop_filter("connectors are not values", |s| s != "OR")
}

fn clause() -> impl Strategy<Value = String> {
    prop_oneof![
        (field_name(), -10_000i64..10_000).prop_map(|(f, n)| format!("{} > {}", f, n)),
        (field_name(), -10_000i64..10_000).prop_map(|(f, n)| format!("{} < {}", f, n)),
        (field_name(), text_value()).prop_map(|(f, s)| format!("{} == {}", f, s)),
    ]
}

fn rule_text() -> impl Strategy<Value = String> {
    (
        clause(),
        prop::collection::vec((prop_oneof![Just("AND"), Just("OR")], clause()), 0..6),
    )
        .prop_map(|(first, rest)| {
            let mut text = first;
            for (connector, clause) in rest {
                text.push(' ');
                text.push_str(connector);
                text.push(' ');
                text.push_str(&clause);
            }
            text
        })
}

fn context() -> impl Strategy<Value = HashMap<String, Value>> {
    prop::collection::hash_map(
        field_name(),
        prop_oneof![
            (-10_000i64..10_000).prop_map(Value::from),
            text_value().prop_map(Value::from),
        ],
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_parse_is_idempotent(text in rule_text(), ctx in context()) {
        let engine = Engine::new();
        let first = engine.parse(&text).unwrap();
        let second = engine.parse(&text).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.interpret(&ctx), second.interpret(&ctx));
    }

    #[test]
    fn prop_rendering_round_trips(text in rule_text()) {
        let engine = Engine::new();
        let expr = engine.parse(&text).unwrap();
        prop_assert_eq!(expr.to_string(), text.clone());
        prop_assert_eq!(engine.parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn prop_traced_matches_plain(text in rule_text(), ctx in context()) {
        let expr = Engine::new().parse(&text).unwrap();
        let mut ops = Vec::new();
        prop_assert_eq!(expr.interpret_traced(&ctx, &mut ops), expr.interpret(&ctx));
        prop_assert!(!ops.is_empty());
    }

    #[test]
    fn prop_missing_fields_never_exceed_positive_bounds(n in 1i64..10_000) {
        let expr = Engine::new().parse(&format!("absent > {}", n)).unwrap();
        prop_assert!(!expr.interpret(&HashMap::<String, Value>::new()));
    }

    #[test]
    fn prop_truncated_rules_fail(text in rule_text(), cut in 1usize..3) {
        let tokens: Vec<&str> = text.split(' ').collect();
        let truncated = tokens[..tokens.len() - cut].join(" ");
        prop_assume!(!truncated.is_empty());
        prop_assert!(Engine::new().parse(&truncated).unwrap_err().is_syntax());
    }
}
