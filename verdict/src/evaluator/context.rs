//! Evaluation contexts and field resolution
//!
//! A context is anything that can look a field up by name. The resolver
//! functions below turn the looked-up value into what a comparison needs and
//! fall back to a type-appropriate default when the field is absent or holds
//! the other kind of value.

use crate::Value;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Field lookup capability required from callers
///
/// Implementations are only ever read; evaluating the same rule against one
/// context from several threads needs nothing beyond `Sync`.
pub trait EvaluationContext {
    fn lookup(&self, field: &str) -> Option<Value>;
}

impl<T: EvaluationContext + ?Sized> EvaluationContext for &T {
    fn lookup(&self, field: &str) -> Option<Value> {
        (**self).lookup(field)
    }
}

impl EvaluationContext for HashMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl EvaluationContext for BTreeMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

/// JSON objects: numbers read as decimals, strings as text, anything else
/// as absent.
impl EvaluationContext for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, field: &str) -> Option<Value> {
        json_to_value(self.get(field)?)
    }
}

pub(crate) fn json_to_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok()
            .map(Value::Number),
        serde_json::Value::String(s) => Some(Value::Text(s.clone())),
        _ => None,
    }
}

/// Resolve a field for `>`/`<`; absent or textual values read as zero
pub fn resolve_number<C: EvaluationContext + ?Sized>(context: &C, field: &str) -> Decimal {
    match context.lookup(field) {
        Some(Value::Number(n)) => n,
        _ => Decimal::ZERO,
    }
}

/// Resolve a field for `==`; absent or numeric values read as empty text
pub fn resolve_text<C: EvaluationContext + ?Sized>(context: &C, field: &str) -> String {
    match context.lookup(field) {
        Some(Value::Text(s)) => s,
        _ => String::new(),
    }
}
