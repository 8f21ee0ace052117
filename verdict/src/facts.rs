//! Facts supplied on the command line or over HTTP
//!
//! `name=value` pairs become a context: values that parse as decimals are
//! numbers, everything else is text with surrounding quotes removed.

use crate::evaluator::context::{json_to_value, EvaluationContext};
use crate::parser::literals::strip_quotes;
use crate::{Value, VerdictError, VerdictResult};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A named set of field values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facts {
    values: BTreeMap<String, Value>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Build facts from a JSON object, skipping values that are neither
    /// numbers nor strings.
    pub fn from_json(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let values = object
            .iter()
            .filter_map(|(name, value)| json_to_value(value).map(|v| (name.clone(), v)))
            .collect();
        Self { values }
    }
}

impl EvaluationContext for Facts {
    fn lookup(&self, field: &str) -> Option<Value> {
        self.values.get(field).cloned()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Facts {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse `name=value` strings into facts. Later entries override earlier
/// ones with the same name.
pub fn parse_facts(fact_strings: &[&str]) -> VerdictResult<Facts> {
    let mut facts = Facts::new();

    for fact_str in fact_strings {
        let (name, raw) = fact_str.split_once('=').ok_or_else(|| {
            VerdictError::Engine(format!(
                "Failed to parse fact '{}': expected name=value",
                fact_str
            ))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(VerdictError::Engine(format!(
                "Failed to parse fact '{}': missing name",
                fact_str
            )));
        }

        facts.insert(name, parse_fact_value(raw.trim()));
    }

    Ok(facts)
}

fn parse_fact_value(raw: &str) -> Value {
    match Decimal::from_str(raw) {
        Ok(number) => Value::Number(number),
        Err(_) => Value::Text(strip_quotes(raw).to_string()),
    }
}
