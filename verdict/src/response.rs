use crate::{ComparisonOperator, LogicalOperator, NamedRule, Value};
use serde::Serialize;

/// Response from evaluating a set of named rules against one context
#[derive(Debug, Clone, Default, Serialize)]
pub struct Response {
    pub results: Vec<RuleOutcome>,
}

/// Outcome of evaluating a single named rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub rule: NamedRule,
    pub matched: bool,
    pub operations: Vec<OperationRecord>,
}

/// A record of a single step taken while evaluating a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    /// Distance from the root of the tree; the root is 0
    pub depth: usize,
    #[serde(flatten)]
    pub kind: OperationKind,
}

/// The kind of step taken
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationKind {
    /// A comparison leaf was evaluated
    Clause {
        field: String,
        operator: ComparisonOperator,
        operand: Value,
        /// The field value after defaulting
        resolved: Value,
        result: bool,
    },
    /// The right side of a connector was skipped because the left side
    /// already decided the outcome
    ShortCircuit {
        connector: LogicalOperator,
        left: bool,
    },
}

impl Response {
    pub fn add_result(&mut self, result: RuleOutcome) {
        self.results.push(result);
    }

    pub fn get(&self, rule_name: &str) -> Option<&RuleOutcome> {
        self.results.iter().find(|r| r.rule.name == rule_name)
    }

    /// Names of the rules that evaluated to true, in evaluation order
    pub fn matched_rules(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.matched)
            .map(|r| r.rule.name.as_str())
            .collect()
    }
}
