//! Rule evaluation
//!
//! Evaluates named rules by:
//! 1. Selecting the requested rules (all rules when none are requested)
//! 2. Interpreting each tree against the context with tracing enabled
//! 3. Building a response with one outcome per rule

pub mod context;
pub mod expression;

use crate::{NamedRule, Response, RuleOutcome, VerdictError, VerdictResult};
use context::EvaluationContext;

/// Evaluates named rules against a context
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `rules` in order.
    ///
    /// When `requested` is given, only those rules are evaluated; naming a
    /// rule that does not exist is an error.
    pub fn evaluate_rules<C: EvaluationContext + ?Sized>(
        &self,
        rules: &[NamedRule],
        context: &C,
        requested: Option<&[String]>,
    ) -> VerdictResult<Response> {
        if let Some(names) = requested {
            if let Some(missing) = names.iter().find(|n| !rules.iter().any(|r| r.name == **n)) {
                return Err(VerdictError::Engine(format!("Rule '{}' not found", missing)));
            }
        }

        let mut response = Response::default();
        for rule in rules {
            if let Some(names) = requested {
                if !names.contains(&rule.name) {
                    continue;
                }
            }

            let mut operations = Vec::new();
            let matched = rule.expression.interpret_traced(context, &mut operations);
            response.add_result(RuleOutcome {
                rule: rule.clone(),
                matched,
                operations,
            });
        }

        Ok(response)
    }
}
