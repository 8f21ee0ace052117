//! Expression evaluation
//!
//! Recursively evaluates a parsed tree against a context. Evaluation cannot
//! fail: unknown fields fall back to defaults in the resolver, and the tree
//! has already been checked by the parser.

use super::context::{resolve_number, resolve_text, EvaluationContext};
use crate::{
    ComparisonOperator, Expression, LogicalOperator, OperationKind, OperationRecord, Value,
};

impl Expression {
    /// Evaluate the rule against `context`
    ///
    /// `AND` only evaluates its right side when the left side is true, and
    /// `OR` only when the left side is false.
    pub fn interpret<C: EvaluationContext + ?Sized>(&self, context: &C) -> bool {
        match self {
            Expression::Comparison {
                field,
                operator,
                operand,
            } => compare(context, field, *operator, operand).0,
            Expression::Logical {
                operator: LogicalOperator::And,
                left,
                right,
            } => left.interpret(context) && right.interpret(context),
            Expression::Logical {
                operator: LogicalOperator::Or,
                left,
                right,
            } => left.interpret(context) || right.interpret(context),
        }
    }

    /// Evaluate like [`Expression::interpret`] while recording every clause
    /// evaluated and every right side skipped.
    pub fn interpret_traced<C: EvaluationContext + ?Sized>(
        &self,
        context: &C,
        operations: &mut Vec<OperationRecord>,
    ) -> bool {
        evaluate_traced(self, context, operations, 0)
    }
}

fn evaluate_traced<C: EvaluationContext + ?Sized>(
    expr: &Expression,
    context: &C,
    operations: &mut Vec<OperationRecord>,
    depth: usize,
) -> bool {
    match expr {
        Expression::Comparison {
            field,
            operator,
            operand,
        } => {
            let (result, resolved) = compare(context, field, *operator, operand);
            operations.push(OperationRecord {
                depth,
                kind: OperationKind::Clause {
                    field: field.clone(),
                    operator: *operator,
                    operand: operand.clone(),
                    resolved,
                    result,
                },
            });
            result
        }
        Expression::Logical {
            operator,
            left,
            right,
        } => {
            let left_result = evaluate_traced(left, context, operations, depth + 1);
            let decided = match operator {
                LogicalOperator::And => !left_result,
                LogicalOperator::Or => left_result,
            };

            if decided {
                operations.push(OperationRecord {
                    depth,
                    kind: OperationKind::ShortCircuit {
                        connector: *operator,
                        left: left_result,
                    },
                });
                return left_result;
            }

            evaluate_traced(right, context, operations, depth + 1)
        }
    }
}

/// Compare one field against a literal, returning the result and the value
/// the field resolved to.
fn compare<C: EvaluationContext + ?Sized>(
    context: &C,
    field: &str,
    operator: ComparisonOperator,
    operand: &Value,
) -> (bool, Value) {
    match operator {
        ComparisonOperator::GreaterThan | ComparisonOperator::LessThan => {
            let actual = resolve_number(context, field);
            // The parser only builds numeric operands for these operators
            let expected = operand.as_number().unwrap_or_default();
            let result = if operator == ComparisonOperator::GreaterThan {
                actual > expected
            } else {
                actual < expected
            };
            (result, Value::Number(actual))
        }
        ComparisonOperator::Equal => {
            let actual = resolve_text(context, field);
            let result = match operand {
                Value::Text(expected) => actual == *expected,
                Value::Number(_) => false,
            };
            (result, Value::Text(actual))
        }
    }
}
