use crate::ast::Span;
use crate::parser::tokens::{classify, TokenKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A value supplied by a context or written as a literal in a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Value {
    Number(Decimal),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Comparison operators allowed inside a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    Equal,
}

impl ComparisonOperator {
    /// Look up the operator spelled exactly as `symbol`
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(ComparisonOperator::GreaterThan),
            "<" => Some(ComparisonOperator::LessThan),
            "==" => Some(ComparisonOperator::Equal),
            _ => None,
        }
    }

    /// Returns a human-readable name for the operator
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterThan => "greater than",
            ComparisonOperator::LessThan => "less than",
            ComparisonOperator::Equal => "equal",
        }
    }}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::GreaterThan => write!(f, ">"),
            ComparisonOperator::LessThan => write!(f, "<"),
            ComparisonOperator::Equal => write!(f, "=="),
        }
    }
}

/// Connectors joining two sub-expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AND" => Some(LogicalOperator::And),
            "OR" => Some(LogicalOperator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "AND"),
            LogicalOperator::Or => write!(f, "OR"),
        }
    }
}

/// A parsed rule
///
/// Leaves are comparisons, interior nodes are connectors that own both
/// children. Trees are built bottom-up by the parser and never change
/// afterwards, so a single tree can be shared between threads and evaluated
/// against any number of contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Comparison {
        field: String,
        operator: ComparisonOperator,
        operand: Value,
    },
    Logical {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn comparison(
        field: impl Into<String>,
        operator: ComparisonOperator,
        operand: impl Into<Value>,
    ) -> Self {
        Expression::Comparison {
            field: field.into(),
            operator,
            operand: operand.into(),
        }
    }

    pub fn greater_than(field: impl Into<String>, operand: impl Into<Decimal>) -> Self {
        Self::comparison(field, ComparisonOperator::GreaterThan, Value::Number(operand.into()))
    }

    pub fn less_than(field: impl Into<String>, operand: impl Into<Decimal>) -> Self {
        Self::comparison(field, ComparisonOperator::LessThan, Value::Number(operand.into()))
    }

    pub fn equals(field: impl Into<String>, operand: impl Into<String>) -> Self {
        Self::comparison(field, ComparisonOperator::Equal, Value::Text(operand.into()))
    }

    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(self, right: Expression) -> Self {
        Self::logical(LogicalOperator::And, self, right)
    }

    pub fn or(self, right: Expression) -> Self {
        Self::logical(LogicalOperator::Or, self, right)
    }

    /// Number of comparison leaves in the tree
    pub fn clause_count(&self) -> usize {
        match self {
            Expression::Comparison { .. } => 1,
            Expression::Logical { left, right, .. } => left.clause_count() + right.clause_count(),
        }
    }

    /// Field names in the order they appear in the rule (duplicates kept)
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Expression::Comparison { field, .. } => vec![field.as_str()],
            Expression::Logical { left, right, .. } => {
                let mut fields = left.fields();
                fields.extend(right.fields());
                fields
            }
        }
    }
}

/// Renders canonical rule text. Trees produced by the parser render back
/// into text that parses into an equal tree; text operands that would read
/// as a connector or operator, and the empty text, are quoted.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison {
                field,
                operator,
                operand,
            } => match operand {
                Value::Number(n) => write!(f, "{} {} {}", field, operator, n),
                Value::Text(s) if s.is_empty() || classify(s) != TokenKind::Word => {
                    write!(f, "{} {} \"{}\"", field, operator, s)
                }
                Value::Text(s) => write!(f, "{} {} {}", field, operator, s),
            },
            Expression::Logical {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
        }
    }
}

/// A rule registered under a name, as loaded from a rule-set source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRule {
    pub name: String,
    pub expression: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl NamedRule {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            expression,
            source: None,
            span: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>, span: Span) -> Self {
        self.source = Some(source.into());
        self.span = Some(span);
        self
    }
}
