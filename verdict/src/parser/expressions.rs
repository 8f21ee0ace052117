//! Clause and connector parsing
//!
//! The grammar has no precedence and no grouping: the first clause becomes
//! the accumulated expression, and every `connector clause` pair that follows
//! wraps it as the left child of a new node.

use super::literals::parse_operand;
use super::tokens::{Token, TokenKind};
use super::RuleSource;
use crate::ast::Span;
use crate::{Expression, LogicalOperator, ResourceLimits, VerdictError, VerdictResult};

const CLAUSE_LEN: usize = 3;

/// Cursor over the token sequence of one rule
struct TokenStream<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenStream<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn remaining(&self) -> &'t [Token] {
        &self.tokens[self.pos..]
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn previous(&self) -> Option<&'t Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }
}

/// Build an expression tree from a rule's tokens
pub(crate) fn parse_expression(
    tokens: &[Token],
    source: &RuleSource,
    limits: &ResourceLimits,
) -> VerdictResult<Expression> {
    let mut stream = TokenStream::new(tokens);
    let mut expression = parse_clause(&mut stream, source)?;
    let mut clauses = 1;

    while !stream.is_empty() {
        let connector = parse_connector(&mut stream, source)?;
        let right = parse_clause(&mut stream, source)?;

        clauses += 1;
        if clauses > limits.max_clauses {
            return Err(VerdictError::ResourceLimitExceeded {
                limit_name: "max_clauses".to_string(),
                limit_value: limits.max_clauses.to_string(),
                actual_value: count_clauses(tokens).to_string(),
                suggestion: "Split the rule into several smaller rules".to_string(),
            });
        }

        expression = Expression::logical(connector, expression, right);
    }

    Ok(expression)
}

fn parse_clause(stream: &mut TokenStream, source: &RuleSource) -> VerdictResult<Expression> {
    let remaining = stream.remaining();
    if remaining.len() < CLAUSE_LEN {
        return Err(incomplete_clause(stream, source));
    }

    let field = &remaining[0];
    let operator = &remaining[1];
    let operand = &remaining[2];
    stream.pos += CLAUSE_LEN;

    if field.kind != TokenKind::Word {
        return Err(source.error(
            format!(
                "Expected a field name, found {} '{}'",
                field.kind.describe(),
                field.text
            ),
            field.span,
        ));
    }

    let operator_kind = match operator.kind {
        TokenKind::Comparison(op) => op,
        _ => {
            return Err(source.error_with_suggestion(
                format!("Unexpected operator: '{}'", operator.text),
                operator.span,
                "compare with one of '>', '<', '=='",
            ))
        }
    };

    if operand.kind != TokenKind::Word {
        return Err(source.error(
            format!(
                "Expected a value, found {} '{}'",
                operand.kind.describe(),
                operand.text
            ),
            operand.span,
        ));
    }

    let value = parse_operand(operand, operator_kind, source)?;
    Ok(Expression::comparison(field.text.clone(), operator_kind, value))
}

fn parse_connector(stream: &mut TokenStream, source: &RuleSource) -> VerdictResult<LogicalOperator> {
    let token = match stream.advance() {
        Some(token) => token,
        None => return Err(incomplete_clause(stream, source)),
    };

    match token.kind {
        TokenKind::Connector(connector) => Ok(connector),
        _ => {
            let suggestion = if LogicalOperator::from_keyword(&token.text.to_uppercase()).is_some()
            {
                format!("connectors are upper case: '{}'", token.text.to_uppercase())
            } else {
                "join clauses with 'AND' or 'OR'".to_string()
            };
            Err(source.error_with_suggestion(
                format!("Unexpected connector: '{}'", token.text),
                token.span,
                suggestion,
            ))
        }
    }
}

fn incomplete_clause(stream: &TokenStream, source: &RuleSource) -> VerdictError {
    let remaining = stream.remaining();
    let span = match (remaining.first(), remaining.last()) {
        (Some(first), Some(last)) => first.span.to(last.span),
        // Nothing left: blame the connector that promised another clause
        _ => stream.previous().map(|token| token.span).unwrap_or_else(|| {
            let end = source.text.len();
            Span::in_text(source.text, end, end)
        }),
    };

    source.error_with_suggestion(
        format!(
            "Incomplete clause: expected 'field operator value', found {} token(s)",
            remaining.len()
        ),
        span,
        "every clause needs a field, one of '>', '<', '==', and a value",
    )
}

fn count_clauses(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Comparison(_)))
        .count()
}

