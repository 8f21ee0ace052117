//! Tokenizer
//!
//! Rule text is split on single spaces and every fragment is classified by a
//! fixed lookup. Quotes are not special here: `"New York"` becomes the two
//! fragments `"New` and `York"`, so multi-word text literals cannot be
//! written.

use super::RuleSource;
use crate::ast::Span;
use crate::{ComparisonOperator, LogicalOperator, VerdictResult};
use serde::Serialize;
use std::fmt;

/// Classification of a fragment of rule text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "operator", rename_all = "snake_case")]
pub enum TokenKind {
    /// `AND` or `OR`
    Connector(LogicalOperator),
    /// `>`, `<` or `==`
    Comparison(ComparisonOperator),
    /// A field name or a literal; only its position tells which
    Word,
}

impl TokenKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Connector(_) => "connector",
            TokenKind::Comparison(_) => "comparison operator",
            TokenKind::Word => "word",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split a single rule into tokens
pub fn tokenize(text: &str) -> VerdictResult<Vec<Token>> {
    tokenize_source(&RuleSource::new(text, "<input>"))
}

pub(crate) fn tokenize_source(source: &RuleSource) -> VerdictResult<Vec<Token>> {
    let text = source.text;
    if text.trim().is_empty() {
        return Err(source.error_with_suggestion(
            "Empty rule",
            Span::new(0, text.len()),
            "write at least one clause, e.g. `amount > 1000`",
        ));
    }

    let mut tokens = Vec::new();
    let mut offset = 0;

    for fragment in text.split(' ') {
        let start = offset;
        offset += fragment.len() + 1;

        if fragment.is_empty() {
            // Point at the surplus space itself
            let at = if start < text.len() { start } else { start - 1 };
            return Err(source.error_with_suggestion(
                "Unexpected empty token",
                Span::in_text(text, at, at + 1),
                "separate tokens with exactly one space",
            ));
        }

        if let Some((pos, ws)) = fragment.char_indices().find(|(_, c)| c.is_whitespace()) {
            let at = start + pos;
            return Err(source.error_with_suggestion(
                format!("Unexpected whitespace {:?} inside token", ws),
                Span::in_text(text, at, at + ws.len_utf8()),
                "only single spaces may separate tokens",
            ));
        }

        tokens.push(Token {
            kind: classify(fragment),
            text: fragment.to_string(),
            span: Span::in_text(text, start, start + fragment.len()),
        });
    }

    Ok(tokens)
}

pub(crate) fn classify(fragment: &str) -> TokenKind {
    if let Some(connector) = LogicalOperator::from_keyword(fragment) {
        TokenKind::Connector(connector)
    } else if let Some(comparison) = ComparisonOperator::from_symbol(fragment) {
        TokenKind::Comparison(comparison)
    } else {
        TokenKind::Word
    }
}
