use crate::ast::Span;
use crate::error::VerdictError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::{Expression, NamedRule};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub mod expressions;
pub mod literals;
pub mod tokens;

pub use tokens::{tokenize, Token, TokenKind};

/// Rule text together with what error reports need to point into it
pub(crate) struct RuleSource<'a> {
    pub text: &'a str,
    pub source_id: &'a str,
    source_text: Arc<str>,
}

impl<'a> RuleSource<'a> {
    pub fn new(text: &'a str, source_id: &'a str) -> Self {
        Self {
            text,
            source_id,
            source_text: Arc::from(text),
        }
    }

    pub fn error(&self, message: impl Into<String>, span: Span) -> VerdictError {
        VerdictError::syntax(message, span, self.source_id, Arc::clone(&self.source_text))
    }

    pub fn error_with_suggestion(
        &self,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> VerdictError {
        VerdictError::syntax_with_suggestion(
            message,
            span,
            self.source_id,
            Arc::clone(&self.source_text),
            suggestion,
        )
    }
}

/// Parse a single rule into an expression tree.
///
/// Parsing is all-or-nothing: any malformed clause, unknown operator or
/// dangling connector fails the whole rule with a syntax error.
pub fn parse(
    text: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<Expression, VerdictError> {
    let source_id = source_id.unwrap_or_else(|| "<input>".to_string());

    if text.len() > limits.max_rule_bytes {
        return Err(VerdictError::ResourceLimitExceeded {
            limit_name: "max_rule_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_rule_bytes),
            actual_value: format!("{} bytes", text.len()),
            suggestion: "Split the rule into several smaller rules".to_string(),
        });
    }

    let source = RuleSource::new(text, &source_id);
    let tokens = tokens::tokenize_source(&source)?;
    expressions::parse_expression(&tokens, &source, limits)
}

/// Parse a rule-set source: one `name: rule` per line.
///
/// Blank lines and lines starting with `#` are skipped. Every line is
/// parsed even after a failure so that all problems are reported at once;
/// if any line fails, no rules are returned.
pub fn parse_ruleset(
    content: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<Vec<NamedRule>, VerdictError> {
    let source_id = source_id.unwrap_or_else(|| "<input>".to_string());

    if content.len() > limits.max_source_bytes {
        return Err(VerdictError::ResourceLimitExceeded {
            limit_name: "max_source_bytes".to_string(),
            limit_value: format!(
                "{} bytes ({} MB)",
                limits.max_source_bytes,
                limits.max_source_bytes / (1024 * 1024)
            ),
            actual_value: format!(
                "{} bytes ({:.2} MB)",
                content.len(),
                content.len() as f64 / (1024.0 * 1024.0)
            ),
            suggestion: "Reduce the source size or split it into multiple files".to_string(),
        });
    }

    let whole = RuleSource::new(content, &source_id);
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut line_offset = 0;

    for (index, raw_line) in content.split('\n').enumerate() {
        let line_start = line_offset;
        line_offset += raw_line.len() + 1;
        let line_number = index + 1;

        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - trimmed.len();

        let at = |start: usize, end: usize| Span {
            start: line_start + start,
            end: line_start + end,
            line: line_number,
            col: line[..start].chars().count() + 1,
        };

        let Some(colon) = line.find(':') else {
            errors.push(whole.error_with_suggestion(
                "Missing ':' between rule name and rule",
                at(indent, line.len()),
                "write rules as 'name: field > value'",
            ));
            continue;
        };

        let name = line[..colon].trim();
        let name_start = indent;
        if !is_rule_name(name) {
            errors.push(whole.error_with_suggestion(
                format!("Invalid rule name '{}'", name),
                at(name_start, colon),
                "rule names start with a letter or '_' and contain letters, digits, '_', '-' or '.'",
            ));
            continue;
        }

        if !seen.insert(name.to_string()) {
            errors.push(whole.error(
                format!("Duplicate rule name '{}'", name),
                at(name_start, name_start + name.len()),
            ));
            continue;
        }

        let after_colon = &line[colon + 1..];
        let rule_text = after_colon.trim();
        let rule_start = colon + 1 + (after_colon.len() - after_colon.trim_start().len());
        let rule_end = rule_start + rule_text.len();

        match parse(rule_text, Some(source_id.clone()), limits) {
            Ok(expression) => {
                rules.push(
                    NamedRule::new(name, expression)
                        .with_source(source_id.clone(), at(name_start, rule_end)),
                );
            }
            Err(error) => {
                errors.push(error.relocate(
                    line_start + rule_start,
                    line_number,
                    line[..rule_start].chars().count() + 1,
                    &source_id,
                    &whole.source_text,
                ));
            }
        }
    }

    match errors.len() {
        0 => {
            debug!(source = %source_id, rules = rules.len(), "parsed rule set");
            Ok(rules)
        }
        1 => Err(errors.remove(0)),
        _ => Err(VerdictError::MultipleErrors(errors)),
    }
}

fn is_rule_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
