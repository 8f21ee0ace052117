use crate::ast::Span;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with source location
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for Verdict with source location tracking
///
/// Evaluation never fails, so every variant belongs to parsing, loading or
/// rule lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerdictError {
    /// Malformed rule text: tokenizer and parser failures alike
    #[error("Syntax error: {}", format_details(.0))]
    Syntax(Box<ErrorDetails>),

    /// Engine error without specific source location
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Multiple errors collected together
    #[error("Multiple errors:\n{}", format_numbered(.0))]
    MultipleErrors(Vec<VerdictError>),
}

impl VerdictError {
    /// Create a syntax error with source information
    pub fn syntax(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Syntax(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a syntax error with suggestion
    pub fn syntax_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Syntax(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, VerdictError::Syntax(_))
    }

    /// Source details for syntax errors
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            VerdictError::Syntax(details) => Some(details),
            _ => None,
        }
    }

    /// Re-anchor a syntax error raised against a single rule into the
    /// rule-set source it was loaded from.
    pub(crate) fn relocate(
        self,
        offset: usize,
        line: usize,
        col: usize,
        source_id: &str,
        source_text: &Arc<str>,
    ) -> Self {
        match self {
            VerdictError::Syntax(mut details) => {
                details.span = details.span.relocate(offset, line, col);
                details.source_id = source_id.to_string();
                details.source_text = Arc::clone(source_text);
                VerdictError::Syntax(details)
            }
            other => other,
        }
    }
}

fn format_details(details: &ErrorDetails) -> String {
    let mut out = details.message.clone();
    if let Some(suggestion) = &details.suggestion {
        out.push_str(&format!(" (suggestion: {})", suggestion));
    }
    out.push_str(&format!(
        " at {}:{}:{}",
        details.source_id, details.span.line, details.span.col
    ));
    out
}

fn format_numbered(errors: &[VerdictError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, error)| format!("  {}. {}", i + 1, error))
        .collect::<Vec<_>>()
        .join("\n")
}
