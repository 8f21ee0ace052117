use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use verdict::VerdictError;

/// Format a VerdictError with source-annotated terminal output using Ariadne
pub fn format_error(error: &VerdictError, color: bool) -> String {
    match error {
        VerdictError::Syntax(details) if details.source_text.trim().is_empty() => {
            format!("{}", error)
        }
        VerdictError::Syntax(details) => {
            let mut output = Vec::new();

            let message = format!(
                "Syntax error: {} (at {}:{}:{})",
                details.message, details.source_id, details.span.line, details.span.col
            );

            // Ariadne needs a non-empty range inside the source to draw a label
            let text = details.source_text.as_ref();
            let mut start = details.span.start.min(text.len() - 1);
            while !text.is_char_boundary(start) {
                start -= 1;
            }
            let first_char = text[start..].chars().next().map_or(1, char::len_utf8);
            let end = details.span.end.clamp(start + first_char, text.len());
            let mut report =
                Report::build(ReportKind::Error, &details.source_id, start)
                    .with_config(
                        Config::default()
                            .with_color(color)
                            .with_index_type(IndexType::Byte),
                    )
                    .with_message(message)
                    .with_label(
                        Label::new((&details.source_id, start..end))
                            .with_message("here")
                            .with_color(Color::Red),
                    );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        VerdictError::Engine(msg) => format!("Engine error: {}", msg),
        VerdictError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        VerdictError::MultipleErrors(errors) => {
            let mut result = String::from("Multiple errors occurred:\n\n");
            for error in errors {
                result.push_str(&format_error(error, color));
                result.push_str("\n\n");
            }
            result
        }
    }
}
