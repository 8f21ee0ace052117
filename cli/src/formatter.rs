use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use verdict::{NamedRule, OperationKind, OperationRecord, Response, RuleOutcome};

enum LineType {
    Clause,
    Skipped,
    Verdict,
}

impl LineType {
    fn format_line(&self, base_prefix: &str, content: &str) -> String {
        let symbol = match self {
            LineType::Clause => "├─",
            LineType::Skipped => "×",
            LineType::Verdict => "└─ =",
        };
        format!("{}{} {}\n", base_prefix, symbol, content)
    }
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_response(&self, response: &Response, raw: bool) -> String {
        if raw {
            return response
                .results
                .iter()
                .map(|result| format!("{}={}\n", result.rule.name, result.matched))
                .collect();
        }

        let mut output = String::new();
        for result in &response.results {
            output.push_str(&self.format_rule_result(result));
            output.push('\n');
        }
        output
    }

    fn format_rule_result(&self, result: &RuleOutcome) -> String {
        let title = format!("{} = {}", result.rule.name, result.matched);

        let mut content = format!("{}\n", result.rule.expression);
        self.format_operations(&result.operations, &mut content);
        content.push_str(&LineType::Verdict.format_line("", &result.matched.to_string()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new(&title)]));
        table.add_row(Row::from(vec![Cell::new(content.trim_end())]));

        table.to_string()
    }

    /// Render a trace as an indented tree, one line per record
    pub fn format_trace(&self, operations: &[OperationRecord], matched: bool) -> String {
        let mut output = String::new();
        self.format_operations(operations, &mut output);
        output.push_str(&LineType::Verdict.format_line("", &matched.to_string()));
        output
    }

    fn format_operations(&self, operations: &[OperationRecord], output: &mut String) {
        for op in operations {
            let indent = "│  ".repeat(op.depth);
            match &op.kind {
                OperationKind::Clause {
                    field,
                    operator,
                    operand,
                    resolved,
                    result,
                } => {
                    let line = format!(
                        "{} {} {} ({} is {}) → {}",
                        field, operator, operand, field, resolved, result
                    );
                    output.push_str(&LineType::Clause.format_line(&indent, &line));
                }
                OperationKind::ShortCircuit { connector, left } => {
                    let line = format!("{} right side skipped (left is {})", connector, left);
                    output.push_str(&LineType::Skipped.format_line(&indent, &line));
                }
            }
        }
    }

    pub fn format_rule_list(&self, rules: &[NamedRule], file_count: usize) -> String {
        let mut output = format!(
            "Workspace contains {} files, {} rules\n\n",
            file_count,
            rules.len()
        );

        if rules.is_empty() {
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Rule").set_alignment(CellAlignment::Left),
            Cell::new("Source").set_alignment(CellAlignment::Left),
            Cell::new("Expression").set_alignment(CellAlignment::Left),
        ]));

        for rule in rules {
            let source = match (&rule.source, &rule.span) {
                (Some(source), Some(span)) => format!("{}:{}", source, span.line),
                (Some(source), None) => source.clone(),
                _ => "-".to_string(),
            };
            table.add_row(Row::from(vec![
                rule.name.clone(),
                source,
                rule.expression.to_string(),
            ]));
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }
}
