use super::tokens::Token;
use super::RuleSource;
use crate::{ComparisonOperator, Value, VerdictResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse the operand token of a clause according to its operator.
///
/// `>` and `<` take a decimal number. `==` always takes text, with any
/// surrounding double quotes removed, even when the text looks numeric.
pub(crate) fn parse_operand(
    token: &Token,
    operator: ComparisonOperator,
    source: &RuleSource,
) -> VerdictResult<Value> {
    match operator {
        ComparisonOperator::GreaterThan | ComparisonOperator::LessThan => {
            parse_number(token, operator, source).map(Value::Number)
        }
        ComparisonOperator::Equal => Ok(Value::Text(strip_quotes(&token.text).to_string())),
    }
}

fn parse_number(
    token: &Token,
    operator: ComparisonOperator,
    source: &RuleSource,
) -> VerdictResult<Decimal> {
    Decimal::from_str(&token.text).map_err(|_| {
        source.error_with_suggestion(
            format!(
                "Invalid number '{}' for {} comparison",
                token.text,
                operator.name()
            ),
            token.span,
            "'>' and '<' compare against numbers; use '==' to compare text",
        )
    })
}

pub(crate) fn strip_quotes(text: &str) -> &str {
    text.trim_matches('"')
}
