//! # Verdict Engine
//!
//! **Boolean rules for transaction and event filtering**
//!
//! Verdict parses small rule sentences such as `amount > 1000 AND country == UK`
//! into an immutable expression tree and evaluates that tree against any
//! context that can look up fields by name.
//!
//! ## Quick Start
//!
//! ```rust
//! use verdict::{Engine, Value, VerdictResult};
//! use std::collections::HashMap;
//!
//! fn main() -> VerdictResult<()> {
//!     let engine = Engine::new();
//!     let rule = engine.parse("amount > 1000 AND country == UK")?;
//!
//!     let mut payment = HashMap::new();
//!     payment.insert("amount".to_string(), Value::from(1200));
//!     payment.insert("country".to_string(), Value::from("UK"));
//!
//!     assert!(engine.evaluate(&rule, &payment));
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Clauses
//! A clause compares one field with one literal: `field > 10`, `field < 10`
//! or `field == text`. Tokens are separated by exactly one space.
//!
//! ### Connectors
//! `AND` and `OR` join clauses strictly left to right, without precedence:
//! `a > 1 AND b > 1 OR c > 1` means `(a > 1 AND b > 1) OR c > 1`.
//!
//! ### Contexts
//! Anything implementing [`EvaluationContext`]. Unknown fields never fail
//! evaluation: they read as `0` for `>`/`<` and as `""` for `==`.
//!
//! ## Limitations
//! String literals cannot contain spaces, because the tokenizer splits on
//! every space before looking at quotes.

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod facts;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod semantic;

pub use ast::Span;
pub use engine::Engine;
pub use error::VerdictError;
pub use evaluator::context::EvaluationContext;
pub use facts::{parse_facts, Facts};
pub use parser::{parse, parse_ruleset};
pub use resource_limits::ResourceLimits;
pub use response::{OperationKind, OperationRecord, Response, RuleOutcome};
pub use semantic::*;

/// Result type for Verdict operations
pub type VerdictResult<T> = Result<T, VerdictError>;

#[cfg(test)]
mod tests;
