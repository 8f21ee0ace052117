use crate::evaluator::context::EvaluationContext;
use crate::evaluator::Evaluator;
use crate::{
    parse, parse_ruleset, Expression, NamedRule, ResourceLimits, Response, VerdictError,
    VerdictResult,
};
use tracing::{debug, warn};

/// The Verdict rule engine.
///
/// `parse` and `evaluate` only read the engine, so a shared engine can parse
/// and evaluate from many threads at once. Registering rules needs `&mut`.
pub struct Engine {
    rules: Vec<NamedRule>,
    evaluator: Evaluator,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            evaluator: Evaluator,
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            rules: Vec::new(),
            evaluator: Evaluator,
            limits,
        }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Parse a single rule
    pub fn parse(&self, rule_text: &str) -> VerdictResult<Expression> {
        parse(rule_text, None, &self.limits).inspect_err(|e| {
            debug!(rule = rule_text, error = %e, "rule rejected");
        })
    }

    /// Evaluate a parsed rule against a context
    pub fn evaluate<C: EvaluationContext + ?Sized>(
        &self,
        expression: &Expression,
        context: &C,
    ) -> bool {
        expression.interpret(context)
    }

    /// Parse a rule and register it under `name`, replacing any rule with
    /// the same name.
    pub fn add_rule(&mut self, name: &str, rule_text: &str) -> VerdictResult<()> {
        let expression = self.parse(rule_text)?;
        self.insert(NamedRule::new(name, expression));
        Ok(())
    }

    /// Load every rule from a rule-set source. Nothing is registered unless
    /// the whole source parses.
    pub fn add_rules(&mut self, code: &str, source: &str) -> VerdictResult<()> {
        let rules = parse_ruleset(code, Some(source.to_string()), &self.limits)
            .inspect_err(|e| warn!(source, error = %e, "rule set rejected"))?;

        debug!(source, count = rules.len(), "loaded rules");
        for rule in rules {
            self.insert(rule);
        }
        Ok(())
    }

    fn insert(&mut self, rule: NamedRule) {
        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => {
                debug!(rule = %rule.name, "replacing rule");
                *existing = rule;
            }
            None => self.rules.push(rule),
        }
    }

    pub fn remove_rule(&mut self, name: &str) -> Option<NamedRule> {
        let index = self.rules.iter().position(|r| r.name == name)?;
        Some(self.rules.remove(index))
    }

    /// Rule names in registration order
    pub fn list_rules(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name.clone()).collect()
    }

    pub fn get_rule(&self, name: &str) -> Option<&NamedRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn rules(&self) -> &[NamedRule] {
        &self.rules
    }

    /// Evaluate registered rules against a context
    ///
    /// If `rule_names` is None, evaluates all rules.
    /// If `rule_names` is Some, only evaluates the named rules; an unknown
    /// name is an error.
    pub fn evaluate_rules<C: EvaluationContext + ?Sized>(
        &self,
        context: &C,
        rule_names: Option<Vec<String>>,
    ) -> VerdictResult<Response> {
        self.evaluator
            .evaluate_rules(&self.rules, context, rule_names.as_deref())
    }

    /// Evaluate one registered rule by name
    pub fn evaluate_rule<C: EvaluationContext + ?Sized>(
        &self,
        name: &str,
        context: &C,
    ) -> VerdictResult<bool> {
        self.get_rule(name)
            .map(|rule| rule.expression.interpret(context))
            .ok_or_else(|| VerdictError::Engine(format!("Rule '{}' not found", name)))
    }
}
