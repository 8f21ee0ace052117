/// Resource limits to keep parsing and evaluation bounded
///
/// Evaluation recurses once per connector, so the clause limit is also the
/// depth limit of every tree the parser can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum length of a single rule in bytes
    /// Real usage: ~100 bytes, Limit: 64KB
    pub max_rule_bytes: usize,

    /// Maximum number of clauses in a single rule
    /// Real usage: ~2-10 clauses, Limit: 1000
    pub max_clauses: usize,

    /// Maximum size of a rule-set source in bytes
    /// Real usage: ~5KB, Limit: 5MB
    pub max_source_bytes: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_rule_bytes: 64 * 1024, // 64 KB
            max_clauses: 1000,
            max_source_bytes: 5 * 1024 * 1024, // 5 MB
        }
    }
}
