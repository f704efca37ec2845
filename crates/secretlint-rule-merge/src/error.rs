//! Merge error types.

use crate::literal::supported_flags;
use crate::report::Side;

/// Errors raised while parsing a regex literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("unsupported regex flag '{0}' (supported: {})", supported_flags())]
    UnsupportedFlag(char),
}

/// Errors raised by the rule merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("Invalid {document} document: expected a JSON object")]
    NotAnObject { document: Side },

    #[error("Invalid default document: missing `rules` array")]
    MissingRules,

    #[error(
        "Rule '{rule}', pattern '{pattern}': unsupported regex flag '{flag}' (supported: {})",
        supported_flags()
    )]
    UnsupportedFlag {
        rule: String,
        pattern: String,
        flag: char,
    },
}

impl MergeError {
    /// Attach rule/pattern context to a literal error.
    pub(crate) fn from_literal(err: LiteralError, rule: &str, pattern: &str) -> Self {
        match err {
            LiteralError::UnsupportedFlag(flag) => MergeError::UnsupportedFlag {
                rule: rule.to_string(),
                pattern: pattern.to_string(),
                flag,
            },
        }
    }
}
