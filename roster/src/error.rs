/// Errors raised by the domain core before anything reaches a store.
///
/// Every variant is a client error: the request was malformed and retrying
/// it unchanged will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Invalid value {value:?} for field {field}")]
    InvalidCriterionValue { field: &'static str, value: String },
    #[error("Operator {operator} is not supported on field {field}")]
    UnsupportedOperator { field: String, operator: String },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(i64),
}

impl RosterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    /// Short machine-readable tag for API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCriterionValue { .. } => "invalid_criterion_value",
            Self::UnsupportedOperator { .. } => "unsupported_operator",
            Self::UnknownField(_) => "unknown_field",
            Self::ValidationFailed(_) => "validation_failed",
            Self::InvalidIdentifier(_) => "invalid_identifier",
        }
    }
}
