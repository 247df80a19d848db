//! Request-scoped operator context.
//!
//! Every mutation is attributed to the operator who performed it. The context
//! is built once per request by the presentation layer and passed explicitly
//! to service methods; nothing is held in process-wide state.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Identity of the operator performing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorContext {
    operator: String,
}

impl OperatorContext {
    /// Build a context for the named operator.
    ///
    /// Any non-empty name is accepted; there is no credential check.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the name is empty or whitespace.
    pub fn new(operator: impl Into<String>) -> Result<Self, CoreError> {
        let operator = operator.into().trim().to_string();
        if operator.is_empty() {
            return Err(CoreError::Validation("operator name is required".into()));
        }
        Ok(Self { operator })
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_operator_name() {
        let ctx = OperatorContext::new("  enumerator1 ").unwrap();
        assert_eq!(ctx.operator(), "enumerator1");
    }

    #[test]
    fn rejects_blank_operator() {
        assert!(matches!(
            OperatorContext::new("   "),
            Err(CoreError::Validation(_))
        ));
        assert!(OperatorContext::new("").is_err());
    }
}
