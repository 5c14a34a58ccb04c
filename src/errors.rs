/// Domain-specific error types for the pricing service.
/// Engine operations only ever return `InvalidInput` or `UndefinedRatio`;
/// the remaining variants belong to the binary (config, sockets).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("undefined ratio: {0}")]
    UndefinedRatio(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl EngineError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Errors the caller can fix by correcting its input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::UndefinedRatio(_)
        )
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Reject NaN and infinities before any range check runs.
#[inline]
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> EngineResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(field, format!("must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(EngineError::invalid("strike", "must be positive").is_client_error());
        assert!(EngineError::UndefinedRatio("zero cost".into()).is_client_error());
        assert!(!EngineError::Config("SERVER_PORT".into()).is_client_error());
    }

    #[test]
    fn test_display_names_field() {
        let e = EngineError::invalid("volatility", "must be >= 0, got -0.1");
        assert_eq!(e.to_string(), "invalid input for volatility: must be >= 0, got -0.1");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ensure_finite("strike", f64::NAN).is_err());
        assert!(ensure_finite("strike", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("strike", 1.5), Ok(1.5));
    }
}
