//! Error types.
//!
//! Every failure in this crate is terminal and is raised before any
//! sampling starts: a bad condition string will not parse on retry, and a
//! run never returns a partial result.

/// Errors produced while preparing or running a scenario.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The condition string does not match the scenario's grammar.
    ///
    /// The message names the offending string and lists every supported form.
    #[error("invalid {scenario} condition: {condition}. Supported: {supported}")]
    Parse {
        /// Scenario whose grammar was used (`dice`, `cards`, `binomial`).
        scenario: &'static str,
        /// The rejected input, verbatim.
        condition: String,
        /// Comma-separated list of accepted forms.
        supported: &'static str,
    },

    /// Exact calculation was requested for a condition without a closed form.
    #[error(
        "exact calculation only supported for aces>=k and hearts>=k conditions. Got: {condition}"
    )]
    UnsupportedExactMode {
        /// The condition for which no closed form exists.
        condition: String,
    },

    /// Confidence level other than 0.90, 0.95 or 0.99.
    #[error("unsupported confidence level: {0} (supported: 0.90, 0.95, 0.99)")]
    UnsupportedConfidence(f64),

    /// A scenario parameter or run option is outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in run options or scenario params.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// A JSON run request could not be decoded.
    #[error("malformed run request: {0}")]
    Request(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_lists_supported_forms() {
        let err = Error::Parse {
            scenario: "dice",
            condition: "sum>10".to_string(),
            supported: "sum>=X, sum==X, max>=X, min>=X",
        };
        assert_eq!(
            err.to_string(),
            "invalid dice condition: sum>10. Supported: sum>=X, sum==X, max>=X, min>=X"
        );
    }

    #[test]
    fn test_unsupported_exact_names_both_conditions() {
        let msg = Error::UnsupportedExactMode {
            condition: "any_suit=clubs".to_string(),
        }
        .to_string();
        assert!(msg.contains("aces>=k"));
        assert!(msg.contains("hearts>=k"));
        assert!(msg.contains("any_suit=clubs"));
    }

    #[test]
    fn test_json_error_converts_to_request() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Request(_)));
    }
}
