//! Error types for selection classification.
//!
//! None of these escape the public inspection API. They exist so the
//! internal stages can use `?` and so that the reason a stage gave up can be
//! logged before it collapses to [`Classification::None`].
//!
//! [`Classification::None`]: crate::classify::Classification::None

/// Result type alias for classification stages.
pub type Result<T> = std::result::Result<T, ClassifyError>;

/// Errors raised inside a classification stage.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Strict JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The lenient repair collaborator gave up.
    #[error("Repair failed: {0}")]
    Repair(#[from] RepairError),

    /// The fragment parser could not produce a root element.
    #[error("Fragment parsing failed: {0}")]
    Fragment(#[from] FragmentError),

    /// The text does not look like the format the stage handles.
    #[error("Not applicable: {0}")]
    NotApplicable(&'static str),
}

/// Errors reported by a [`JsonRepairer`](crate::repair::JsonRepairer).
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// No combination of fixes produced parseable JSON.
    #[error("Could not repair input after {attempts} attempts")]
    Unrepairable {
        /// Number of fixed candidates that were tried.
        attempts: usize,
    },

    /// The input was empty after normalization.
    #[error("Nothing to repair")]
    EmptyInput,

    /// Custom error message, mostly for third-party repairers.
    #[error("{0}")]
    Custom(String),
}

/// Errors reported by a [`FragmentParser`](crate::dom::FragmentParser).
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The root selector could not be built.
    #[error("Invalid root selector '{selector}': {message}")]
    Selector {
        /// Selector text that failed.
        selector: String,
        /// Description from the selector parser.
        message: String,
    },

    /// The synthetic root element was not present in the parsed document.
    #[error("Root element '#{root_id}' not found")]
    RootNotFound {
        /// Id of the wrapper element.
        root_id: String,
    },

    /// Custom error message, mostly for third-party parsers.
    #[error("{0}")]
    Custom(String),
}

impl FragmentError {
    /// Creates a root-not-found error.
    #[inline]
    pub fn root_not_found(root_id: impl Into<String>) -> Self {
        Self::RootNotFound {
            root_id: root_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_error_display() {
        let err = RepairError::Unrepairable { attempts: 4 };
        assert_eq!(err.to_string(), "Could not repair input after 4 attempts");
    }

    #[test]
    fn test_fragment_error_display() {
        let err = FragmentError::root_not_found("_virtualDom");
        assert_eq!(err.to_string(), "Root element '#_virtualDom' not found");
    }

    #[test]
    fn test_classify_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ClassifyError = json_err.into();
        assert!(matches!(err, ClassifyError::Json(_)));
    }

    #[test]
    fn test_classify_error_from_repair() {
        let err: ClassifyError = RepairError::EmptyInput.into();
        assert!(err.to_string().contains("Nothing to repair"));
    }
}
