//! Error types for recall operations.
//!
//! The core is deterministic, so every error is permanent: callers should
//! fix the input rather than retry.

use thiserror::Error;

/// Result type alias for recall operations.
pub type RecallResult<T> = Result<T, RecallError>;

/// Main error type for all recall operations.
#[derive(Error, Debug)]
pub enum RecallError {
    /// A model parameter (L, N or f) is outside its valid domain.
    #[error("Invalid parameter `{parameter}`: {message}")]
    InvalidParameter {
        message: String,
        code: ErrorCode,
        parameter: &'static str,
    },

    /// A similarity matrix handed to the recall engine is unusable.
    #[error("Malformed similarity matrix {shape:?}: {message}")]
    MalformedMatrix {
        message: String,
        code: ErrorCode,
        shape: (usize, usize),
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Parameters (PARAM_xxx)
    ParamItems,
    ParamNeurons,
    ParamActivation,

    // Matrix (MAT_xxx)
    MatNotSquare,
    MatTooSmall,
    MatAsymmetric,
    MatNonZeroDiagonal,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ParamItems => "PARAM_001",
            ErrorCode::ParamNeurons => "PARAM_002",
            ErrorCode::ParamActivation => "PARAM_003",
            ErrorCode::MatNotSquare => "MAT_001",
            ErrorCode::MatTooSmall => "MAT_002",
            ErrorCode::MatAsymmetric => "MAT_003",
            ErrorCode::MatNonZeroDiagonal => "MAT_004",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl RecallError {
    /// Create an invalid item count error.
    pub fn invalid_items(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            code: ErrorCode::ParamItems,
            parameter: "items",
        }
    }

    /// Create an invalid neuron count error.
    pub fn invalid_neurons(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            code: ErrorCode::ParamNeurons,
            parameter: "neurons",
        }
    }

    /// Create an invalid activation probability error.
    pub fn invalid_activation(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            code: ErrorCode::ParamActivation,
            parameter: "activation",
        }
    }

    /// Create a malformed matrix error.
    pub fn malformed(code: ErrorCode, shape: (usize, usize), message: impl Into<String>) -> Self {
        Self::MalformedMatrix {
            message: message.into(),
            code,
            shape,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { code, .. } => *code,
            Self::MalformedMatrix { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error was raised by parameter validation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Whether this error was raised by matrix validation.
    pub fn is_malformed_matrix(&self) -> bool {
        matches!(self, Self::MalformedMatrix { .. })
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self.code() {
            ErrorCode::ParamItems => Some("Use at least 2 items so the chain has somewhere to go"),
            ErrorCode::ParamNeurons => Some("Use at least 1 neuron per ensemble"),
            ErrorCode::ParamActivation => Some("Pick an activation probability strictly between 0 and 1"),
            ErrorCode::MatAsymmetric | ErrorCode::MatNonZeroDiagonal => {
                Some("Build the matrix with SimilarityMatrix::from_items")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_error() {
        let err = RecallError::invalid_activation("f = 1.5 is outside (0, 1)");
        assert_eq!(err.code(), ErrorCode::ParamActivation);
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("activation"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_malformed_matrix_error() {
        let err = RecallError::malformed(ErrorCode::MatNotSquare, (3, 4), "expected a square matrix");
        assert_eq!(err.code(), ErrorCode::MatNotSquare);
        assert!(err.is_malformed_matrix());
        assert!(err.to_string().contains("(3, 4)"));
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ParamItems.as_str(), "PARAM_001");
        assert_eq!(ErrorCode::MatAsymmetric.as_str(), "MAT_003");
        assert_eq!(RecallError::Internal("x".into()).code().as_str(), "INT_001");
    }
}
