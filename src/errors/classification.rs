use super::types::GorillaError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl GorillaError {
    /// Classify this error to determine its type and whether an oracle call
    /// that produced it may be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            GorillaError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            GorillaError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            GorillaError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            GorillaError::LLMApi(_) => ErrorClassification {
                error_type: "LLMApiError",
                retryable: true,
            },
            GorillaError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },

            // Non-retryable errors
            GorillaError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            GorillaError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            GorillaError::Precondition(_) => ErrorClassification {
                error_type: "PreconditionError",
                retryable: false,
            },
            GorillaError::Template(_) => ErrorClassification {
                error_type: "TemplateError",
                retryable: false,
            },
            GorillaError::TestFailed(_) => ErrorClassification {
                error_type: "TestFailedError",
                retryable: false,
            },
            GorillaError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            GorillaError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            GorillaError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }

    /// Process exit code used by the binary when this error aborts a command.
    pub fn exit_code(&self) -> i32 {
        match self {
            GorillaError::Config(_) | GorillaError::Yaml(_) => 2,
            GorillaError::Precondition(_) | GorillaError::Template(_) => 3,
            _ => 1,
        }
    }
}
