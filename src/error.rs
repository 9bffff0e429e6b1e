use thiserror::Error;

/// Error types for the configuration, facade setup and CLI surfaces.
///
/// The string operations themselves never fail; they define a result for
/// every input. These errors only come from the code around them.
#[derive(Error, Debug)]
pub enum StringKitError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration file: {path}")]
    InvalidConfig { path: String },

    // Facade errors
    #[error("Text facade already initialized in {mode} mode")]
    AlreadyInitialized { mode: String },

    // Pattern errors
    #[error("Wildcard pattern could not be compiled: {pattern} ({reason})")]
    Pattern { pattern: String, reason: String },

    // System errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StringKitError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a pattern compilation error
    pub fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } | Self::InvalidConfig { .. } => "configuration",
            Self::AlreadyInitialized { .. } => "facade",
            Self::Pattern { .. } => "pattern",
            Self::Io(_) => "system",
        }
    }
}

/// Result type alias for stringkit
pub type StringKitResult<T> = std::result::Result<T, StringKitError>;
