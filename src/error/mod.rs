use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the underbar library
#[derive(Error, Debug)]
pub enum UnderbarError {
    #[error("[E{code:04}] Invalid argument: {message}")]
    InvalidArgument {
        code: u16,
        message: String,
        argument: Option<String>,
    },

    #[error("[E{code:04}] Cannot reduce an empty collection without an initial accumulator")]
    EmptyCollection { code: u16 },

    #[error("[E{code:04}] Invocation error: {message}")]
    Invocation {
        code: u16,
        message: String,
        method: String,
        index: usize,
    },

    #[error("[E{code:04}] Scheduler error: {message}")]
    Scheduler {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl UnderbarError {
    /// Create an invalid argument error with default code
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            code: ErrorCode::ARGUMENT_GENERIC,
            message: message.into(),
            argument: None,
        }
    }

    /// Create an invalid argument error with specific code and argument name
    pub fn invalid_argument_with_code(
        code: u16,
        message: impl Into<String>,
        argument: Option<String>,
    ) -> Self {
        Self::InvalidArgument {
            code,
            message: message.into(),
            argument,
        }
    }

    /// Create the error raised by `reduce` on empty input with no accumulator
    pub fn empty_collection() -> Self {
        Self::EmptyCollection {
            code: ErrorCode::EMPTY_COLLECTION,
        }
    }

    /// Create an invocation error for a method that did not resolve on an element
    pub fn method_not_found(method: impl Into<String>, index: usize) -> Self {
        let method = method.into();
        Self::Invocation {
            code: ErrorCode::INVOCATION_METHOD_NOT_FOUND,
            message: format!("element {} has no method '{}'", index, method),
            method,
            index,
        }
    }

    /// Create a scheduler error with default code
    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::Scheduler {
            code: ErrorCode::SCHEDULER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a scheduler error with specific code
    pub fn scheduler_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Scheduler {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Only scheduler and configuration errors carry a source; other
    /// variants are returned unchanged.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Scheduler { source: src, .. } | Self::Config { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::InvalidArgument { .. } | Self::EmptyCollection { .. } | Self::Invocation { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::InvalidArgument { message, .. }
            | Self::Invocation { message, .. }
            | Self::Scheduler { message, .. }
            | Self::Config { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
            Self::EmptyCollection { .. } => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidArgument { code, .. }
            | Self::EmptyCollection { code }
            | Self::Invocation { code, .. }
            | Self::Scheduler { code, .. }
            | Self::Config { code, .. } => *code,
        }
    }

    /// Get the exit code the CLI uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::EmptyCollection { .. } => 3,
            Self::Invocation { .. } => 4,
            Self::Scheduler { .. } => 5,
            Self::Config { .. } => 6,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument {
                message, argument, ..
            } => match argument {
                Some(name) => format!("Invalid argument '{}': {}", name, message),
                None => format!("Invalid argument: {}", message),
            },
            Self::EmptyCollection { .. } => {
                "Cannot reduce an empty collection without a starting value".to_string()
            }
            Self::Invocation { method, index, .. } => {
                format!("Element {} cannot be called with '{}'", index, method)
            }
            Self::Scheduler { message, .. } => format!("Scheduling failed: {}", message),
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
        }
    }
}

/// Type alias for Results using UnderbarError
pub type Result<T> = std::result::Result<T, UnderbarError>;

impl From<serde_json::Error> for UnderbarError {
    fn from(err: serde_json::Error) -> Self {
        UnderbarError::config_with_code(ErrorCode::CONFIG_INVALID_JSON, "Invalid JSON syntax")
            .with_source(err)
    }
}
