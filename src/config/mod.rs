//! Decorator configuration
//!
//! Options for the time-based decorators, deserialisable from JSON with
//! human-readable durations (`"250ms"`, `"2s"`).

use crate::error::{ErrorCode, Result, UnderbarError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_true() -> bool {
    true
}

/// Throttle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleOptions {
    /// Minimum interval between underlying calls
    #[serde(with = "humantime_serde")]
    pub wait: Duration,

    /// Fire the first call of a window immediately
    #[serde(default = "default_true")]
    pub leading: bool,

    /// Fire the last coalesced call at the end of the window
    #[serde(default = "default_true")]
    pub trailing: bool,
}

impl ThrottleOptions {
    /// Options firing on both edges
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            leading: true,
            trailing: true,
        }
    }

    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Reject options under which the wrapped function could never run
    pub fn validate(&self) -> Result<()> {
        if !self.leading && !self.trailing {
            return Err(UnderbarError::invalid_argument_with_code(
                ErrorCode::ARGUMENT_OUT_OF_RANGE,
                "throttle needs at least one of the leading or trailing edges enabled",
                Some("options".to_string()),
            ));
        }
        Ok(())
    }

    /// Parse and validate options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate().map_err(|e| {
            UnderbarError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, e.user_message())
        })?;
        Ok(options)
    }
}
