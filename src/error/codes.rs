/// Error code registry for underbar
///
/// Error codes are organized by category:
/// - 1000-1099: Invalid argument errors
/// - 1100-1199: Empty collection errors
/// - 2000-2999: Invocation (dynamic dispatch) errors
/// - 3000-3999: Scheduler errors
/// - 4000-4999: Configuration errors
pub struct ErrorCode;

impl ErrorCode {
    // Invalid argument errors (1000-1099)
    pub const ARGUMENT_GENERIC: u16 = 1000;
    pub const ARGUMENT_NOT_A_COLLECTION: u16 = 1001;
    pub const ARGUMENT_NOT_A_SEQUENCE: u16 = 1002;
    pub const ARGUMENT_OUT_OF_RANGE: u16 = 1003;

    // Empty collection errors (1100-1199)
    pub const EMPTY_COLLECTION: u16 = 1100;

    // Invocation errors (2000-2999)
    pub const INVOCATION_GENERIC: u16 = 2000;
    pub const INVOCATION_METHOD_NOT_FOUND: u16 = 2001;

    // Scheduler errors (3000-3999)
    pub const SCHEDULER_GENERIC: u16 = 3000;
    pub const SCHEDULER_NO_RUNTIME: u16 = 3001;

    // Configuration errors (4000-4999)
    pub const CONFIG_GENERIC: u16 = 4000;
    pub const CONFIG_INVALID_JSON: u16 = 4001;
    pub const CONFIG_INVALID_VALUE: u16 = 4002;
}

/// Get a human-readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Invalid argument",
        1001 => "Argument is not a sequence or mapping",
        1002 => "Argument is not a sequence",
        1003 => "Argument value out of range",

        1100 => "Cannot reduce an empty collection without an accumulator",

        2000 => "Generic invocation error",
        2001 => "Method not found on element",

        3000 => "Generic scheduler error",
        3001 => "No async runtime available for scheduling",

        4000 => "Generic configuration error",
        4001 => "Invalid JSON configuration",
        4002 => "Invalid configuration value",

        _ => "Unknown error code",
    }
}
