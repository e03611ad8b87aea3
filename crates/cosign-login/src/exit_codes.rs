//! Exit codes for the CLI

/// Success
pub const SUCCESS: i32 = 0;

/// General error (also used for failed module runs)
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// cosign could not be started
pub const LAUNCH_ERROR: i32 = 3;

/// cosign ran and exited nonzero
pub const TOOL_FAILED: i32 = 4;
