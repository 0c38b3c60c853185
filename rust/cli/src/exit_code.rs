//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Any construction, input or I/O failure.
pub const ERROR: i32 = 2;
