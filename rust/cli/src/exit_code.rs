//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration, or a fatal game error.
pub const FAILURE: i32 = 1;
