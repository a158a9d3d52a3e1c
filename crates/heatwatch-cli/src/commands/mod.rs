pub mod check;
pub mod config;

/// Exit code when heating is needed, or a command succeeded.
pub const EXIT_OK: i32 = 0;
/// Exit code when `check` finds no heating need.
pub const EXIT_NO_HEAT: i32 = 2;
