//! Bibstat Core - Shared infrastructure for the bibstat tools
//!
//! Logging setup, progress reporting and small formatting helpers used by
//! both the archive library and the CLI.

pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num, pct};
