//! Operator-facing output and logging setup.
//!
//! - `formatter` - styled progress, warning and error lines
//! - This module - `env_logger` initialisation shared by both binaries

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_export_summary, display_status,
    display_success, display_version_change, format_export_summary,
};

use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is unset: operator output comes from the
/// display functions, so only warnings from the `log` facade get through.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialise `env_logger` for a binary. Safe to call more than once.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .try_init();
}
