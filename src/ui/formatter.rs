//! Pure formatting functions for operator output.
//!
//! Progress goes to stdout; errors and warnings go to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::content::ContentStats;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning, followed by its hint when it has one.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
    if let Some(hint) = warning.hint() {
        eprintln!("  {}", style(hint).dim());
    }
}

/// Display the version change written to the manifest.
pub fn display_version_change(old: &str, new: &str) {
    println!("\n{}", style("Version update:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

/// Render the post-export summary block.
pub fn format_export_summary(stats: &ContentStats) -> String {
    format!(
        "Export Summary:\n   - Directories: {}\n   - Files: {}",
        stats.directories, stats.files
    )
}

/// Display the post-export summary block.
pub fn display_export_summary(stats: &ContentStats) {
    println!("{}", format_export_summary(stats));
}
