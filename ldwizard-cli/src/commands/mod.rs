pub mod execute;
pub mod extract;
pub mod generate;
pub mod init;
pub mod transform;

use colored::Colorize;
use ldwizard_api::ExtractWarning;

/// Print extraction warnings to stderr
pub fn report_warnings(warnings: &[ExtractWarning]) {
    for warning in warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
}
