//! CLI command implementations

pub mod classify;
pub mod init;
pub mod scan;
pub mod validate;

use crate::config::{load_or_default, GuardianConfig};
use std::path::Path;

/// Load the configuration for a command, printing the failure if any
///
/// Returns `None` after reporting when the configuration cannot be used.
pub(crate) fn load_command_config(config_path: Option<&str>) -> Option<GuardianConfig> {
    match load_or_default(config_path.map(Path::new)) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            None
        }
    }
}
