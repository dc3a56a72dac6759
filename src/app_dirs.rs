//! Resolve the configuration directory for `veduta`.
//!
//! Respects an environment override while falling back to the
//! platform-appropriate location provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "veduta";
const APPLICATION: &str = "veduta";

const CONFIG_DIR_ENV: &str = "VEDUTA_CONFIG_DIR";

/// Return the configuration directory used to locate settings files.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(value) = env::var_os(CONFIG_DIR_ENV)
        && !value.is_empty()
    {
        return Ok(PathBuf::from(value));
    }

    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .ok_or_else(|| anyhow!("unable to determine project directories for veduta"))
}
