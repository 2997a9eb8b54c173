//! Release record.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::browser::BrowserType;
use crate::version::ExtensionVersion;

/// Immutable record of one release invocation.
///
/// `files` carries the *source* artifact paths supplied by the caller, not
/// the destinations they were copied to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionRelease {
    /// Parsed semantic version of the release.
    pub version: ExtensionVersion,
    /// When the release was created.
    pub release_time: DateTime<Local>,
    /// Browser to built-artifact source path.
    pub files: BTreeMap<BrowserType, PathBuf>,
    /// The build output path the artifacts came from.
    pub build_path: PathBuf,
}

impl ExtensionRelease {
    /// Name of the versioned release directory, e.g. `v1.2.3`.
    pub fn release_dir_name(&self) -> String {
        format!("v{}", self.version)
    }
}
