//! Release creation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::browser::BrowserType;
use crate::error::ReleaseResult;
use crate::release::ExtensionRelease;
use crate::version::ExtensionVersion;

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

/// Materializes versioned release directories for built extension artifacts.
///
/// All side effects are filesystem writes under the releases root given at
/// construction. Creation is idempotent: re-releasing the same version
/// overwrites the previously copied artifacts.
pub struct ReleaseManager {
    releases_dir: PathBuf,
}

impl ReleaseManager {
    /// Default name of the releases root directory.
    pub const RELEASES_FOLDER: &'static str = "releases";

    /// Create a manager rooted at `releases_dir`.
    pub fn new(releases_dir: impl Into<PathBuf>) -> Self {
        Self {
            releases_dir: releases_dir.into(),
        }
    }

    /// The releases root this manager writes under.
    pub fn releases_dir(&self) -> &Path {
        &self.releases_dir
    }

    /// Create a versioned release from per-browser build artifacts.
    ///
    /// Parses `version`, creates `<root>/v<version>/<browser>/` directories
    /// and copies each artifact in, renaming `*.crx` and `*.xpi` files to
    /// `<stem>_v<version>.<ext>`. Files with any other extension keep their
    /// original name.
    ///
    /// # Errors
    ///
    /// Fails with a validation error on a malformed version string and with
    /// an I/O error on the first directory or copy failure. Directories and
    /// files already written are left in place.
    pub fn create_release(
        &self,
        version: &str,
        build_path: impl Into<PathBuf>,
        files: BTreeMap<BrowserType, PathBuf>,
    ) -> ReleaseResult<ExtensionRelease> {
        let version = ExtensionVersion::parse(version)?;
        let release = ExtensionRelease {
            version,
            release_time: Local::now(),
            files,
            build_path: build_path.into(),
        };

        let release_dir = self.releases_dir.join(release.release_dir_name());
        fs::create_dir_all(&release_dir)?;
        info!("Creating release {} in {}", version, release_dir.display());

        for (browser, source) in &release.files {
            let browser_dir = release_dir.join(browser.dir_name());
            fs::create_dir_all(&browser_dir)?;

            let file_name = source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let target = browser_dir.join(versioned_file_name(&file_name, &version));

            debug!(
                "Copying {} artifact {} -> {}",
                browser,
                source.display(),
                target.display()
            );
            fs::copy(source, &target)?;
        }

        Ok(release)
    }
}

/// Insert `_v<version>` before a trailing `.crx` or `.xpi` extension.
///
/// Any other file name is returned unchanged.
fn versioned_file_name(name: &str, version: &ExtensionVersion) -> String {
    for ext in ["crx", "xpi"] {
        if let Some(stem) = name.strip_suffix(&format!(".{ext}")) {
            return format!("{stem}_v{version}.{ext}");
        }
    }
    name.to_string()
}
