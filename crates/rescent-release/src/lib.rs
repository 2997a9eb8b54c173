//! # ReScent Release
//!
//! Build-side release manager for the ReScent browser extension.
//!
//! Given a semantic version and a set of per-browser build artifacts, it
//! materializes a deterministic, versioned directory tree:
//!
//! ```text
//! <releases>/v<major>.<minor>.<patch>/<browser>/<name>_v<major>.<minor>.<patch>.<crx|xpi>
//! ```

pub mod browser;
pub mod error;
pub mod manager;
pub mod release;
pub mod version;

pub use browser::BrowserType;
pub use error::{ReleaseError, ReleaseResult};
pub use manager::ReleaseManager;
pub use release::ExtensionRelease;
pub use version::ExtensionVersion;
