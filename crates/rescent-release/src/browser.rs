//! Supported browser targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Browsers the extension is packaged for.
///
/// Used as the key of the release file map and as the lower-cased name of
/// each per-browser release subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    Chrome,
    Firefox,
    Edge,
    Opera,
}

impl BrowserType {
    /// All supported browsers.
    pub const ALL: [BrowserType; 4] = [
        BrowserType::Chrome,
        BrowserType::Firefox,
        BrowserType::Edge,
        BrowserType::Opera,
    ];

    /// Lower-case directory name for this browser.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BrowserType::Chrome => "chrome",
            BrowserType::Firefox => "firefox",
            BrowserType::Edge => "edge",
            BrowserType::Opera => "opera",
        }
    }
}

impl fmt::Display for BrowserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
