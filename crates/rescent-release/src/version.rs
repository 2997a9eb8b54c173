//! Semantic version handling for extension releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReleaseError;

/// Semantic version of the extension, parsed from a `"major.minor.patch"`
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExtensionVersion {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Patch version number.
    pub patch: u32,
}

impl ExtensionVersion {
    /// Create a version from its components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a string like `"1.2.3"`.
    ///
    /// Leading and trailing whitespace is ignored. The string must contain
    /// exactly three dot-separated numeric parts.
    pub fn parse(version: &str) -> Result<Self, ReleaseError> {
        let trimmed = version.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::InvalidVersion(trimmed.to_string()));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ReleaseError::InvalidVersion(trimmed.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl FromStr for ExtensionVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ExtensionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_version() {
        let version = ExtensionVersion::parse("1.2.3").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
    }

    #[test]
    fn test_to_string_round_trips() {
        let version = ExtensionVersion::parse("10.0.7").unwrap();
        assert_eq!(version.to_string(), "10.0.7");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let version = " 2.1.0 ".parse::<ExtensionVersion>().unwrap();
        assert_eq!(version, ExtensionVersion::new(2, 1, 0));
    }

    #[test]
    fn test_parse_too_few_parts() {
        assert!(matches!(
            ExtensionVersion::parse("1.2"),
            Err(ReleaseError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_parse_too_many_parts() {
        assert!(matches!(
            ExtensionVersion::parse("1.2.3.4"),
            Err(ReleaseError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            ExtensionVersion::parse("a.b.c"),
            Err(ReleaseError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_parse_negative_part() {
        assert!(ExtensionVersion::parse("1.-2.3").is_err());
    }
}
