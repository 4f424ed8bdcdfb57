//! Semantic version recognition and ordering.
//!
//! The grammar follows semver.org: `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILDMETADATA]`,
//! anchored to the whole string when parsing. Build metadata is recognized
//! but never retained.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ChangelogError, Result};

const VERSION_PATTERN: &str = r"(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_PATTERN).expect("version grammar must compile"));

static ANCHORED_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{VERSION_PATTERN}$")).expect("version grammar must compile")
});

/// A recognized semantic version.
///
/// Prerelease is part of identity: `1.0.0` and `1.0.0-rc` are distinct
/// values. Ordering compares major, minor and patch numerically; on a tie,
/// a prerelease version precedes the plain release, and two prerelease
/// labels compare lexically. The lexical tie-break deliberately does not
/// implement full semver prerelease comparison (numeric identifiers are not
/// compared numerically, so `rc10` sorts before `rc2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: String,
}

impl Version {
    /// Create a new version without a prerelease label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    /// Create a new version with a prerelease label
    pub fn with_prerelease(major: u64, minor: u64, patch: u64, prerelease: &str) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: prerelease.to_string(),
        }
    }

    /// Find the first version-grammar match anywhere in a line.
    ///
    /// Returns the matched substring; `Version::from_str` on it cannot fail.
    pub fn find(line: &str) -> Option<&str> {
        VERSION_RE.find(line).map(|m| m.as_str())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(
                || match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                    (true, true) => Ordering::Equal,
                    // A prerelease precedes the plain release of the same triple.
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.prerelease.cmp(&other.prerelease),
                },
            )
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    /// Parse a string that is exactly a semantic version.
    ///
    /// The match is anchored to the entire string: a leading `v` prefix or
    /// any trailing garbage yields `NotSemver`. Build metadata after `+` is
    /// accepted and dropped.
    fn from_str(s: &str) -> Result<Self> {
        let caps = ANCHORED_VERSION_RE
            .captures(s)
            .ok_or_else(|| ChangelogError::not_semver(s))?;

        let number = |name: &str| -> Result<u64> {
            caps.name(name)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| ChangelogError::not_semver(s))
        };

        Ok(Version {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            prerelease: caps
                .name("prerelease")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v: Version = "1.2.3".parse().unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_prerelease() {
        let v: Version = "5.2.14-rc1".parse().unwrap();
        assert_eq!(v, Version::with_prerelease(5, 2, 14, "rc1"));
    }

    #[test]
    fn test_parse_dotted_prerelease() {
        let v: Version = "1.0.0-alpha.1".parse().unwrap();
        assert_eq!(v.prerelease, "alpha.1");
    }

    #[test]
    fn test_build_metadata_dropped() {
        let v: Version = "1.2.3-rc.1+build.5".parse().unwrap();
        assert_eq!(v, Version::with_prerelease(1, 2, 3, "rc.1"));
        assert_eq!(v.to_string(), "1.2.3-rc.1");
    }

    #[test]
    fn test_parse_rejects_v_prefix() {
        let err = "v1.2.3".parse::<Version>().unwrap_err();
        assert!(err.is_not_semver());
    }

    #[test]
    fn test_parse_rejects_partial_match() {
        assert!("1.2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("1.2.3 ".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_parse_rejects_leading_zeros() {
        assert!("01.2.3".parse::<Version>().is_err());
        assert!("1.02.3".parse::<Version>().is_err());
        assert!("0.0.0".parse::<Version>().is_ok());
    }

    #[test]
    fn test_prerelease_is_part_of_identity() {
        let plain: Version = "1.0.0".parse().unwrap();
        let rc: Version = "1.0.0-rc".parse().unwrap();
        assert_ne!(plain, rc);
    }

    #[test]
    fn test_find_in_line() {
        assert_eq!(Version::find("## [2.2.0] - 2019-09-21"), Some("2.2.0"));
        assert_eq!(
            Version::find("awesomeapp (1.3.1-rc) stable; urgency=medium"),
            Some("1.3.1-rc")
        );
        assert_eq!(Version::find("no version here"), None);
    }

    #[test]
    fn test_ordering_sequence() {
        let input = [
            "5.2.14", "5.2.14-rc1", "6.1.12", "5.2.15", "5.3.0-rc", "5.2.14-rc2", "5.3.0",
        ];
        let want = [
            "5.2.14-rc1",
            "5.2.14-rc2",
            "5.2.14",
            "5.2.15",
            "5.3.0-rc",
            "5.3.0",
            "6.1.12",
        ];

        let mut versions: Vec<Version> = input.iter().map(|s| s.parse().unwrap()).collect();
        versions.sort();
        let got: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_prerelease_precedes_release() {
        let release: Version = "1.0.0".parse().unwrap();
        let rc: Version = "1.0.0-rc".parse().unwrap();
        assert!(rc < release);
        assert!(release < "1.0.1-alpha".parse::<Version>().unwrap());
    }

    #[test]
    fn test_prerelease_labels_compare_lexically() {
        let rc2: Version = "1.0.0-rc2".parse().unwrap();
        let rc10: Version = "1.0.0-rc10".parse().unwrap();
        // Lexical, not numeric: "rc10" < "rc2".
        assert!(rc10 < rc2);
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["0.1.0", "10.20.30", "1.0.0-rc.1", "2.0.0-beta-2"] {
            let v: Version = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
        }
    }
}
