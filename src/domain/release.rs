//! The changelog model: changes, releases and the version-keyed changelog.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

use crate::domain::Version;
use crate::error::{ChangelogError, Result};

/// One change, usually one line in a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Category label ("Added", "Fixed", ...); may be empty
    pub kind: String,
    /// The actual description
    pub body: String,
}

impl Change {
    pub fn new(kind: impl Into<String>, body: impl Into<String>) -> Self {
        Change {
            kind: kind.into(),
            body: body.into(),
        }
    }
}

/// The maintainer of the package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
}

impl Maintainer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Maintainer {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A single release. A changelog usually comprises several releases.
///
/// `urgency` and `distribution` stay `None` when the input did not carry
/// them; the Debian formatter substitutes "medium" and "stable" at format
/// time without touching the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    /// Release date; `None` is the zero value for inputs without one
    pub date: Option<DateTime<FixedOffset>>,
    pub changes: Vec<Change>,
    pub urgency: Option<String>,
    pub distribution: Option<String>,
    pub maintainer: Maintainer,
}

impl Release {
    pub fn dated(date: Option<DateTime<FixedOffset>>) -> Self {
        Release {
            date,
            ..Release::default()
        }
    }
}

/// A changelog: a mapping from version to release.
///
/// Versions are unique keys; recording a second release for a version
/// already present is a `DuplicateRelease` error and the first-seen release
/// is retained. Iteration preserves insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    releases: IndexMap<Version, Release>,
}

impl Changelog {
    pub fn new() -> Self {
        Changelog::default()
    }

    /// Record a release for a version.
    ///
    /// Fails with `DuplicateRelease` if the version is already present,
    /// leaving the existing release untouched.
    pub fn insert(&mut self, version: Version, release: Release) -> Result<()> {
        if self.releases.contains_key(&version) {
            return Err(ChangelogError::duplicate(version.to_string()));
        }
        self.releases.insert(version, release);
        Ok(())
    }

    pub fn get(&self, version: &Version) -> Option<&Release> {
        self.releases.get(version)
    }

    pub fn get_mut(&mut self, version: &Version) -> Option<&mut Release> {
        self.releases.get_mut(version)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.releases.contains_key(version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Version, &Release)> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Stamp the same maintainer into every release
    pub fn set_maintainer(&mut self, maintainer: &Maintainer) {
        for release in self.releases.values_mut() {
            release.maintainer = maintainer.clone();
        }
    }
}
