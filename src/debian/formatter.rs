//! Formatter producing canonical Debian changelog text.

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{Changelog, Release, Version};
use crate::error::{ChangelogError, Result};

const RFC1123Z: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Serialize a changelog as Debian changelog text.
///
/// Releases are emitted newest-first: sorted by date, ties broken by
/// version order, then reversed. Within a release, changes are sorted by
/// kind (stable, so equal kinds keep their relative order); the sort happens
/// on a copy and never mutates the caller's model. Missing urgency and
/// distribution render as "medium" and "stable"; a missing date renders as
/// the Unix epoch. The output carries exactly one newline after the last
/// trailer.
///
/// A rendered prerelease version keeps its literal hyphen
/// (`1.3.1-rc`) even though Debian's own version syntax disallows it in the
/// upstream portion.
pub fn format(changelog: &Changelog, package: &str) -> Result<Vec<u8>> {
    if package.is_empty() {
        return Err(ChangelogError::EmptyPackage);
    }

    let mut releases: Vec<(&Version, &Release)> = changelog.iter().collect();
    releases.sort_by(|a, b| a.1.date.cmp(&b.1.date).then_with(|| a.0.cmp(b.0)));

    let mut out = String::new();

    for (version, release) in releases.iter().rev() {
        let urgency = release.urgency.as_deref().unwrap_or("medium");
        let distribution = release.distribution.as_deref().unwrap_or("stable");

        out.push_str(&format!(
            "{} ({}) {}; urgency={}\n\n",
            package,
            version,
            distribution,
            urgency
        ));

        let mut changes = release.changes.clone();
        changes.sort_by(|a, b| a.kind.cmp(&b.kind));
        for change in &changes {
            out.push_str(&format!("  * {}: {}\n", change.kind, change.body));
        }

        out.push_str(&format!(
            "\n -- {} <{}>  {}\n\n",
            release.maintainer.name,
            release.maintainer.email,
            trailer_date(release.date).format(RFC1123Z)
        ));
    }

    // Drop the blank separator line after the last trailer.
    if out.ends_with('\n') {
        out.pop();
    }

    Ok(out.into_bytes())
}

fn trailer_date(date: Option<DateTime<FixedOffset>>) -> DateTime<FixedOffset> {
    date.unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
}
