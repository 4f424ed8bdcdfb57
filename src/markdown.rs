//! Parser for keep-a-changelog style Markdown.
//!
//! The scan is line-oriented with two pieces of state: the version of the
//! release currently being built and the last-seen change-group label. Lines
//! that match none of the recognized shapes are ignored. Per-line problems
//! do not abort the scan; the last error encountered is handed back next to
//! the accumulated model.

use std::io::BufRead;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use regex::Regex;

use crate::domain::{Change, Changelog, Release, Version};
use crate::error::ChangelogError;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \d{4}-\d{2}-\d{2}$").expect("date pattern must compile"));

/// Extract a trailing ` YYYY-MM-DD` token as a midnight-UTC date.
fn trailing_date(line: &str) -> Option<DateTime<FixedOffset>> {
    let m = DATE_RE.find(line)?;
    let date = NaiveDate::parse_from_str(m.as_str().trim_start(), "%Y-%m-%d").ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Read a keep-a-changelog Markdown stream into a [`Changelog`].
///
/// Recognized line shapes:
/// - `## ` opens a release: the first version-grammar match in the line is
///   the key, a trailing ` YYYY-MM-DD` token is the date (absent date is not
///   an error). An invalid or missing version records a `NotSemver` error
///   and skips the heading; a duplicate version records a
///   `DuplicateRelease` error, keeps the first-seen release and drops
///   bullets until the next valid heading.
/// - `### ` sets the change-group label for subsequent bullets.
/// - `- ` appends a change to the open release.
///
/// Returns the accumulated model together with the last error encountered.
pub fn parse<R: BufRead>(reader: R) -> (Changelog, Option<ChangelogError>) {
    let mut changelog = Changelog::new();
    let mut last_error = None;

    let mut cur_ver: Option<Version> = None;
    let mut cur_grp = String::new();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                last_error = Some(ChangelogError::Io(e));
                break;
            }
        };

        if let Some(heading) = line.strip_prefix("## ") {
            match Version::find(&line).map(str::parse::<Version>) {
                Some(Ok(version)) => {
                    let release = Release::dated(trailing_date(&line));
                    match changelog.insert(version.clone(), release) {
                        Ok(()) => cur_ver = Some(version),
                        Err(e) => {
                            last_error = Some(e);
                            cur_ver = None;
                        }
                    }
                }
                Some(Err(e)) => last_error = Some(e),
                None => last_error = Some(ChangelogError::not_semver(heading.trim())),
            }
        } else if let Some(group) = line.strip_prefix("### ") {
            cur_grp = group.to_string();
        } else if let Some(body) = line.strip_prefix("- ") {
            if let Some(release) = cur_ver.as_ref().and_then(|v| changelog.get_mut(v)) {
                release.changes.push(Change::new(cur_grp.clone(), body));
            }
        }
    }

    (changelog, last_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ver(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn md_date(s: &str) -> Option<DateTime<FixedOffset>> {
        trailing_date(&format!("x {}", s))
    }

    #[test]
    fn test_single_release() {
        let input = "## [2.2.0] - 2019-09-21\n### Added\n- a way to set custom battery threshold\n";
        let (cl, err) = parse(input.as_bytes());
        assert!(err.is_none());
        assert_eq!(cl.len(), 1);

        let rel = cl.get(&ver("2.2.0")).unwrap();
        assert_eq!(rel.date, md_date("2019-09-21"));
        assert_eq!(
            rel.changes,
            [Change::new("Added", "a way to set custom battery threshold")]
        );
    }

    #[test]
    fn test_heading_without_date() {
        let (cl, err) = parse("## [1.0.0]\n".as_bytes());
        assert!(err.is_none());
        assert_eq!(cl.get(&ver("1.0.0")).unwrap().date, None);
    }

    #[test]
    fn test_group_label_carries_over_releases() {
        let input = "\
## [1.1.0] - 2019-02-02
### Fixed
- one thing
- another thing
## [1.0.0] - 2019-01-01
- carried over
";
        let (cl, err) = parse(input.as_bytes());
        assert!(err.is_none());

        let newer = cl.get(&ver("1.1.0")).unwrap();
        assert_eq!(newer.changes.len(), 2);
        assert!(newer.changes.iter().all(|c| c.kind == "Fixed"));

        // The label is state, not per-release data.
        let older = cl.get(&ver("1.0.0")).unwrap();
        assert_eq!(older.changes, [Change::new("Fixed", "carried over")]);
    }

    #[test]
    fn test_bullets_before_any_release_are_ignored() {
        let (cl, err) = parse("- stray bullet\n## [1.0.0] - 2019-01-01\n".as_bytes());
        assert!(err.is_none());
        assert!(cl.get(&ver("1.0.0")).unwrap().changes.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let input = "# Changelog\n\nsome prose\n## [1.0.0] - 2019-01-01\n### Added\n- thing\n";
        let (cl, err) = parse(input.as_bytes());
        assert!(err.is_none());
        assert_eq!(cl.len(), 1);
    }

    #[test]
    fn test_invalid_version_reported_but_scan_continues() {
        let input = "## [Unreleased]\n## [1.0.0] - 2019-01-01\n### Added\n- thing\n";
        let (cl, err) = parse(input.as_bytes());
        assert!(err.unwrap().is_not_semver());
        assert_eq!(cl.len(), 1);
        assert_eq!(cl.get(&ver("1.0.0")).unwrap().changes.len(), 1);
    }

    #[test]
    fn test_duplicate_heading_flagged_first_retained() {
        let input = "\
## [1.0.0] - 2019-01-01
- first
## [1.0.0] - 2019-06-06
- second
";
        let (cl, err) = parse(input.as_bytes());
        assert_eq!(err.unwrap().to_string(), "multiple releases for 1.0.0");

        let rel = cl.get(&ver("1.0.0")).unwrap();
        assert_eq!(rel.date, md_date("2019-01-01"));
        assert_eq!(rel.changes, [Change::new("", "first")]);
    }

    #[test]
    fn test_version_found_anywhere_in_heading() {
        let (cl, err) = parse("## version 3.1.4, released 2020-03-14\n".as_bytes());
        assert!(err.is_none());
        let rel = cl.get(&ver("3.1.4")).unwrap();
        assert_eq!(rel.date, md_date("2020-03-14"));
    }

    #[test]
    fn test_build_metadata_stripped_from_heading() {
        let (cl, err) = parse("## [1.2.3+build.7] - 2020-01-01\n".as_bytes());
        assert!(err.is_none());
        assert!(cl.contains(&ver("1.2.3")));
    }
}
