//! Parser for Debian changelog text.
//!
//! Each release is a block: a header line carrying the version, distribution
//! and urgency; indented `  * ` change lines; and a ` -- ` trailer line with
//! the maintainer and an RFC 1123 date. A block is committed to the model
//! only once its trailer parses, so a malformed trailer discards that block
//! without touching releases committed earlier.

use chrono::{DateTime, FixedOffset};

use std::io::BufRead;

use crate::domain::{Change, Changelog, Maintainer, Release, Version};
use crate::error::ChangelogError;

/// Read a Debian changelog stream into a [`Changelog`].
///
/// Lines outside a block that carry no version match are skipped silently.
/// Duplicate versions and malformed trailers are recorded as the last error
/// while the scan continues with the next block; the first-seen release for
/// a duplicated version is retained.
pub fn parse<R: BufRead>(reader: R) -> (Changelog, Option<ChangelogError>) {
    let mut changelog = Changelog::new();
    let mut last_error = None;
    let mut lines = reader.lines();

    while let Some(line) = lines.next() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return (changelog, Some(ChangelogError::Io(e))),
        };
        let Some(found) = Version::find(&line) else {
            continue;
        };
        let version: Version = match found.parse() {
            Ok(version) => version,
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        };

        let mut release = Release::default();
        for token in line.split_whitespace() {
            if let Some(dist) = token.strip_suffix(';') {
                release.distribution = Some(dist.to_string());
            } else if let Some(urgency) = token.strip_prefix("urgency=") {
                release.urgency = Some(urgency.to_string());
            }
        }

        // Consume the block body; the release is committed only on a
        // well-formed trailer.
        for line in lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return (changelog, Some(ChangelogError::Io(e))),
            };

            if let Some(rest) = line.strip_prefix("  * ") {
                let change = match rest.split_once(": ") {
                    Some((kind, body)) => Change::new(kind, body),
                    None => Change::new("", rest),
                };
                release.changes.push(change);
            } else if let Some(rest) = line.strip_prefix(" -- ") {
                match parse_trailer(rest) {
                    Ok((maintainer, date)) => {
                        release.maintainer = maintainer;
                        release.date = Some(date);
                        if let Err(e) = changelog.insert(version, release) {
                            last_error = Some(e);
                        }
                    }
                    Err(reason) => {
                        last_error = Some(ChangelogError::trailer(version.to_string(), reason));
                    }
                }
                break;
            }
        }
    }

    (changelog, last_error)
}

/// Parse `Name <email>  <RFC 1123 date>` from a trailer line (prefix already
/// stripped). The maintainer and date are separated by exactly two spaces.
fn parse_trailer(rest: &str) -> std::result::Result<(Maintainer, DateTime<FixedOffset>), String> {
    let parts: Vec<&str> = rest.split("  ").collect();
    if parts.len() != 2 {
        return Err("can't parse author line".to_string());
    }

    let (name, email) = parts[0]
        .split_once(" <")
        .ok_or_else(|| "no email address".to_string())?;
    let email = email
        .strip_suffix('>')
        .ok_or_else(|| "no email address".to_string())?;

    let date = DateTime::parse_from_rfc2822(parts[1])
        .map_err(|_| "could not parse release date".to_string())?;

    Ok((Maintainer::new(name, email), date))
}
