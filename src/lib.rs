//! Create, parse and convert changelogs.
//!
//! Input dialects: keep-a-changelog style Markdown ([`markdown::parse`]) and
//! Debian changelogs ([`debian::parse`]). Output: Debian changelog text
//! ([`debian::format`]). The [`domain::Changelog`] model is the sole
//! interchange point between the two stages.

pub mod config;
pub mod debian;
pub mod domain;
pub mod error;
pub mod markdown;
pub mod ui;

pub use domain::{Change, Changelog, Maintainer, Release, Version};
pub use error::{ChangelogError, Result};
