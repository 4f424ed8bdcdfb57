//! Core domain types: versions and the changelog model.

pub mod release;
pub mod version;

pub use release::{Change, Changelog, Maintainer, Release};
pub use version::Version;
