//! Debian changelog dialect: parsing and formatting.

pub mod formatter;
pub mod parser;

pub use formatter::format;
pub use parser::parse;
