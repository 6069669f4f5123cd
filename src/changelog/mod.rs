//! Changelog generation: categorized, Markdown-flavored release notes

pub mod document;
pub mod formatter;

pub use document::{ChangeLogDocument, Section};
pub use formatter::{hash_forms, ChangelogFormatter, PRIMARY_TYPES};
