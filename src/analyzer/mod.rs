//! Fallback version engine: derives the next version from commit history

pub mod version_analyzer;

pub use version_analyzer::VersionAnalyzer;
