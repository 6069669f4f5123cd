//! User interface module: styled messages on stderr.
//!
//! The binary never prompts; everything the user needs to act on is either
//! printed here or carried in the exit status.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success,
    display_version_summary, format_repositories,
};
