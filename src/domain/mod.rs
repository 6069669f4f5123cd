//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{Commit, OTHER_TYPE, RECOGNIZED_TYPES, RELEASE_TYPE};
pub use tag::VersionTag;
pub use version::{parse_version, ReleaseVersion, VersionBump};
