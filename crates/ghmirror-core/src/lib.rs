//! Core types shared by every `ghmirror` crate: the issue/comment data model,
//! the repository reference, and the error type used at module boundaries
//! that don't warrant their own error enum.

pub mod enums;
pub mod error;
pub mod issue;
pub mod repo_ref;

pub use enums::IssueState;
pub use error::CoreError;
pub use issue::{Assignee, Comment, Issue, Label};
pub use repo_ref::RepoRef;
