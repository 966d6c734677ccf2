//! Error types for the skill tree engine and its layout configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Caller errors: a reference into the tree that does not exist.
///
/// These are never produced by ordinary play. A blocked toggle is a
/// [`Transition`](super::Transition), not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillTreeError {
    #[error("unknown branch {branch} (tree has {branch_count})")]
    UnknownBranch { branch: usize, branch_count: usize },

    #[error("unknown skill {index} in branch {branch} (branch has {skill_count})")]
    UnknownSkill {
        branch: usize,
        index: usize,
        skill_count: usize,
    },

    #[error("skills {from} and {to} in branch {branch} are not in adjacent rows")]
    NotConnected {
        branch: usize,
        from: usize,
        to: usize,
    },
}

/// Problems loading or validating a [`TreeLayout`](super::TreeLayout).
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layout has no branches")]
    NoBranches,

    #[error("branch '{branch}' has no skills")]
    EmptyBranch { branch: String },

    #[error("branch '{branch}' row {row} is empty")]
    EmptyRow { branch: String, row: usize },

    #[error("branch '{branch}' row {row} references skill {index}, but the branch has {skill_count}")]
    RowIndexOutOfRange {
        branch: String,
        row: usize,
        index: usize,
        skill_count: usize,
    },

    #[error("branch '{branch}' places skill {index} in more than one row")]
    DuplicateSkill { branch: String, index: usize },

    #[error("branch '{branch}' skill {index} is not in any row")]
    UnplacedSkill { branch: String, index: usize },
}
