use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing section `{0}`")]
    MissingSection(&'static str),

    #[error("malformed section `{section}`: {reason}")]
    MalformedSection {
        section: &'static str,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn malformed(section: &'static str, reason: impl ToString) -> Self {
        Self::MalformedSection {
            section,
            reason: reason.to_string(),
        }
    }
}
