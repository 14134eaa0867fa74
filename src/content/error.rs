//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no `+++` front matter block")]
    MissingFrontMatter(PathBuf),

    #[error("front matter of `{0}` is invalid")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("`{0}` has an invalid date: {1}")]
    InvalidDate(PathBuf, String),

    #[error("`{0}` has an empty slug; rename the file or set `slug`")]
    EmptySlug(PathBuf),

    #[error("slug `{0}` is used by more than one post")]
    DuplicateSlug(String),
}
