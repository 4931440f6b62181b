use std::path::{Path, PathBuf};
use thiserror::Error;

/// All possible `jitsu_rs` [Error](std::error::Error) paths
#[derive(Error, Debug)]
pub enum JitsuError {
    #[error("(-)[<jitsu_error::searcher>] -> \n{0}")]
    Searcher(#[from] SearcherError),
    #[error("(-)[<jitsu_error::store>] -> \n{0}")]
    Store(#[from] StoreError),
    #[error("(-)[<jitsu_error::settings>] -> \n{0}")]
    Settings(#[from] SettingsError),
}

/// Raised while building a [`Searcher`](crate::searcher::Searcher) from options.
#[derive(Error)]
pub enum SearcherError {
    #[error(
        "could not create jitsu_rs searcher:\ninvalid collation locale: {locale} .. reason: {reason}
  help: use a BCP-47 tag such as \"ja\" or \"ja-JP\""
    )]
    InvalidLocale { locale: String, reason: String },
    #[error("no collation data for locale: {locale} .. reason: {reason}")]
    CollatorUnavailable { locale: String, reason: String },
    #[error("candidate_cap must be at least 1")]
    ZeroCandidateCap,
    #[error("form_class_width must be at least 1, use null to disable truncation")]
    ZeroFormClassWidth,
}

impl std::fmt::Debug for SearcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("the entry file: `{0}` does not exist")]
    DoesNotExist(PathBuf),
    #[error("duplicate entry id: {id}\n[help]: every entry id must be unique within a store")]
    DuplicateId { id: i64 },
    #[error("filesystemIO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json err: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn check_path(path: impl AsRef<Path>) -> Result<(), Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Self::DoesNotExist(path.to_path_buf()));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to deserialize search options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("filesystemIO error: {0}")]
    Io(#[from] std::io::Error),
}
