pub mod entry;
pub mod errors;
pub mod form_class;
pub mod grouping;
pub mod language;
pub mod matcher;
pub mod query;
pub mod ranker;
pub mod searcher;
pub mod settings;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use entry::{Entry, EntryKind, MatchField, SearchRequest, SearchResult};
pub use errors::{JitsuError, SearcherError, SettingsError, StoreError};
pub use searcher::Searcher;
pub use segment_reader::MatchIndex;
pub use settings::SearchOptions;
pub use store::{EntryStore, MemoryStore};

use searcher::DEFAULT_SEARCHER;
use std::path::Path;

/// A 字通 lookup instance: a loaded store and the searcher over it.
///
/// # Examples
/// ```
/// use jitsu_rs::{Entry, Jitsu, MemoryStore};
///
/// let store = MemoryStore::new([
///     Entry::character(1, "漢").with_on_reading("カン"),
///     Entry::character(2, "案").with_on_reading("アン・カン"),
/// ])
/// .unwrap();
/// let jitsu = Jitsu::new(store).unwrap();
/// let res = jitsu.search("かん", Vec::<String>::new());
/// assert_eq!(res.on_reading.len(), 2);
/// ```
#[derive(Debug)]
pub struct Jitsu<S: EntryStore> {
    store: S,
    searcher: Searcher,
}

impl<S: EntryStore> Jitsu<S> {
    /// Uses [`SearchOptions::default`].
    pub fn new(store: S) -> Result<Self, JitsuError> {
        Self::with_options(store, SearchOptions::default())
    }

    pub fn with_options(store: S, options: SearchOptions) -> Result<Self, JitsuError> {
        let searcher = Searcher::new(options)?;
        Ok(Self { store, searcher })
    }

    pub fn search<I, L>(&self, query: &str, labels: I) -> SearchResult
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.searcher.search_text(query, labels, &self.store)
    }

    pub fn search_request(&self, request: &SearchRequest) -> SearchResult {
        self.searcher.search(request, &self.store)
    }

    /// Filter options to show the user.
    pub fn filter_labels(&self) -> Vec<String> {
        self.searcher.distinct_filter_labels(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

impl Jitsu<MemoryStore> {
    /// Loads a json array of entries from `path`.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, JitsuError> {
        let store = MemoryStore::from_json_path(path)?;
        Self::new(store)
    }
}

/// Searches `store` with the default options.
pub fn search<S>(request: &SearchRequest, store: &S) -> SearchResult
where
    S: EntryStore + ?Sized,
{
    DEFAULT_SEARCHER.search(request, store)
}

/// Filter labels present in `store`, normalized with the default options.
pub fn distinct_filter_labels<S>(store: &S) -> Vec<String>
where
    S: EntryStore + ?Sized,
{
    DEFAULT_SEARCHER.distinct_filter_labels(store)
}
