use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::entry::Entry;
use crate::errors::StoreError;
use crate::form_class::FormClassNormalizer;

/// Read-only access to loaded entries.
///
/// The searcher only ever iterates; it does not care how entries are stored.
/// Implementations must not change while a search borrows them.
pub trait EntryStore {
    /// Every entry, in a stable order.
    fn entries(&self) -> impl Iterator<Item = &Entry> + '_;

    /// Distinct non-empty raw `form_class` values.
    fn form_classes(&self) -> BTreeSet<&str> {
        self.entries()
            .map(|e| e.form_class().as_str())
            .filter(|fc| !fc.trim().is_empty())
            .collect()
    }
}

impl EntryStore for [Entry] {
    fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.iter()
    }
}

impl EntryStore for Vec<Entry> {
    fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.iter()
    }
}

/// Labels a caller can offer as filters.
///
/// Runs every raw value through `normalizer` so the listed labels are exactly
/// what the matcher compares against. Sorted by code point.
pub fn distinct_filter_labels<S>(store: &S, normalizer: &FormClassNormalizer) -> Vec<String>
where
    S: EntryStore + ?Sized,
{
    store
        .form_classes()
        .into_iter()
        .map(|raw| normalizer.normalize(raw))
        .filter(|label| !label.is_empty())
        .map(|label| label.into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Entries held in memory, keyed by id in load order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: IndexMap<i64, Entry>,
}

impl MemoryStore {
    /// # Errors
    /// [StoreError::DuplicateId] if two entries share an id.
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Result<Self, StoreError> {
        let mut map = IndexMap::new();
        for entry in entries {
            let id = entry.id();
            if map.insert(id, entry).is_some() {
                return Err(StoreError::DuplicateId { id });
            }
        }
        Ok(Self { entries: map })
    }

    /// Loads a json array of entries, cleaning each one up the way the
    /// crawler does.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let entries: Vec<Entry> = serde_json::from_reader(reader)?;
        let store = Self::new(entries.into_iter().map(Entry::normalized))?;
        log::info!("loaded {} entries", store.len());
        Ok(store)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        StoreError::check_path(path)?;
        let file = std::fs::File::open(path)?;
        log::debug!("reading entries from {}", path.display());
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn get(&self, id: i64) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.values()
    }
}
