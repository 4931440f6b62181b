use std::sync::LazyLock;

use icu::{
    collator::{options::CollatorOptions, Collator, CollatorBorrowed},
    locale::{locale, Locale},
};

use crate::{
    entry::{Entry, MatchField, SearchRequest, SearchResult},
    errors::SearcherError,
    form_class::FormClassNormalizer,
    grouping::{reclassify, Deduplicator},
    matcher::Matcher,
    query::{expand_tokens, FilterSet, VariantSet},
    ranker::Ranker,
    settings::SearchOptions,
    store::{distinct_filter_labels, EntryStore},
};

/// Searcher built from [`SearchOptions::default`], shared by the free functions.
pub(crate) static DEFAULT_SEARCHER: LazyLock<Searcher> = LazyLock::new(Searcher::default_or_root);

/// Finds, groups and ranks entries for a query.
///
/// Holds no per-search state, so one instance can serve any number of
/// searches, from any number of threads, over any store.
pub struct Searcher {
    options: SearchOptions,
    normalizer: FormClassNormalizer,
    /// Compares reading text on ties.
    /// Default: "ja"
    collator: CollatorBorrowed<'static>,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("options", &self.options)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

impl Searcher {
    /// # Errors
    /// - [SearcherError::ZeroCandidateCap] if `candidate_cap` is 0
    /// - [SearcherError::ZeroFormClassWidth] if `form_class_width` is `Some(0)`
    /// - [SearcherError::InvalidLocale] if `collation_locale` is not a locale
    /// - [SearcherError::CollatorUnavailable] if there is no collation data for it
    pub fn new(options: SearchOptions) -> Result<Self, SearcherError> {
        if *options.candidate_cap() == 0 {
            return Err(SearcherError::ZeroCandidateCap);
        }
        if *options.form_class_width() == Some(0) {
            return Err(SearcherError::ZeroFormClassWidth);
        }
        let tag = options.collation_locale();
        let locale: Locale = tag.parse().map_err(|e| SearcherError::InvalidLocale {
            locale: tag.clone(),
            reason: format!("{e:?}"),
        })?;
        let collator = Collator::try_new(locale.into(), CollatorOptions::default()).map_err(
            |e| SearcherError::CollatorUnavailable {
                locale: tag.clone(),
                reason: e.to_string(),
            },
        )?;
        Ok(Self {
            normalizer: options.form_class_normalizer(),
            options,
            collator,
        })
    }

    /// Default options, falling back to the root collation if the "ja"
    /// tailoring cannot be loaded.
    fn default_or_root() -> Self {
        match Self::new(SearchOptions::default()) {
            Ok(searcher) => searcher,
            Err(e) => {
                log::warn!("falling back to root collation: {e}");
                let options = SearchOptions::default();
                let collator = Collator::try_new(locale!("und").into(), CollatorOptions::default())
                    .expect("compiled data always contains the root collation");
                Self {
                    normalizer: options.form_class_normalizer(),
                    options,
                    collator,
                }
            }
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn normalizer(&self) -> &FormClassNormalizer {
        &self.normalizer
    }

    pub fn ranker(&self) -> Ranker<'_> {
        Ranker::new(&self.collator)
    }

    /// Labels to offer as filters, normalized the same way filtering is.
    pub fn distinct_filter_labels<S>(&self, store: &S) -> Vec<String>
    where
        S: EntryStore + ?Sized,
    {
        distinct_filter_labels(store, &self.normalizer)
    }

    /// Runs one lookup.
    ///
    /// Never fails: an empty query with no labels, or a query that matches
    /// nothing, both give an empty [SearchResult].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(query = %request.query, labels = request.filter_labels.len()))
    )]
    pub fn search<S>(&self, request: &SearchRequest, store: &S) -> SearchResult
    where
        S: EntryStore + ?Sized,
    {
        let filter = FilterSet::new(&request.filter_labels, &self.options, &self.normalizer);
        let tokens = expand_tokens(&request.query, *self.options.expand_ideographs());
        if tokens.is_empty() && !filter.is_active() {
            log::debug!("empty query and no labels, nothing to search");
            return SearchResult::default();
        }
        log::debug!(
            "searching {} token(s) with {} label(s): {:?}",
            tokens.len(),
            filter.len(),
            filter.labels().collect::<Vec<_>>()
        );

        let matcher = Matcher::new(&filter, &self.normalizer, *self.options.candidate_cap());
        let ranker = self.ranker();
        let mut dedup = Deduplicator::default();
        let mut result = SearchResult::default();

        if tokens.is_empty() {
            for entry in matcher.filter_only(store) {
                dedup.claim(entry, MatchField::Headword);
            }
            let [mut headword, _, _] = dedup.take_groups();
            ranker.sort(MatchField::Headword, &mut headword, &VariantSet::empty());
            log::debug!("filter-only scan kept {} entries", headword.len());
            result.headword = headword.into_iter().cloned().collect();
            return result;
        }

        for token in &tokens {
            for field in MatchField::ALL {
                let candidates = matcher.candidates(store, field, &token.variants);
                log::trace!(
                    "token {:?}: {} {:?} candidate(s)",
                    token.text,
                    candidates.len(),
                    field
                );
                for entry in candidates {
                    let group = reclassify(entry, field, &token.variants);
                    dedup.claim(entry, group);
                }
            }
            for (field, mut group) in MatchField::ALL.into_iter().zip(dedup.take_groups()) {
                ranker.sort(field, &mut group, &token.variants);
                result
                    .group_mut(field)
                    .extend(group.into_iter().cloned());
            }
        }
        log::debug!(
            "found {} headword, {} on, {} kun",
            result.headword.len(),
            result.on_reading.len(),
            result.kun_reading.len()
        );
        result
    }
}

impl Searcher {
    /// Convenience over [`Searcher::search`] for callers holding plain values.
    pub fn search_text<S, I, L>(&self, query: &str, labels: I, store: &S) -> SearchResult
    where
        S: EntryStore + ?Sized,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.search(&SearchRequest::new(query).with_labels(labels), store)
    }

    /// Looks up one entry's rank keys for a group, for diagnostics.
    pub fn explain<'e>(
        &self,
        group: MatchField,
        entry: &'e Entry,
        query: &str,
    ) -> crate::ranker::RankKey<'e> {
        self.ranker().key(group, entry, &VariantSet::new(query.trim()))
    }
}
