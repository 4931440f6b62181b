use better_default::Default;
use getset::{Getters, Setters};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::errors::SettingsError;
use crate::form_class::{FormClassNormalizer, DEFAULT_FORM_CLASS_WIDTH};

/// Labels that also select other labels.
/// 国字 entries were partly recorded as 略体 upstream.
pub fn default_filter_aliases() -> IndexMap<String, Vec<String>> {
    IndexMap::from([("国字".to_string(), vec!["略体".to_string()])])
}

/// Search settings.
///
/// Every field has a default, so a partial json document is enough:
/// ```
/// use jitsu_rs::settings::SearchOptions;
///
/// let opts = SearchOptions::from_json_str(r#"{ "candidate_cap": 50 }"#).unwrap();
/// assert_eq!(*opts.candidate_cap(), 50);
/// assert_eq!(opts.collation_locale(), "ja");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default, Getters, Setters)]
#[serde(default)]
#[getset(get = "pub", set = "pub")]
pub struct SearchOptions {
    /// Maximum candidates kept per field per token, in store order.
    #[default(200)]
    candidate_cap: usize,
    /// Characters of `form_class` kept for listing and filtering.
    /// `None` compares the whole value.
    #[default(Some(DEFAULT_FORM_CLASS_WIDTH))]
    form_class_width: Option<usize>,
    #[default(default_filter_aliases())]
    filter_aliases: IndexMap<String, Vec<String>>,
    /// BCP-47 tag of the collation used to break ties on reading text.
    #[default("ja".to_string())]
    collation_locale: String,
    /// Split queries holding two or more ideographs into per-character tokens.
    #[default(true)]
    expand_ideographs: bool,
}

impl SearchOptions {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SettingsError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn form_class_normalizer(&self) -> FormClassNormalizer {
        FormClassNormalizer::new(self.form_class_width)
    }

    /// Aliases implied by `label`, not including `label` itself.
    pub fn aliases_of(&self, label: &str) -> &[String] {
        self.filter_aliases
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
