//! Filter selection threaded through every aggregation call.
//!
//! The presentation layer owns the current [`FilterState`] and passes it in;
//! the engine never stores it.

use serde::Serialize;

use crate::dataset::{Dataset, Parade, UNAFFILIATED};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "key")]
pub enum ParadeFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "keys")]
pub enum ColorFilter {
    #[default]
    All,
    Only(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub parade: ParadeFilter,
    pub colors: ColorFilter,
}

impl FilterState {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parade(key: impl Into<String>) -> Self {
        Self {
            parade: ParadeFilter::Only(key.into()),
            colors: ColorFilter::All,
        }
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = ColorFilter::Only(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Parade keys whose buckets are summed: the unaffiliated key plus every
    /// parade, or just the filtered key. A legacy spelling of the unaffiliated
    /// key selects [`UNAFFILIATED`].
    pub fn parade_keys<'a>(&'a self, dataset: &'a Dataset) -> Vec<&'a str> {
        match &self.parade {
            ParadeFilter::All => std::iter::once(UNAFFILIATED)
                .chain(dataset.parades().iter().map(|p| p.key_name.as_str()))
                .collect(),
            ParadeFilter::Only(key) => vec![dataset.canonical_key(key)],
        }
    }

    /// Named parades taking part in parade comparisons. Never includes the
    /// unaffiliated pseudo-parade.
    pub fn named_parades<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Parade> {
        let selected = match &self.parade {
            ParadeFilter::All => None,
            ParadeFilter::Only(key) => Some(dataset.canonical_key(key)),
        };
        dataset
            .parades()
            .iter()
            .filter(|p| selected.is_none_or(|key| p.key_name == key))
            .collect()
    }

    /// Color keys in dataset order, restricted by the color filter.
    pub fn colors<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        dataset
            .colors()
            .filter(|color| match &self.colors {
                ColorFilter::All => true,
                ColorFilter::Only(keys) => keys.iter().any(|k| k == color),
            })
            .collect()
    }
}
