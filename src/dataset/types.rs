//! Normalized dataset types.
//!
//! Everything here is produced by ingestion and never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Add, AddAssign};

use super::keyed::KeyedMap;
use crate::config::fold_alias;

/// Canonical key of the pseudo-parade holding items not tied to a named parade.
pub const UNAFFILIATED: &str = "unaffiliated";

/// A bead count and its weight in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tally {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
}

/// Reads an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Tally {
    pub fn new(count: u64, weight: f64) -> Self {
        Self { count, weight }
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            count: self.count.saturating_add(rhs.count),
            weight: self.weight + rhs.weight,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        *self = *self + rhs;
    }
}

/// A parade bucket resolved to the medallion/regular split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BeadSplit {
    pub medallion: Tally,
    pub regular: Tally,
}

impl BeadSplit {
    pub fn total(&self) -> Tally {
        self.medallion + self.regular
    }
}

impl AddAssign for BeadSplit {
    fn add_assign(&mut self, rhs: BeadSplit) {
        self.medallion += rhs.medallion;
        self.regular += rhs.regular;
    }
}

/// Bead counts of the unaffiliated bucket before folding into [`BeadSplit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBreakdown {
    pub small: u64,
    pub medium: u64,
    pub large: u64,
    pub non_sphere: u64,
    pub medallion: u64,
    pub special: u64,
}

impl AddAssign for SizeBreakdown {
    fn add_assign(&mut self, rhs: SizeBreakdown) {
        self.small = self.small.saturating_add(rhs.small);
        self.medium = self.medium.saturating_add(rhs.medium);
        self.large = self.large.saturating_add(rhs.large);
        self.non_sphere = self.non_sphere.saturating_add(rhs.non_sphere);
        self.medallion = self.medallion.saturating_add(rhs.medallion);
        self.special = self.special.saturating_add(rhs.special);
    }
}

/// Everything recorded for one bead color, keyed by parade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorLedger {
    pub(crate) splits: KeyedMap<BeadSplit>,
    pub(crate) unaffiliated_sizes: SizeBreakdown,
}

impl ColorLedger {
    /// Normalized split for `parade_key`; zero when the parade has no entry.
    pub fn split(&self, parade_key: &str) -> BeadSplit {
        self.splits.get(parade_key).copied().unwrap_or_default()
    }

    pub fn unaffiliated_sizes(&self) -> SizeBreakdown {
        self.unaffiliated_sizes
    }

    pub fn parade_keys(&self) -> impl Iterator<Item = &str> {
        self.splits.keys()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parade {
    pub key_name: String,
    pub short_name: String,
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StuffedAnimals {
    pub(crate) by_type: KeyedMap<u64>,
    pub(crate) by_parade: KeyedMap<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specials {
    pub(crate) items: KeyedMap<u64>,
    /// Free-text special category per parade, e.g. `"Cups/Koozies"`.
    pub(crate) parade_categories: KeyedMap<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Throws {
    /// item type -> parade key -> count
    pub(crate) items: KeyedMap<KeyedMap<u64>>,
    pub(crate) stuffed_animals: StuffedAnimals,
    pub(crate) specials: Specials,
}

/// The whole, normalized throws dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) parades: Vec<Parade>,
    pub(crate) beads: KeyedMap<ColorLedger>,
    pub(crate) doubloons: KeyedMap<u64>,
    pub(crate) throws: Throws,
    pub(crate) unaffiliated_label: String,
    pub(crate) unaffiliated_aliases: Vec<String>,
}

impl Dataset {
    pub fn parades(&self) -> &[Parade] {
        &self.parades
    }

    pub fn parade(&self, key: &str) -> Option<&Parade> {
        self.parades.iter().find(|p| p.key_name == key)
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.beads.keys()
    }

    pub fn ledger(&self, color: &str) -> Option<&ColorLedger> {
        self.beads.get(color)
    }

    /// Maps a legacy spelling of the unaffiliated key onto [`UNAFFILIATED`].
    pub fn canonical_key<'a>(&self, key: &'a str) -> &'a str {
        fold_alias(&self.unaffiliated_aliases, key)
    }

    /// Display label for a parade key: the parade's short name, the
    /// unaffiliated label for the reserved key, otherwise the key itself.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        if key == UNAFFILIATED {
            return &self.unaffiliated_label;
        }
        self.parade(key).map(|p| p.short_name.as_str()).unwrap_or(key)
    }
}
