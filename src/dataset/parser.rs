//! Ingestion of the raw throws dataset.
//!
//! The raw JSON mirrors the hand-edited data file. It is deserialized into
//! private raw types, then normalized into [`Dataset`].

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::keyed::KeyedMap;
use super::types::{
    BeadSplit, ColorLedger, Dataset, Parade, SizeBreakdown, Specials, StuffedAnimals, Tally,
    Throws, UNAFFILIATED, null_as_default,
};
use crate::config::EngineConfig;
use crate::error::{DatasetError, Result};

#[derive(Debug, Deserialize)]
struct RawDataset {
    parades: Vec<Parade>,
    beads: KeyedMap<KeyedMap<Value>>,
    #[serde(default)]
    doubloons: KeyedMap<RawCount>,
    #[serde(default)]
    throws: RawThrows,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawThrows {
    items: KeyedMap<KeyedMap<RawCount>>,
    stuffed_animals: RawStuffedAnimals,
    specials: RawSpecials,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStuffedAnimals {
    #[serde(rename = "type")]
    by_type: KeyedMap<RawCount>,
    #[serde(rename = "parade")]
    by_parade: KeyedMap<RawCount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpecials {
    items: KeyedMap<RawCount>,
    description: RawSpecialsDescription,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpecialsDescription {
    parades: KeyedMap<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCount {
    #[serde(deserialize_with = "null_as_default")]
    count: u64,
}

/// Bucket split into medallion and regular beads, used by named parades.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SplitBucket {
    medallion: Option<Tally>,
    regular: Option<Tally>,
}

/// Bucket split by bead size, used by the unaffiliated pseudo-parade.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SizedBucket {
    small: Option<Tally>,
    medium: Option<Tally>,
    large: Option<Tally>,
    non_sphere: Option<Tally>,
    other: Option<OtherBeads>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OtherBeads {
    medallion: Option<Tally>,
    special: Option<Tally>,
}

const SPLIT_FIELDS: [&str; 2] = ["medallion", "regular"];
const SIZED_FIELDS: [&str; 5] = ["small", "medium", "large", "nonSphere", "other"];

#[derive(Debug)]
enum ParadeBucket {
    Split(SplitBucket),
    Sized(SizedBucket),
}

impl ParadeBucket {
    /// Reads a bucket in either shape, chosen by the fields it carries.
    /// A bucket with no recognized field takes the shape usual for its key.
    fn from_value(path: &str, parade_key: &str, value: Value) -> Result<Self> {
        let sized = match &value {
            Value::Null => parade_key == UNAFFILIATED,
            Value::Object(fields) => {
                let has_split = SPLIT_FIELDS.iter().any(|f| fields.contains_key(*f));
                let has_sized = SIZED_FIELDS.iter().any(|f| fields.contains_key(*f));
                if has_split && has_sized {
                    return Err(DatasetError::malformed(
                        path,
                        "mixes medallion/regular and size fields",
                    ));
                }
                for field in fields.keys() {
                    let field = field.as_str();
                    if !SPLIT_FIELDS.contains(&field) && !SIZED_FIELDS.contains(&field) {
                        warn!(path, field, "Unrecognized bucket field is ignored");
                    }
                }
                has_sized || (!has_split && parade_key == UNAFFILIATED)
            }
            _ => parade_key == UNAFFILIATED,
        };

        let bucket = match (sized, value) {
            (true, Value::Null) => Ok(ParadeBucket::Sized(SizedBucket::default())),
            (false, Value::Null) => Ok(ParadeBucket::Split(SplitBucket::default())),
            (true, value) => serde_json::from_value(value).map(ParadeBucket::Sized),
            (false, value) => serde_json::from_value(value).map(ParadeBucket::Split),
        };
        bucket.map_err(|e| DatasetError::malformed(path, e))
    }

    fn tallies(&self) -> Vec<Tally> {
        let all = match self {
            ParadeBucket::Split(b) => vec![b.medallion, b.regular],
            ParadeBucket::Sized(b) => {
                let other = b.other.as_ref();
                vec![
                    b.small,
                    b.medium,
                    b.large,
                    b.non_sphere,
                    other.and_then(|o| o.medallion),
                    other.and_then(|o| o.special),
                ]
            }
        };
        all.into_iter().flatten().collect()
    }

    fn split(&self) -> BeadSplit {
        let t = |tally: Option<Tally>| tally.unwrap_or_default();
        match self {
            ParadeBucket::Split(b) => BeadSplit {
                medallion: t(b.medallion),
                regular: t(b.regular),
            },
            ParadeBucket::Sized(b) => {
                let other = b.other.as_ref();
                BeadSplit {
                    medallion: t(other.and_then(|o| o.medallion)),
                    regular: t(b.small)
                        + t(b.medium)
                        + t(b.large)
                        + t(b.non_sphere)
                        + t(other.and_then(|o| o.special)),
                }
            }
        }
    }

    /// Size counts; a medallion/regular bucket records no sizes.
    fn sizes(&self) -> SizeBreakdown {
        let c = |tally: Option<Tally>| tally.map(|t| t.count).unwrap_or(0);
        match self {
            ParadeBucket::Split(_) => SizeBreakdown::default(),
            ParadeBucket::Sized(b) => {
                let other = b.other.as_ref();
                SizeBreakdown {
                    small: c(b.small),
                    medium: c(b.medium),
                    large: c(b.large),
                    non_sphere: c(b.non_sphere),
                    medallion: c(other.and_then(|o| o.medallion)),
                    special: c(other.and_then(|o| o.special)),
                }
            }
        }
    }
}

/// Running sum of every count in the dataset. Every aggregate is a sub-sum
/// of it, so aggregation cannot overflow once ingestion succeeds.
#[derive(Debug, Default)]
struct CountTotal(u64);

impl CountTotal {
    fn add(&mut self, path: &str, count: u64) -> Result<()> {
        self.0 = self
            .0
            .checked_add(count)
            .ok_or_else(|| DatasetError::malformed(path, "count total overflows"))?;
        Ok(())
    }
}

impl Dataset {
    /// Builds a dataset from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Malformed`] when a required field is missing or
    /// has the wrong shape, a weight is negative, a parade key is reused or
    /// reserved, or the counts do not fit in 64 bits.
    #[tracing::instrument(skip_all)]
    pub fn from_value(value: Value, config: &EngineConfig) -> Result<Dataset> {
        let raw: RawDataset =
            serde_json::from_value(value).map_err(|e| DatasetError::malformed("dataset", e))?;
        normalize(raw, config)
    }

    /// Parses JSON text into a dataset.
    pub fn from_json_str(json: &str, config: &EngineConfig) -> Result<Dataset> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| DatasetError::malformed("dataset", e))?;
        Self::from_value(value, config)
    }

    /// Reads and parses a JSON dataset file.
    pub fn load(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Dataset> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading dataset");
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, config)
    }
}

fn normalize(raw: RawDataset, config: &EngineConfig) -> Result<Dataset> {
    let known = validate_parades(&raw.parades, config)?;
    let mut total = CountTotal::default();

    let mut beads = KeyedMap::new();
    for (color, raw_ledger) in raw.beads {
        let ledger = normalize_ledger(&color, raw_ledger, config, &known, &mut total)?;
        beads.insert(color, ledger);
    }

    let mut items = KeyedMap::new();
    for (item, per_parade) in raw.throws.items {
        let path = format!("throws.items.{item}");
        items.insert(item, canonical_counts(&path, per_parade, config, &mut total)?);
    }

    let stuffed = raw.throws.stuffed_animals;
    let specials = raw.throws.specials;
    let throws = Throws {
        items,
        stuffed_animals: StuffedAnimals {
            by_type: counts("throws.stuffedAnimals.type", stuffed.by_type, &mut total)?,
            by_parade: canonical_counts(
                "throws.stuffedAnimals.parade",
                stuffed.by_parade,
                config,
                &mut total,
            )?,
        },
        specials: Specials {
            items: counts("throws.specials.items", specials.items, &mut total)?,
            parade_categories: specials
                .description
                .parades
                .into_iter()
                .map(|(k, v)| (config.canonical_key(&k).to_string(), v))
                .collect(),
        },
    };

    let doubloons = canonical_counts("doubloons", raw.doubloons, config, &mut total)?;

    let dataset = Dataset {
        parades: raw.parades,
        beads,
        doubloons,
        throws,
        unaffiliated_label: config.unaffiliated_label.clone(),
        unaffiliated_aliases: config.unaffiliated_aliases.clone(),
    };

    info!(
        parades = dataset.parades.len(),
        colors = dataset.beads.len(),
        item_types = dataset.throws.items.len(),
        total_count = total.0,
        "Dataset loaded"
    );

    Ok(dataset)
}

fn validate_parades<'a>(parades: &'a [Parade], config: &EngineConfig) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for (idx, parade) in parades.iter().enumerate() {
        let path = format!("parades[{idx}].keyName");
        let key = parade.key_name.as_str();
        if key.is_empty() {
            return Err(DatasetError::malformed(path, "must not be empty"));
        }
        if config.canonical_key(key) == UNAFFILIATED {
            return Err(DatasetError::malformed(path, format!("reserved key '{key}'")));
        }
        if !seen.insert(key) {
            return Err(DatasetError::malformed(path, format!("duplicate key '{key}'")));
        }
    }
    Ok(seen)
}

fn normalize_ledger(
    color: &str,
    raw: KeyedMap<Value>,
    config: &EngineConfig,
    known: &HashSet<&str>,
    total: &mut CountTotal,
) -> Result<ColorLedger> {
    let mut ledger = ColorLedger::default();

    for (raw_key, value) in raw {
        let path = format!("beads.{color}.{raw_key}");
        let key = config.canonical_key(&raw_key);
        if key != UNAFFILIATED && !known.contains(key) {
            warn!(color, parade = key, "Ledger entry for unknown parade is ignored");
        }

        let bucket = ParadeBucket::from_value(&path, key, value)?;
        for tally in bucket.tallies() {
            if tally.weight < 0.0 {
                return Err(DatasetError::malformed(path, "negative weight"));
            }
            total.add(&path, tally.count)?;
        }

        *ledger.splits.entry_or_default(key) += bucket.split();
        if key == UNAFFILIATED {
            ledger.unaffiliated_sizes += bucket.sizes();
        }
    }

    Ok(ledger)
}

fn counts(path: &str, raw: KeyedMap<RawCount>, total: &mut CountTotal) -> Result<KeyedMap<u64>> {
    let mut out = KeyedMap::new();
    for (key, c) in raw {
        total.add(path, c.count)?;
        out.insert(key, c.count);
    }
    Ok(out)
}

/// Flattens `{count}` records and folds unaffiliated aliases into the canonical key.
fn canonical_counts(
    path: &str,
    raw: KeyedMap<RawCount>,
    config: &EngineConfig,
    total: &mut CountTotal,
) -> Result<KeyedMap<u64>> {
    let mut out = KeyedMap::new();
    for (key, c) in raw {
        total.add(path, c.count)?;
        *out.entry_or_default(config.canonical_key(&key)) += c.count;
    }
    Ok(out)
}
