//! Leaderboard-style "winner" selection.

use crate::analyzers::types::{ColorSummary, ParadeSummary, Winner};
use crate::dataset::KeyedMap;

/// A numeric column of a summary type that winners can be ranked on.
pub trait Metric<T> {
    fn value(&self, summary: &T) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMetric {
    Count,
    Weight,
}

impl Metric<ColorSummary> for ColorMetric {
    fn value(&self, summary: &ColorSummary) -> f64 {
        match self {
            ColorMetric::Count => summary.count as f64,
            ColorMetric::Weight => summary.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParadeMetric {
    BeadCount,
    BeadWeight,
    ColorVariety,
    MedallionCount,
    ItemCount,
}

impl Metric<ParadeSummary> for ParadeMetric {
    fn value(&self, summary: &ParadeSummary) -> f64 {
        match self {
            ParadeMetric::BeadCount => summary.bead_count as f64,
            ParadeMetric::BeadWeight => summary.bead_weight,
            ParadeMetric::ColorVariety => summary.color_variety as f64,
            ParadeMetric::MedallionCount => summary.medallion_count as f64,
            ParadeMetric::ItemCount => summary.item_count as f64,
        }
    }
}

/// Linear scan for the largest value.
///
/// Comparison is strict `>` starting from 0, so the first maximal entry in
/// iteration order wins a tie. When nothing exceeds 0 the first key is
/// returned with value 0; an empty input yields an empty key.
pub fn max_entry<'a, I>(entries: I) -> Winner
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut entries = entries.into_iter().peekable();
    let mut best = Winner {
        key: entries
            .peek()
            .map(|(key, _)| key.to_string())
            .unwrap_or_default(),
        value: 0.0,
    };

    for (key, value) in entries {
        if value > best.value {
            best = Winner {
                key: key.to_string(),
                value,
            };
        }
    }

    best
}

/// Winner of `metric` over a summary mapping, in the mapping's order.
pub fn get_winner<T, M: Metric<T>>(summaries: &KeyedMap<T>, metric: M) -> Winner {
    max_entry(summaries.iter().map(|(key, s)| (key, metric.value(s))))
}
