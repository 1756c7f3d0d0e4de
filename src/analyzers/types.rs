//! Derived summaries produced by the aggregation engine.

use serde::Serialize;

use crate::dataset::{BeadSplit, Tally};

/// Bead totals for a single color across the selected parades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColorSummary {
    pub count: u64,
    pub weight: f64,
    pub medallion: Tally,
    pub regular: Tally,
}

impl From<BeadSplit> for ColorSummary {
    fn from(split: BeadSplit) -> Self {
        let total = split.total();
        ColorSummary {
            count: total.count,
            weight: total.weight,
            medallion: split.medallion,
            regular: split.regular,
        }
    }
}

/// Per-parade comparison metrics. Only named parades get one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParadeSummary {
    pub bead_count: u64,
    pub bead_weight: f64,
    pub color_variety: u64,
    pub medallion_count: u64,
    /// Throw items plus stuffed animals. Doubloons are not included.
    pub item_count: u64,
}

/// Key holding the maximum value of a metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Winner {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorWinners {
    pub by_count: Winner,
    pub by_weight: Winner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParadeWinners {
    pub most_generous: Winner,
    pub heaviest: Winner,
    pub most_colorful: Winner,
    pub medallion_king: Winner,
}

/// Medallion vs regular bead counts for one parade (unaffiliated included).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParadeTypeBreakdown {
    pub parade_key: String,
    pub label: String,
    pub medallion: u64,
    pub regular: u64,
}
