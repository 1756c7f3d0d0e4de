//! Table rows, CSV export and the JSON snapshot handed to the renderer.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use crate::analyzers::colors::{color_shares, color_winners, get_color_summaries};
use crate::analyzers::items::{
    get_doubloon_totals, get_item_totals, get_specials_for_parade, get_specials_totals,
    get_stuffed_animal_totals,
};
use crate::analyzers::parades::{
    bead_types_by_parade, color_distribution_by_parade, get_parade_summaries, get_parade_winners,
    unaffiliated_sizes,
};
use crate::analyzers::types::{
    ColorSummary, ColorWinners, ParadeSummary, ParadeTypeBreakdown, ParadeWinners,
};
use crate::analyzers::utility::sort_desc_by;
use crate::dataset::{Dataset, KeyedMap, SizeBreakdown};
use crate::filter::{FilterState, ParadeFilter};
use crate::stats::DatasetStats;
use crate::units::{WeightUnit, format_weight};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeadTableRow {
    pub color: String,
    pub count: u64,
    pub weight: f64,
    pub medallion_count: u64,
    pub regular_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowTableRow {
    pub item: String,
    pub count: u64,
}

/// Bead table rows, highest count first.
pub fn beads_table(summaries: &KeyedMap<ColorSummary>) -> Vec<BeadTableRow> {
    let mut rows: Vec<_> = summaries
        .iter()
        .map(|(color, s)| BeadTableRow {
            color: color.to_string(),
            count: s.count,
            weight: s.weight,
            medallion_count: s.medallion.count,
            regular_count: s.regular.count,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.count as f64);
    rows
}

/// Throw item rows, highest count first.
pub fn throws_table(item_totals: &KeyedMap<u64>) -> Vec<ThrowTableRow> {
    let mut rows: Vec<_> = item_totals
        .iter()
        .map(|(item, count)| ThrowTableRow {
            item: item.to_string(),
            count: *count,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.count as f64);
    rows
}

/// Writes `rows` as CSV with a header line.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(rows = rows.len(), "CSV rows written");
    Ok(())
}

/// Every chart and table series for one filter selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub filter: FilterState,
    pub weight_unit: WeightUnit,
    pub stats: DatasetStats,
    pub total_weight_display: String,
    pub colors: KeyedMap<ColorSummary>,
    pub color_shares: KeyedMap<f64>,
    pub color_winners: ColorWinners,
    pub parades: KeyedMap<ParadeSummary>,
    pub parade_winners: ParadeWinners,
    pub bead_types: Vec<ParadeTypeBreakdown>,
    pub color_distribution: KeyedMap<KeyedMap<u64>>,
    pub unaffiliated_sizes: SizeBreakdown,
    pub items: KeyedMap<u64>,
    pub doubloons: KeyedMap<u64>,
    pub stuffed_animals: KeyedMap<u64>,
    pub specials: KeyedMap<u64>,
    pub beads_table: Vec<BeadTableRow>,
    pub throws_table: Vec<ThrowTableRow>,
}

impl DashboardSnapshot {
    #[tracing::instrument(skip(dataset))]
    pub fn build(dataset: &Dataset, filter: &FilterState, weight_unit: WeightUnit) -> Self {
        let stats = DatasetStats::from_dataset(dataset, filter);
        let colors = get_color_summaries(dataset, filter);
        let parades = get_parade_summaries(dataset, filter);
        let items = get_item_totals(dataset, filter);

        let specials = match &filter.parade {
            ParadeFilter::All => get_specials_totals(dataset),
            ParadeFilter::Only(key) => get_specials_for_parade(key, dataset),
        };

        let snapshot = DashboardSnapshot {
            generated_at: Utc::now(),
            filter: filter.clone(),
            weight_unit,
            total_weight_display: format_weight(stats.total_beads_weight, weight_unit),
            stats,
            color_shares: color_shares(&colors),
            color_winners: color_winners(&colors),
            beads_table: beads_table(&colors),
            colors,
            parade_winners: get_parade_winners(&parades),
            parades,
            bead_types: bead_types_by_parade(dataset, filter),
            color_distribution: color_distribution_by_parade(dataset, filter),
            unaffiliated_sizes: unaffiliated_sizes(dataset, filter),
            throws_table: throws_table(&items),
            items,
            doubloons: get_doubloon_totals(dataset, filter),
            stuffed_animals: get_stuffed_animal_totals(dataset),
            specials,
        };

        info!(
            colors = snapshot.colors.len(),
            parades = snapshot.parades.len(),
            total_beads = snapshot.stats.total_beads_count,
            "Dashboard snapshot built"
        );
        snapshot
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}
