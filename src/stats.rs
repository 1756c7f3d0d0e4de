use serde::Serialize;

use crate::analyzers::items::get_specials_for_parade;
use crate::dataset::Dataset;
use crate::filter::{FilterState, ParadeFilter};

/// Headline totals shown above the charts.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_beads_count: u64,
    /// grams
    pub total_beads_weight: f64,
    pub total_doubloons: u64,
    pub total_items: u64,
    pub total_stuffed_animals: u64,
    pub total_specials: u64,
}

impl DatasetStats {
    pub fn from_dataset(dataset: &Dataset, filter: &FilterState) -> Self {
        let mut s = DatasetStats::default();

        let parade_keys = filter.parade_keys(dataset);

        // beads
        for ledger in filter
            .colors(dataset)
            .into_iter()
            .filter_map(|c| dataset.ledger(c))
        {
            for key in &parade_keys {
                let total = ledger.split(key).total();
                s.total_beads_count += total.count;
                s.total_beads_weight += total.weight;
            }
        }

        for key in &parade_keys {
            if let Some(count) = dataset.doubloons.get(key) {
                s.total_doubloons += count;
            }

            for per_parade in dataset.throws.items.values() {
                if let Some(count) = per_parade.get(key) {
                    s.total_items += count;
                }
            }

            if let Some(count) = dataset.throws.stuffed_animals.by_parade.get(key) {
                s.total_stuffed_animals += count;
            }
        }

        // specials are only attributed to a parade through its category
        s.total_specials = match &filter.parade {
            ParadeFilter::All => dataset.throws.specials.items.values().sum(),
            ParadeFilter::Only(key) => get_specials_for_parade(key, dataset).values().sum(),
        };

        s
    }

    /// Average bead weight in grams. Returns 0.0 when no beads were counted.
    pub fn avg_bead_weight(&self) -> f64 {
        if self.total_beads_count == 0 {
            0.0
        } else {
            self.total_beads_weight / self.total_beads_count as f64
        }
    }
}
