use tracing::debug;

use crate::analyzers::types::{ColorSummary, ColorWinners};
use crate::analyzers::utility::pct;
use crate::analyzers::winner::{ColorMetric, get_winner};
use crate::dataset::{BeadSplit, Dataset, KeyedMap};
use crate::filter::FilterState;

/// Totals every selected color over the selected parade set.
///
/// Unaffiliated size buckets arrive already folded into `regular` (and
/// `other.medallion` into `medallion`), so each parade contributes its
/// normalized split. Colors without data still appear with zeros, in
/// dataset order.
#[tracing::instrument(skip(dataset))]
pub fn get_color_summaries(dataset: &Dataset, filter: &FilterState) -> KeyedMap<ColorSummary> {
    let parade_keys = filter.parade_keys(dataset);

    let summaries: KeyedMap<ColorSummary> = filter
        .colors(dataset)
        .into_iter()
        .map(|color| {
            let mut split = BeadSplit::default();
            if let Some(ledger) = dataset.ledger(color) {
                for key in &parade_keys {
                    split += ledger.split(key);
                }
            }
            (color, ColorSummary::from(split))
        })
        .collect();

    debug!(colors = summaries.len(), "Color summaries computed");
    summaries
}

/// Most collected color by count and by weight.
pub fn color_winners(summaries: &KeyedMap<ColorSummary>) -> ColorWinners {
    ColorWinners {
        by_count: get_winner(summaries, ColorMetric::Count),
        by_weight: get_winner(summaries, ColorMetric::Weight),
    }
}

/// Each color's share of the total bead count, in percent.
pub fn color_shares(summaries: &KeyedMap<ColorSummary>) -> KeyedMap<f64> {
    let total: u64 = summaries.values().map(|s| s.count).sum();
    summaries
        .iter()
        .map(|(color, s)| (color, pct(s.count as f64, total as f64)))
        .collect()
}
