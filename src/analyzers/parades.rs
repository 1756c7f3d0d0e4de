use tracing::debug;

use crate::analyzers::types::{ParadeSummary, ParadeTypeBreakdown, ParadeWinners};
use crate::analyzers::winner::{ParadeMetric, get_winner};
use crate::dataset::{BeadSplit, Dataset, KeyedMap, SizeBreakdown, UNAFFILIATED};
use crate::filter::FilterState;

/// Comparison metrics for each selected named parade, in parade order.
///
/// The unaffiliated pseudo-parade never gets a summary.
#[tracing::instrument(skip(dataset))]
pub fn get_parade_summaries(dataset: &Dataset, filter: &FilterState) -> KeyedMap<ParadeSummary> {
    let colors = filter.colors(dataset);

    let summaries: KeyedMap<ParadeSummary> = filter
        .named_parades(dataset)
        .into_iter()
        .map(|parade| {
            let key = parade.key_name.as_str();
            let mut s = ParadeSummary::default();

            for color in &colors {
                let Some(ledger) = dataset.ledger(color) else {
                    continue;
                };
                let split = ledger.split(key);
                let total = split.total();

                s.bead_count += total.count;
                s.bead_weight += total.weight;
                s.medallion_count += split.medallion.count;
                if total.count > 0 {
                    s.color_variety += 1;
                }
            }

            s.item_count = dataset
                .throws
                .items
                .values()
                .filter_map(|per_parade| per_parade.get(key))
                .sum::<u64>()
                + dataset
                    .throws
                    .stuffed_animals
                    .by_parade
                    .get(key)
                    .copied()
                    .unwrap_or(0);

            (key, s)
        })
        .collect();

    debug!(parades = summaries.len(), "Parade summaries computed");
    summaries
}

pub fn get_parade_winners(summaries: &KeyedMap<ParadeSummary>) -> ParadeWinners {
    ParadeWinners {
        most_generous: get_winner(summaries, ParadeMetric::BeadCount),
        heaviest: get_winner(summaries, ParadeMetric::BeadWeight),
        most_colorful: get_winner(summaries, ParadeMetric::ColorVariety),
        medallion_king: get_winner(summaries, ParadeMetric::MedallionCount),
    }
}

/// Medallion and regular bead counts for every parade in the selected set,
/// unaffiliated included.
pub fn bead_types_by_parade(dataset: &Dataset, filter: &FilterState) -> Vec<ParadeTypeBreakdown> {
    let colors = filter.colors(dataset);

    filter
        .parade_keys(dataset)
        .into_iter()
        .map(|key| {
            let mut split = BeadSplit::default();
            for ledger in colors.iter().filter_map(|c| dataset.ledger(c)) {
                split += ledger.split(key);
            }
            ParadeTypeBreakdown {
                parade_key: key.to_string(),
                label: dataset.label_for(key).to_string(),
                medallion: split.medallion.count,
                regular: split.regular.count,
            }
        })
        .collect()
}

/// For each selected named parade, the bead count per color. Colors the
/// parade did not throw are left out.
pub fn color_distribution_by_parade(
    dataset: &Dataset,
    filter: &FilterState,
) -> KeyedMap<KeyedMap<u64>> {
    let colors = filter.colors(dataset);

    filter
        .named_parades(dataset)
        .into_iter()
        .map(|parade| {
            let key = parade.key_name.as_str();
            let per_color: KeyedMap<u64> = colors
                .iter()
                .filter_map(|color| {
                    let count = dataset.ledger(color)?.split(key).total().count;
                    (count > 0).then_some((*color, count))
                })
                .collect();
            (key, per_color)
        })
        .collect()
}

/// Size breakdown of unaffiliated beads across the selected colors. Zero
/// when the parade filter excludes the unaffiliated bucket.
pub fn unaffiliated_sizes(dataset: &Dataset, filter: &FilterState) -> SizeBreakdown {
    let mut sizes = SizeBreakdown::default();
    if !filter.parade_keys(dataset).contains(&UNAFFILIATED) {
        return sizes;
    }

    for ledger in filter
        .colors(dataset)
        .into_iter()
        .filter_map(|c| dataset.ledger(c))
    {
        sizes += ledger.unaffiliated_sizes();
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use serde_json::{Value, json};

    #[test]
    fn test_parade_summary_metrics() {
        let dataset = sample_dataset();
        let summaries = get_parade_summaries(&dataset, &FilterState::all());

        assert_eq!(summaries.keys().collect::<Vec<_>>(), vec!["A", "B"]);

        let a = summaries.get("A").unwrap();
        assert_eq!(a.bead_count, 18);
        assert_eq!(a.bead_weight, 430.0);
        assert_eq!(a.color_variety, 2);
        assert_eq!(a.medallion_count, 0);
        assert_eq!(a.item_count, 5 + 1 + 2);

        let b = summaries.get("B").unwrap();
        assert_eq!(b.bead_count, 2);
        assert_eq!(b.medallion_count, 2);
        assert_eq!(b.color_variety, 1);
        assert_eq!(b.item_count, 3);
    }

    #[test]
    fn test_doubloons_not_counted_as_items() {
        let dataset = sample_dataset();
        let summaries = get_parade_summaries(&dataset, &FilterState::all());
        // B threw 50 doubloons
        assert_eq!(summaries.get("B").unwrap().item_count, 3);
    }

    #[test]
    fn test_unaffiliated_excluded() {
        let dataset = sample_dataset();
        let summaries = get_parade_summaries(&dataset, &FilterState::all());
        assert!(!summaries.contains_key(UNAFFILIATED));
        assert!(get_parade_summaries(&dataset, &FilterState::parade(UNAFFILIATED)).is_empty());
    }

    #[test]
    fn test_parade_filter() {
        let dataset = sample_dataset();
        let summaries = get_parade_summaries(&dataset, &FilterState::parade("B"));
        assert_eq!(summaries.keys().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_parade_winners() {
        let dataset = sample_dataset();
        let winners = get_parade_winners(&get_parade_summaries(&dataset, &FilterState::all()));

        assert_eq!(winners.most_generous.key, "A");
        assert_eq!(winners.most_generous.value, 18.0);
        assert_eq!(winners.heaviest.key, "A");
        assert_eq!(winners.most_colorful.key, "A");
        assert_eq!(winners.medallion_king.key, "B");
        assert_eq!(winners.medallion_king.value, 2.0);
    }

    #[test]
    fn test_winners_all_zero_pick_first_parade() {
        let dataset = build(json!({ "parades": [parade("A"), parade("B")], "beads": {} }));
        let winners = get_parade_winners(&get_parade_summaries(&dataset, &FilterState::all()));
        assert_eq!(winners.medallion_king.key, "A");
        assert_eq!(winners.medallion_king.value, 0.0);
    }

    #[test]
    fn test_bead_types_by_parade() {
        let dataset = sample_dataset();
        let rows = bead_types_by_parade(&dataset, &FilterState::all());

        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Unaffiliated", "Alpha", "Beta"]);

        assert_eq!(rows[0].regular, 7);
        assert_eq!(rows[0].medallion, 1);
        assert_eq!(rows[1].regular, 18);
        assert_eq!(rows[2].medallion, 2);
    }

    #[test]
    fn test_color_distribution_skips_zero_counts() {
        let dataset = sample_dataset();
        let distribution = color_distribution_by_parade(&dataset, &FilterState::all());

        let b = distribution.get("B").unwrap();
        assert_eq!(b.keys().collect::<Vec<_>>(), vec!["purple"]);
        assert_eq!(b.get("purple"), Some(&2));

        let a = distribution.get("A").unwrap();
        assert_eq!(a.get("green"), Some(&8));
    }

    #[test]
    fn test_unaffiliated_sizes() {
        let dataset = sample_dataset();
        let sizes = unaffiliated_sizes(&dataset, &FilterState::all());
        assert_eq!(sizes.small, 6);
        assert_eq!(sizes.medallion, 1);
        assert_eq!(sizes.special, 1);

        let filtered = unaffiliated_sizes(&dataset, &FilterState::parade("A"));
        assert_eq!(filtered, SizeBreakdown::default());
    }

    // Helper functions for tests
    fn sample_dataset() -> Dataset {
        build(json!({
            "parades": [parade("A"), parade("B")],
            "beads": {
                "purple": {
                    "unaffiliated": {
                        "small": { "count": 6, "weight": 12 },
                        "other": { "medallion": { "count": 1, "weight": 20 } }
                    },
                    "A": { "regular": { "count": 10, "weight": 130 } },
                    "B": { "medallion": { "count": 2, "weight": 40 } }
                },
                "green": {
                    "unaffiliated": { "other": { "special": { "count": 1, "weight": 4 } } },
                    "A": { "regular": { "count": 8, "weight": 300 } },
                    "B": { "regular": { "count": 0, "weight": 0 } }
                }
            },
            "doubloons": { "B": { "count": 50 } },
            "throws": {
                "items": {
                    "cups": { "A": { "count": 5 }, "B": { "count": 3 } },
                    "hats": { "A": { "count": 1 } }
                },
                "stuffedAnimals": {
                    "type": { "bear": { "count": 2 } },
                    "parade": { "A": { "count": 2 } }
                }
            }
        }))
    }

    fn build(value: Value) -> Dataset {
        Dataset::from_value(value, &EngineConfig::default()).unwrap()
    }

    fn parade(key: &str) -> Value {
        let short = if key == "A" { "Alpha" } else { "Beta" };
        json!({ "keyName": key, "shortName": short, "name": format!("Krewe of {short}") })
    }
}
