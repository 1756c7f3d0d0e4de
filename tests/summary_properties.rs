use parade_throws::analyzers::colors::get_color_summaries;
use parade_throws::analyzers::types::ColorSummary;
use parade_throws::dataset::{KeyedMap, UNAFFILIATED};
use parade_throws::stats::DatasetStats;
use parade_throws::{Dataset, EngineConfig, FilterState};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn tally() -> impl Strategy<Value = Value> {
    (0u64..60, 0u32..900).prop_map(|(count, weight)| json!({ "count": count, "weight": weight }))
}

fn named_bucket() -> impl Strategy<Value = Value> {
    (proptest::option::of(tally()), proptest::option::of(tally())).prop_map(|(m, r)| {
        let mut bucket = Map::new();
        if let Some(m) = m {
            bucket.insert("medallion".into(), m);
        }
        if let Some(r) = r {
            bucket.insert("regular".into(), r);
        }
        Value::Object(bucket)
    })
}

fn unaffiliated_bucket() -> impl Strategy<Value = Value> {
    (tally(), tally(), tally(), tally(), tally(), tally()).prop_map(
        |(small, medium, large, non_sphere, medallion, special)| {
            json!({
                "small": small,
                "medium": medium,
                "large": large,
                "nonSphere": non_sphere,
                "other": { "medallion": medallion, "special": special }
            })
        },
    )
}

fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..4, 1usize..5)
        .prop_flat_map(|(parades, colors)| {
            let ledger = (
                proptest::option::of(unaffiliated_bucket()),
                proptest::collection::vec(proptest::option::of(named_bucket()), parades),
            );
            (Just(parades), proptest::collection::vec(ledger, colors))
        })
        .prop_map(|(parades, ledgers)| {
            let parade_list: Vec<Value> = (0..parades)
                .map(|i| json!({ "keyName": format!("p{i}"), "shortName": format!("P{i}"), "name": format!("Parade {i}") }))
                .collect();

            let mut beads = Map::new();
            for (c, (unaffiliated, named)) in ledgers.into_iter().enumerate() {
                let mut ledger = Map::new();
                if let Some(bucket) = unaffiliated {
                    ledger.insert(UNAFFILIATED.into(), bucket);
                }
                for (i, bucket) in named.into_iter().enumerate() {
                    if let Some(bucket) = bucket {
                        ledger.insert(format!("p{i}"), bucket);
                    }
                }
                beads.insert(format!("color{c}"), Value::Object(ledger));
            }

            let value = json!({ "parades": parade_list, "beads": beads });
            Dataset::from_value(value, &EngineConfig::default()).unwrap()
        })
}

fn keys_for(dataset: &Dataset) -> Vec<String> {
    std::iter::once(UNAFFILIATED.to_string())
        .chain(dataset.parades().iter().map(|p| p.key_name.clone()))
        .collect()
}

proptest! {
    #[test]
    fn summary_totals_are_medallion_plus_regular(dataset in dataset()) {
        for (_, s) in get_color_summaries(&dataset, &FilterState::all()).iter() {
            prop_assert_eq!(s.count, s.medallion.count + s.regular.count);
            prop_assert_eq!(s.weight, s.medallion.weight + s.regular.weight);
        }
    }

    #[test]
    fn bead_grand_total_matches_color_summaries(dataset in dataset()) {
        let filter = FilterState::all();
        let stats = DatasetStats::from_dataset(&dataset, &filter);
        let summed: u64 = get_color_summaries(&dataset, &filter).values().map(|s| s.count).sum();
        prop_assert_eq!(stats.total_beads_count, summed);
    }

    #[test]
    fn per_parade_filters_add_up_to_unfiltered(dataset in dataset()) {
        let unfiltered = get_color_summaries(&dataset, &FilterState::all());

        let mut combined: KeyedMap<(u64, u64)> = KeyedMap::new();
        for key in keys_for(&dataset) {
            for (color, s) in get_color_summaries(&dataset, &FilterState::parade(key)).iter() {
                let slot = combined.entry_or_default(color);
                slot.0 += s.medallion.count;
                slot.1 += s.regular.count;
            }
        }

        for (color, s) in unfiltered.iter() {
            let (medallion, regular) = *combined.get(color).unwrap();
            prop_assert_eq!(s.medallion.count, medallion);
            prop_assert_eq!(s.regular.count, regular);
        }
    }

    #[test]
    fn aggregation_is_idempotent(dataset in dataset()) {
        let first: KeyedMap<ColorSummary> = get_color_summaries(&dataset, &FilterState::all());
        let second = get_color_summaries(&dataset, &FilterState::all());
        prop_assert_eq!(first, second);
    }
}
