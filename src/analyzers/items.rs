//! Throws other than beads: items, doubloons, stuffed animals, specials.

use tracing::debug;

use crate::dataset::{Dataset, KeyedMap};
use crate::filter::FilterState;

/// Count of each item type over the selected parade set.
#[tracing::instrument(skip(dataset))]
pub fn get_item_totals(dataset: &Dataset, filter: &FilterState) -> KeyedMap<u64> {
    let parade_keys = filter.parade_keys(dataset);

    dataset
        .throws
        .items
        .iter()
        .map(|(item, per_parade)| {
            let total = parade_keys
                .iter()
                .filter_map(|key| per_parade.get(key))
                .sum::<u64>();
            (item, total)
        })
        .collect()
}

/// Doubloons caught at each selected named parade; parades without an
/// entry report 0.
pub fn get_doubloon_totals(dataset: &Dataset, filter: &FilterState) -> KeyedMap<u64> {
    filter
        .named_parades(dataset)
        .into_iter()
        .map(|parade| {
            let key = parade.key_name.as_str();
            (key, dataset.doubloons.get(key).copied().unwrap_or(0))
        })
        .collect()
}

/// Stuffed animals by type, as recorded.
pub fn get_stuffed_animal_totals(dataset: &Dataset) -> KeyedMap<u64> {
    dataset.throws.stuffed_animals.by_type.clone()
}

/// Stuffed animals per parade key over the selected parade set.
pub fn get_stuffed_animals_by_parade(dataset: &Dataset, filter: &FilterState) -> KeyedMap<u64> {
    filter
        .parade_keys(dataset)
        .into_iter()
        .map(|key| {
            let count = dataset
                .throws
                .stuffed_animals
                .by_parade
                .get(key)
                .copied()
                .unwrap_or(0);
            (key, count)
        })
        .collect()
}

/// Special items by key, as recorded.
pub fn get_specials_totals(dataset: &Dataset) -> KeyedMap<u64> {
    dataset.throws.specials.items.clone()
}

/// Special items attributed to a parade.
///
/// The dataset only records a free-text category per parade (e.g.
/// `"Cups/Koozies"`). The category is lower-cased, cut at the first `/`, and
/// every special item whose key contains that fragment is returned. Item
/// keys are matched as-is, so a capitalized key never matches.
pub fn get_specials_for_parade(parade_key: &str, dataset: &Dataset) -> KeyedMap<u64> {
    let parade_key = dataset.canonical_key(parade_key);
    let specials = &dataset.throws.specials;
    let Some(category) = specials.parade_categories.get(parade_key) else {
        return KeyedMap::new();
    };

    let category = category.to_lowercase();
    let fragment = category.split('/').next().unwrap_or_default();

    let matched: KeyedMap<u64> = specials
        .items
        .iter()
        .filter(|(key, _)| key.contains(fragment))
        .map(|(key, count)| (key, *count))
        .collect();

    debug!(parade = parade_key, fragment, matched = matched.len(), "Specials matched");
    matched
}
