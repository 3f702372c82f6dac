use indexmap::IndexMap;
use log::warn;

use super::directory::EntityDirectory;
use super::types::{BusinessAggregate, ItemCounts, RawRecord};

/// Group raw dated records by business entity and, within each business, by
/// location, summing item counts.
///
/// Records whose location is not in the directory are logged and skipped
/// entirely — they contribute to no total. Sums are independent of input
/// order; the order in which businesses and locations are first seen fixes
/// the iteration order of the result, which statement layout makes
/// externally visible. The record store's (location, date) ordering is the
/// canonical convention for a stable layout.
pub fn aggregate(
    records: impl IntoIterator<Item = RawRecord>,
    directory: &EntityDirectory,
) -> IndexMap<String, BusinessAggregate> {
    let mut businesses: IndexMap<String, BusinessAggregate> = IndexMap::new();

    for record in records {
        let Some(identity) = directory.lookup(&record.location) else {
            warn!("unmapped location, record dropped: {}", record.location);
            continue;
        };

        let business = businesses
            .entry(identity.registration_id.clone())
            .or_insert_with(|| {
                BusinessAggregate::new(&identity.registration_id, &identity.name, &identity.owner)
            });

        business
            .locations
            .entry(record.location)
            .or_insert_with(ItemCounts::default)
            .merge(&record.counts);
    }

    businesses
}
