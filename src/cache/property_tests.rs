//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check lookup round-trips, duplicate rejection and the
//! refresh policy over generated reference tables.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{ManualClock, ReferenceCache, ReferenceRow, Snapshot};
use crate::error::CacheError;
use crate::source::InMemorySource;
use crate::tables::{class_role, TableDescriptor};

// == Test Configuration ==
const TABLE: TableDescriptor = class_role::TABLE;
const START: u64 = 1_700_000_000_000;

// == Strategies ==
/// Generates reference names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,16}".prop_map(|s| s)
}

/// Generates a table whose ids and names are each unique
fn unique_rows_strategy() -> impl Strategy<Value = Vec<ReferenceRow>> {
    prop::collection::hash_set(name_strategy(), 1..32)
        .prop_flat_map(|names| {
            let count = names.len();
            (
                Just(names),
                prop::collection::hash_set(any::<i64>(), count),
            )
        })
        .prop_map(|(names, ids)| {
            ids.into_iter()
                .zip(names)
                .map(|(id, name)| ReferenceRow::new(id, name))
                .collect()
        })
}

fn cache_over(
    rows: Vec<ReferenceRow>,
    interval: u64,
) -> (Arc<InMemorySource>, Arc<ManualClock>, ReferenceCache) {
    let source = Arc::new(InMemorySource::with_table(&TABLE, rows));
    let clock = Arc::new(ManualClock::new(START));
    let cache = ReferenceCache::with_clock(TABLE, source.clone(), interval, clock.clone())
        .expect("initial load");
    (source, clock, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every loaded pair resolves in both directions and back again.
    #[test]
    fn prop_lookup_round_trip(rows in unique_rows_strategy(), interval in 0u64..10_000) {
        let (_, _, cache) = cache_over(rows.clone(), interval);

        for row in &rows {
            let id = cache.lookup_id(&row.name).unwrap();
            prop_assert_eq!(id, row.id);
            prop_assert_eq!(cache.lookup_name(id).unwrap(), row.name.clone());
            prop_assert_eq!(cache.lookup_id(&cache.lookup_name(row.id).unwrap()).unwrap(), row.id);
        }
        prop_assert_eq!(cache.stats().total_entries, rows.len());
    }

    // A duplicated id or name anywhere in the row set is rejected.
    #[test]
    fn prop_duplicates_rejected(
        rows in unique_rows_strategy(),
        pick in any::<prop::sample::Index>(),
        duplicate_id in any::<bool>(),
        extra_name in name_strategy(),
    ) {
        let original = rows[pick.index(rows.len())].clone();
        let taken_ids: HashSet<i64> = rows.iter().map(|r| r.id).collect();
        let taken_names: HashSet<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        let extra = if duplicate_id {
            prop_assume!(!taken_names.contains(extra_name.as_str()));
            ReferenceRow::new(original.id, extra_name)
        } else {
            let fresh_id = (0..).find(|id| !taken_ids.contains(id)).unwrap();
            ReferenceRow::new(fresh_id, original.name.clone())
        };

        let mut corrupt = rows.clone();
        corrupt.push(extra);

        let result = Snapshot::from_rows(TABLE.table, corrupt.clone(), 0);
        let is_corrupt = matches!(result, Err(CacheError::CorruptReferenceData { .. }));
        prop_assert!(is_corrupt);

        // The live cache keeps serving what it had
        let (source, _, cache) = cache_over(rows, 60_000);
        source.set_rows(&TABLE, corrupt);
        prop_assert!(cache.refresh().is_err());
        prop_assert_eq!(cache.lookup_id(&original.name).unwrap(), original.id);
    }

    // A lookup before the interval elapses never reloads; at or after it always does.
    #[test]
    fn prop_staleness_trigger(interval in 1u64..1_000_000, extra in 0u64..1_000) {
        let (source, clock, cache) =
            cache_over(vec![ReferenceRow::new(1, class_role::PRIVILEGED)], interval);

        clock.set(START + interval - 1);
        prop_assert!(cache.is_known_id(1));
        prop_assert_eq!(source.fetch_count(), 1);

        clock.set(START + interval + extra);
        prop_assert!(cache.is_known_id(1));
        prop_assert_eq!(source.fetch_count(), 2);
    }

    // Once loaded, an unavailable source never turns into a failed lookup.
    #[test]
    fn prop_reload_failure_fallback(rows in unique_rows_strategy(), steps in 1u64..20) {
        let (source, clock, cache) = cache_over(rows.clone(), 100);
        source.set_unavailable(true);

        for _ in 0..steps {
            clock.advance(100);
            for row in &rows {
                prop_assert_eq!(cache.lookup_id(&row.name).unwrap(), row.id);
            }
        }
        prop_assert_eq!(cache.stats().reloads, 1);
    }
}
