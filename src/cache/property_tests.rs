//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the read/write properties of the item store.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde_json::json;

use crate::cache::{CacheKey, Item, ItemStore};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn id_strategy() -> impl Strategy<Value = i32> {
    1..1_000i32
}

fn tags_strategy() -> impl Strategy<Value = BTreeSet<i32>> {
    prop::collection::btree_set(id_strategy(), 1..8)
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        id_strategy(),
        id_strategy(),
        tags_strategy(),
        any::<bool>(),
        "[a-z]{0,16}",
    )
        .prop_map(|(banner_id, feature_id, tag_ids, is_active, title)| Item {
            banner_id,
            feature_id,
            tag_ids,
            is_active,
            content: json!({ "title": title }).as_object().cloned().unwrap(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Write/read coherence: every tag of a freshly written item finds it.
    #[test]
    fn prop_write_read_coherence(item in item_strategy()) {
        let mut store = ItemStore::new(TEST_TTL);
        let now = Utc::now();

        store.upsert(item.clone(), now);

        for tag in &item.tag_ids {
            let found = store.lookup(item.feature_id, *tag, now);
            prop_assert_eq!(found, Some(&item));
        }
    }

    // Expiration is enforced at read time, with no sweep in between.
    #[test]
    fn prop_expired_read_misses(item in item_strategy(), extra_ms in 1i64..10_000) {
        let ttl = Duration::from_secs(2);
        let mut store = ItemStore::new(ttl);
        let now = Utc::now();

        store.upsert(item.clone(), now);
        let later = now + TimeDelta::seconds(2) + TimeDelta::milliseconds(extra_ms);

        for tag in &item.tag_ids {
            prop_assert!(store.lookup(item.feature_id, *tag, later).is_none());
        }
        prop_assert!(store.contains(&item.key()));
    }

    // Last write wins: the second item under a key replaces the first entirely.
    #[test]
    fn prop_last_write_wins(first in item_strategy(), second in item_strategy()) {
        let mut second = second;
        second.banner_id = first.banner_id;
        second.feature_id = first.feature_id;

        let mut store = ItemStore::new(TEST_TTL);
        let now = Utc::now();
        store.upsert(first.clone(), now);
        store.upsert(second.clone(), now);

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(&store.get(&first.key()).unwrap().item, &second);

        for tag in first.tag_ids.difference(&second.tag_ids) {
            prop_assert!(store.lookup(first.feature_id, *tag, now).is_none());
        }
    }

    // An empty store misses for every input.
    #[test]
    fn prop_empty_store_misses(feature_id in any::<i32>(), tag_id in any::<i32>()) {
        let store = ItemStore::new(TEST_TTL);
        prop_assert!(store.lookup(feature_id, tag_id, Utc::now()).is_none());
    }

    // With several candidates, lookup always answers with the lowest banner id.
    #[test]
    fn prop_lookup_is_deterministic(
        banner_ids in prop::collection::btree_set(id_strategy(), 1..10),
        feature_id in id_strategy(),
        tag_id in id_strategy(),
    ) {
        let mut store = ItemStore::new(TEST_TTL);
        let now = Utc::now();

        for banner_id in banner_ids.iter().rev() {
            store.upsert(
                Item {
                    banner_id: *banner_id,
                    feature_id,
                    tag_ids: [tag_id].into_iter().collect(),
                    is_active: true,
                    content: Default::default(),
                },
                now,
            );
        }

        let expected = *banner_ids.iter().next().unwrap();
        for _ in 0..3 {
            prop_assert_eq!(store.lookup(feature_id, tag_id, now).unwrap().banner_id, expected);
        }
    }

    // A sweep at `now` leaves exactly the entries that are still live.
    #[test]
    fn prop_sweep_keeps_only_live(
        items in prop::collection::vec((item_strategy(), 0i64..20), 1..30),
        sweep_at in 0i64..20,
    ) {
        let mut store = ItemStore::new(Duration::from_secs(5));
        let start = Utc::now();

        for (item, written_at) in &items {
            store.upsert(item.clone(), start + TimeDelta::seconds(*written_at));
        }

        let now = start + TimeDelta::seconds(sweep_at);
        let expired = store.snapshot_expired(now);
        store.remove_expired(&expired, now);

        let keys: BTreeSet<CacheKey> = items.iter().map(|(item, _)| item.key()).collect();
        for key in keys {
            if let Some(entry) = store.get(&key) {
                prop_assert!(!entry.is_expired_at(now));
            }
        }
        prop_assert!(store.snapshot_expired(now).is_empty());
    }
}
