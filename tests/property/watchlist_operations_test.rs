//! Property-based tests for watchlist operations.
//!
//! These tests drive the watchlist with arbitrary sequences of toggles and
//! check membership parity, title uniqueness, and that watched-toggling never
//! creates entries.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use cinetrack::database::MemoryStore;
use cinetrack::managers::watchlist_manager::{WatchlistManager, WatchlistManagerTrait};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Bookmark(u64),
    Watched(u64),
}

/// Small id space so sequences revisit the same titles often.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..12).prop_map(Op::Bookmark),
        (0u64..12).prop_map(Op::Watched),
    ]
}

fn fresh() -> WatchlistManager {
    WatchlistManager::load(Rc::new(MemoryStore::new())).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Toggling twice in a row restores membership.
    #[test]
    fn double_toggle_restores_membership(
        setup in proptest::collection::vec(0u64..12, 0..20),
        id in 0u64..12,
    ) {
        let mut mgr = fresh();
        for t in setup {
            mgr.toggle_bookmark(t).unwrap();
        }
        let before = mgr.is_bookmarked(id);
        mgr.toggle_bookmark(id).unwrap();
        mgr.toggle_bookmark(id).unwrap();
        prop_assert_eq!(mgr.is_bookmarked(id), before);
    }

    // A title is present exactly when it was bookmark-toggled an odd number of times,
    // and no title ever appears twice.
    #[test]
    fn membership_parity_and_uniqueness(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mut mgr = fresh();
        let mut toggles: HashMap<u64, usize> = HashMap::new();

        for op in &ops {
            match op {
                Op::Bookmark(id) => {
                    mgr.toggle_bookmark(*id).unwrap();
                    *toggles.entry(*id).or_default() += 1;
                }
                Op::Watched(id) => {
                    mgr.toggle_watched(*id).unwrap();
                }
            }

            let ids: Vec<u64> = mgr.entries().iter().map(|e| e.title_id).collect();
            let unique: HashSet<u64> = ids.iter().copied().collect();
            prop_assert_eq!(ids.len(), unique.len(), "duplicate title in {:?}", ids);
        }

        for id in 0u64..12 {
            let odd = toggles.get(&id).copied().unwrap_or(0) % 2 == 1;
            prop_assert_eq!(mgr.is_bookmarked(id), odd);
        }
    }

    // Watched-toggling a title that isn't bookmarked leaves the list untouched.
    #[test]
    fn toggle_watched_requires_bookmark(
        setup in proptest::collection::vec(0u64..12, 0..20),
        id in 12u64..100,
    ) {
        let mut mgr = fresh();
        for t in setup {
            mgr.toggle_bookmark(t).unwrap();
        }
        let before = mgr.entries().to_vec();
        prop_assert_eq!(mgr.toggle_watched(id).unwrap(), None);
        prop_assert_eq!(mgr.entries(), before.as_slice());
        prop_assert!(!mgr.is_watched(id));
    }
}
