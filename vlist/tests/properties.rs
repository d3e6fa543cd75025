//! Property-based invariant tests for offset tables and range resolution.
//!
//! These hold for any extent list, scroll offset and viewport:
//!
//! 1. Built and updated tables are contiguous partitions of `[0, total)`.
//! 2. An update shifts later entries by exactly its returned delta.
//! 3. The visible range covers the viewport and nothing outside it.
//! 4. The render window is a superset of the visible range, clamped to the list.
//! 5. Flat and Fenwick models resolve identically.
//! 6. The hinted resolver agrees with a fresh binary search.

use proptest::prelude::*;
use vlist::resolver::{self, RangeResolver};
use vlist::windower;
use vlist::{FenwickTable, OffsetModel, OffsetTable, WindowState};

// ── Helpers ─────────────────────────────────────────────────────────────

fn extent_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0u32),
        8 => 1u32..=200,
    ]
}

fn extents(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(extent_strategy(), 1..=max_len)
}

fn updates(max_len: usize) -> impl Strategy<Value = Vec<(usize, u32)>> {
    proptest::collection::vec((0..max_len, 0u32..=300), 0..=20)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Table invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tables_stay_contiguous_under_updates(
        extents in extents(80),
        updates in updates(100),
    ) {
        let mut table = OffsetTable::from_extents(extents.iter().copied());
        prop_assert_eq!(table.validate(), Ok(()));
        for (index, extent) in updates {
            table.update(index, extent);
            prop_assert_eq!(table.validate(), Ok(()));
            prop_assert_eq!(table.entries()[0].start, 0);
            prop_assert_eq!(table.total_extent(), table.entries().last().unwrap().end);
        }
    }

    #[test]
    fn update_shifts_later_entries_by_delta(
        extents in extents(80),
        pick in any::<prop::sample::Index>(),
        extent in 0u32..=300,
    ) {
        let mut table = OffsetTable::from_extents(extents.iter().copied());
        let before = table.clone();
        let index = pick.index(extents.len());

        let delta = table.update(index, extent);
        prop_assert_eq!(delta, extent as i64 - extents[index] as i64);
        for i in 0..extents.len() {
            let (new, old) = (table.entries()[i], before.entries()[i]);
            if i < index {
                prop_assert_eq!(new, old);
            } else if i > index {
                prop_assert_eq!(new.start as i64, old.start as i64 + delta);
            }
        }

        // Reapplying the same extent changes nothing.
        let once = table.clone();
        prop_assert_eq!(table.update(index, extent), 0);
        prop_assert_eq!(table, once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Resolution and windowing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visible_range_covers_viewport(
        extents in extents(80),
        scroll in -500i64..=20_000,
        viewport in 1u32..=1_000,
    ) {
        let table = OffsetTable::from_extents(extents.iter().copied());
        let total = table.total_extent() as i64;
        let range = resolver::visible_range(&table, scroll, viewport).unwrap();
        prop_assert!(range.start_index <= range.end_index);
        prop_assert!(range.end_index < extents.len());

        let first = table.entries()[range.start_index];
        let last = table.entries()[range.end_index];
        let view_start = scroll.clamp(0, total);
        let view_end = (scroll + viewport as i64).clamp(0, total);
        if view_start < view_end {
            // Every covered offset lies inside [first.start, last.end).
            prop_assert!(first.start as i64 <= view_start);
            prop_assert!(last.end as i64 >= view_end);
        }
        if scroll > 0 && scroll + (viewport as i64) <= total {
            // Nothing outside the viewport is included.
            prop_assert!((first.end as i64) > scroll);
            prop_assert!((last.start as i64) < scroll + viewport as i64);
        }
    }

    #[test]
    fn render_window_is_clamped_superset(
        extents in extents(80),
        scroll in -500i64..=20_000,
        viewport in 0u32..=1_000,
        buffer in 0usize..=10,
    ) {
        let table = OffsetTable::from_extents(extents.iter().copied());
        let state = WindowState {
            scroll_offset: scroll,
            viewport_extent: viewport,
            buffer_count: buffer,
        };
        let window = windower::compute_render_window(&table, &state).unwrap();
        let visible = window.visible;

        prop_assert_eq!(window.start_index, visible.start_index.saturating_sub(buffer));
        prop_assert_eq!(window.end_index, (visible.end_index + buffer).min(extents.len() - 1));
        for index in visible.indexes() {
            prop_assert!(window.contains(index));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Interchangeable strategies
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flat_and_fenwick_resolve_identically(
        extents in extents(120),
        updates in updates(120),
        scroll in -200i64..=30_000,
        viewport in 0u32..=2_000,
    ) {
        let mut flat = OffsetTable::from_extents(extents.iter().copied());
        let mut tree = FenwickTable::from_extents(extents.iter().copied());
        for (index, extent) in updates {
            prop_assert_eq!(flat.update(index, extent), tree.update(index, extent));
        }
        prop_assert_eq!(flat.total_extent(), tree.total_extent());
        prop_assert_eq!(
            resolver::visible_range(&flat, scroll, viewport),
            resolver::visible_range(&tree, scroll, viewport)
        );
    }

    #[test]
    fn hinted_resolver_matches_binary_search(
        extents in extents(200),
        scrolls in proptest::collection::vec(-300i64..=40_000, 1..=30),
        viewport in 0u32..=1_500,
        budget in 0usize..=32,
    ) {
        let table = OffsetTable::from_extents(extents.iter().copied());
        let hinted = RangeResolver::new(budget);
        for scroll in scrolls {
            prop_assert_eq!(
                hinted.resolve(&table, scroll, viewport),
                resolver::visible_range(&table, scroll, viewport)
            );
        }
    }
}
