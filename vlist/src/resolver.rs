//! Scroll offset → visible index range.
//!
//! All lookups are total: an offset table is a contiguous partition of `[0, total_extent)`, so
//! every in-range offset lands in exactly one item and every out-of-range offset is clamped to
//! the first or last item. Containment is start-inclusive and end-exclusive throughout; the far
//! edge of the viewport is resolved as the item containing `far_edge - 1`.

use core::cell::Cell;

use crate::{OffsetModel, VisibleRange};

/// Default number of steps a hinted scan may take before falling back to binary search.
pub const DEFAULT_SCAN_BUDGET: usize = 16;

/// Returns the index of the item containing `scroll_offset`.
///
/// `scroll_offset <= 0` (or an empty model) yields `0`; `scroll_offset >= total_extent` yields
/// `n - 1`.
pub fn find_start_index<M: OffsetModel + ?Sized>(model: &M, scroll_offset: i64) -> usize {
    // At or before the top, the first item is visible even when it has no extent.
    if scroll_offset <= 0 {
        return 0;
    }
    model.index_at(scroll_offset as u64).unwrap_or(0)
}

/// Returns the index of the item containing the viewport's far edge, never less than
/// `start_index`.
///
/// The far edge is `scroll_offset + viewport_extent`; the returned item `i` satisfies
/// `entry[i].start < far_edge <= entry[i].end`. A far edge beyond `total_extent` yields
/// `n - 1`.
pub fn find_end_index<M: OffsetModel + ?Sized>(
    model: &M,
    start_index: usize,
    scroll_offset: i64,
    viewport_extent: u32,
) -> usize {
    let Some(last) = model.len().checked_sub(1) else {
        return 0;
    };
    let start_index = start_index.min(last);
    let Some(target) = far_edge_target(scroll_offset, viewport_extent) else {
        return start_index;
    };
    model.index_at(target).unwrap_or(last).max(start_index)
}

/// Resolves the visible range for a scroll position. `None` for an empty model.
pub fn visible_range<M: OffsetModel + ?Sized>(
    model: &M,
    scroll_offset: i64,
    viewport_extent: u32,
) -> Option<VisibleRange> {
    if model.is_empty() {
        return None;
    }
    let start_index = find_start_index(model, scroll_offset);
    let end_index = find_end_index(model, start_index, scroll_offset, viewport_extent);
    Some(VisibleRange {
        start_index,
        end_index,
    })
}

/// The last offset covered by the viewport (`far_edge - 1`), or `None` when the viewport lies
/// entirely before the list.
fn far_edge_target(scroll_offset: i64, viewport_extent: u32) -> Option<u64> {
    let far_edge = scroll_offset.saturating_add(viewport_extent as i64);
    u64::try_from(far_edge).ok()?.checked_sub(1)
}

/// A range resolver that remembers where the previous resolution started.
///
/// Continuous scrolling moves the viewport by a few items per event, so scanning outward from
/// the previous start index is usually cheaper than a fresh binary search. The scan is bounded
/// by `scan_budget` steps; larger jumps (e.g. "scroll to item 9000") fall back to binary search.
/// Results are identical to [`visible_range`] in every case.
#[derive(Clone, Debug)]
pub struct RangeResolver {
    hint: Cell<Option<usize>>,
    scan_budget: usize,
}

impl Default for RangeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_BUDGET)
    }
}

impl RangeResolver {
    /// With a `scan_budget` of zero only the hinted item itself is checked before falling back to
    /// binary search.
    pub fn new(scan_budget: usize) -> Self {
        Self {
            hint: Cell::new(None),
            scan_budget,
        }
    }

    pub fn scan_budget(&self) -> usize {
        self.scan_budget
    }

    pub fn set_scan_budget(&mut self, scan_budget: usize) {
        self.scan_budget = scan_budget;
    }

    /// Forgets the previous start index (e.g. after the list was replaced).
    pub fn reset(&self) {
        self.hint.set(None);
    }

    pub fn resolve<M: OffsetModel + ?Sized>(
        &self,
        model: &M,
        scroll_offset: i64,
        viewport_extent: u32,
    ) -> Option<VisibleRange> {
        let last = model.len().checked_sub(1)?;
        let start_index = self.start_index(model, last, scroll_offset);
        let end_index = match far_edge_target(scroll_offset, viewport_extent) {
            None => start_index,
            Some(target) => self
                .scan_forward(model, start_index, last, target)
                .unwrap_or_else(|| model.index_at(target).unwrap_or(last))
                .max(start_index),
        };
        self.hint.set(Some(start_index));
        Some(VisibleRange {
            start_index,
            end_index,
        })
    }

    fn start_index<M: OffsetModel + ?Sized>(
        &self,
        model: &M,
        last: usize,
        scroll_offset: i64,
    ) -> usize {
        if scroll_offset <= 0 {
            return 0;
        }
        let offset = scroll_offset as u64;
        if offset >= model.total_extent() {
            return last;
        }
        if let Some(hint) = self.hint.get() {
            if let Some(found) = self.scan_from(model, hint.min(last), last, offset) {
                return found;
            }
            vtrace!(hint, offset, "RangeResolver: scan budget exhausted");
        }
        model.index_at(offset).unwrap_or(0)
    }

    /// Walks from `index` toward the item containing `offset` (which must be `< total`).
    fn scan_from<M: OffsetModel + ?Sized>(
        &self,
        model: &M,
        mut index: usize,
        last: usize,
        offset: u64,
    ) -> Option<usize> {
        for _ in 0..=self.scan_budget {
            let entry = model.entry(index)?;
            if entry.contains(offset) {
                return Some(index);
            }
            if offset >= entry.end {
                if index == last {
                    return None;
                }
                index += 1;
            } else {
                index = index.checked_sub(1)?;
            }
        }
        None
    }

    /// Walks forward from `start_index` to the item containing `target`.
    fn scan_forward<M: OffsetModel + ?Sized>(
        &self,
        model: &M,
        start_index: usize,
        last: usize,
        target: u64,
    ) -> Option<usize> {
        if target >= model.total_extent() {
            return Some(last);
        }
        let end = start_index.saturating_add(self.scan_budget).min(last);
        for index in start_index..=end {
            if target < model.entry(index)?.end {
                return Some(index);
            }
        }
        (end == last).then_some(last)
    }
}
