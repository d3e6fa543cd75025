use crate::{InvariantViolation, OffsetEntry};

/// Per-item position bookkeeping along the scroll axis.
///
/// Implementations keep a contiguous partition of `[0, total_extent())`: item `0` starts at
/// zero, every item starts where the previous one ends, and no caller input can break that.
/// Everything above this trait (range resolution, windowing, [`crate::VirtualList`]) is generic
/// over it, so the repair strategy can be swapped:
///
/// - [`crate::OffsetTable`] stores explicit `(start, extent, end)` triples and cascades every
///   update forward (`O(n - index)` per update, `O(1)` per entry read).
/// - [`crate::FenwickTable`] stores extents in a prefix-sum tree (`O(log n)` per update and
///   per entry read).
pub trait OffsetModel {
    /// Builds a model from per-item extents, in item order.
    fn from_extents<I>(extents: I) -> Self
    where
        I: IntoIterator<Item = u32>,
        Self: Sized;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extent(&self, index: usize) -> Option<u32>;

    fn start_of(&self, index: usize) -> Option<u64>;

    fn entry(&self, index: usize) -> Option<OffsetEntry> {
        let start = self.start_of(index)?;
        let extent = self.extent(index)?;
        Some(OffsetEntry::new(start, extent))
    }

    /// `0` for an empty model, else the end of the last entry.
    fn total_extent(&self) -> u64;

    /// Returns the index of the item containing `offset` (start-inclusive, end-exclusive),
    /// clamped to `n - 1` when `offset >= total_extent()`.
    ///
    /// Returns `None` only for an empty model.
    fn index_at(&self, offset: u64) -> Option<usize>;

    /// Records a new extent for `index` and shifts every later item by the difference.
    ///
    /// Returns the signed change of `total_extent()`; `0` when the extent is unchanged or the
    /// index is out of bounds.
    fn update(&mut self, index: usize, extent: u32) -> i64;

    /// Bumped on every update that changed the model.
    fn version(&self) -> u64;

    /// Re-derives every entry and checks the partition invariants.
    fn validate(&self) -> Result<(), InvariantViolation> {
        let mut previous_end = 0u64;
        for index in 0..self.len() {
            let Some(entry) = self.entry(index) else {
                break;
            };
            if index == 0 && entry.start != 0 {
                return Err(InvariantViolation::NonZeroOrigin { start: entry.start });
            }
            if entry.start != previous_end {
                return Err(InvariantViolation::Discontinuity {
                    index,
                    previous_end,
                    start: entry.start,
                });
            }
            previous_end = entry.end;
        }
        if previous_end != self.total_extent() {
            return Err(InvariantViolation::TotalMismatch {
                expected: previous_end,
                actual: self.total_extent(),
            });
        }
        Ok(())
    }
}
