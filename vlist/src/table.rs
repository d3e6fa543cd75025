use alloc::vec::Vec;

use crate::{InvariantViolation, OffsetEntry, OffsetModel, RenderWindow};

/// A flat offset table: one `(start, extent, end)` entry per item.
///
/// Updates cascade: changing the extent of item `i` rewrites the start/end of every item after
/// it. That is linear in `n - i`, which is fine for lists of a few thousand items that are
/// remeasured occasionally. For heavy measurement traffic, use [`crate::FenwickTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetTable {
    entries: Vec<OffsetEntry>,
    version: u64,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table by estimating the extent of every item, in order.
    pub fn build<T>(items: &[T], estimate: impl FnMut(&T) -> u32) -> Self {
        Self::from_extents(items.iter().map(estimate))
    }

    /// Builds a table of `count` items that all share `extent`.
    pub fn uniform(count: usize, extent: u32) -> Self {
        Self::from_extents(core::iter::repeat_n(extent, count))
    }

    /// Restores a table from raw entries (e.g. a deserialized snapshot).
    ///
    /// Fails if the entries do not form a contiguous partition starting at zero.
    pub fn from_entries(entries: Vec<OffsetEntry>) -> Result<Self, InvariantViolation> {
        let table = Self {
            entries,
            version: 0,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&OffsetEntry> {
        self.entries.get(index)
    }

    /// The entries covered by `window`, clamped to the table.
    pub fn window_entries(&self, window: RenderWindow) -> &[OffsetEntry] {
        let end = window.end_index.saturating_add(1).min(self.entries.len());
        let start = window.start_index.min(end);
        &self.entries[start..end]
    }

    pub fn into_entries(self) -> Vec<OffsetEntry> {
        self.entries
    }
}

impl OffsetModel for OffsetTable {
    fn from_extents<I>(extents: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let extents = extents.into_iter();
        let mut entries = Vec::with_capacity(extents.size_hint().0);
        let mut offset = 0u64;
        for extent in extents {
            let entry = OffsetEntry::new(offset, extent);
            offset = entry.end;
            entries.push(entry);
        }
        Self {
            entries,
            version: 0,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn extent(&self, index: usize) -> Option<u32> {
        self.entries.get(index).map(|e| e.extent)
    }

    fn start_of(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(|e| e.start)
    }

    fn entry(&self, index: usize) -> Option<OffsetEntry> {
        self.entries.get(index).copied()
    }

    fn total_extent(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.end)
    }

    fn index_at(&self, offset: u64) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        // First entry whose end lies past `offset`; zero-extent entries are skipped.
        let index = self.entries.partition_point(|e| e.end <= offset);
        Some(index.min(last))
    }

    fn update(&mut self, index: usize, extent: u32) -> i64 {
        let Some(entry) = self.entries.get_mut(index) else {
            vtrace!(index, len = self.entries.len(), "OffsetTable::update out of bounds");
            return 0;
        };
        if entry.extent == extent {
            return 0;
        }

        let delta = extent as i64 - entry.extent as i64;
        *entry = OffsetEntry::new(entry.start, extent);
        let mut offset = entry.end;
        for next in &mut self.entries[index + 1..] {
            *next = OffsetEntry::new(offset, next.extent);
            offset = next.end;
        }
        self.version = self.version.wrapping_add(1);
        vtrace!(index, extent, delta, "OffsetTable::update");
        debug_assert!(self.validate().is_ok(), "cascade left a broken table");
        delta
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        let mut previous_end = 0u64;
        for (index, entry) in self.entries.iter().enumerate() {
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
            if entry.end != entry.start.saturating_add(entry.extent as u64) {
                return Err(InvariantViolation::ExtentMismatch {
                    index,
                    start: entry.start,
                    extent: entry.extent,
                    end: entry.end,
                });
            }
            previous_end = entry.end;
        }
        Ok(())
    }
}
