use alloc::vec::Vec;
use core::cmp;

use crate::{InvariantViolation, OffsetModel};

/// An offset model backed by a Fenwick (binary indexed) tree over item extents.
///
/// Point updates and offset lookups are `O(log n)`, so measurement reports never cascade through
/// the rest of the list. Entry reads are `O(log n)` too; windowing code reads the first entry of
/// a window and then accumulates extents, so a render pass stays `O(log n + window)`.
#[derive(Clone, Debug, Default)]
pub struct FenwickTable {
    extents: Vec<u32>,
    tree: Vec<u64>, // 1-indexed
    total: u64,
    max_bit: usize,
    version: u64,
}

impl FenwickTable {
    /// Builds a table by estimating the extent of every item, in order.
    pub fn build<T>(items: &[T], estimate: impl FnMut(&T) -> u32) -> Self {
        Self::from_extents(items.iter().map(estimate))
    }

    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Sum of the first `count` extents.
    fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.extents.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    fn add(&mut self, index: usize, delta: i64) {
        let n = self.extents.len();
        if delta > 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else if delta < 0 {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let cur = self.tree[i] as i128;
            let next = cur + delta as i128;
            debug_assert!(
                next >= 0,
                "Fenwick underflow (idx={i}, cur={cur}, delta={delta})"
            );
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Returns the number of items whose prefix sum is <= `target`, i.e. the index of the first
    /// item ending after `target`.
    fn lower_bound(&self, mut target: u64) -> usize {
        let n = self.extents.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

impl OffsetModel for FenwickTable {
    fn from_extents<I>(extents: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let extents: Vec<u32> = extents.into_iter().collect();
        let n = extents.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for i in 1..=n {
            let v = extents[i - 1] as u64;
            total = total.saturating_add(v);
            tree[i] = tree[i].saturating_add(v);
            let j = i + lsb(i);
            if j <= n {
                tree[j] = tree[j].saturating_add(tree[i]);
            }
        }
        let max_bit = if n == 0 {
            0
        } else {
            highest_power_of_two_leq(n)
        };
        Self {
            extents,
            tree,
            total,
            max_bit,
            version: 0,
        }
    }

    fn len(&self) -> usize {
        self.extents.len()
    }

    fn extent(&self, index: usize) -> Option<u32> {
        self.extents.get(index).copied()
    }

    fn start_of(&self, index: usize) -> Option<u64> {
        (index < self.extents.len()).then(|| self.prefix_sum(index))
    }

    fn total_extent(&self) -> u64 {
        self.total
    }

    fn index_at(&self, offset: u64) -> Option<usize> {
        let last = self.extents.len().checked_sub(1)?;
        Some(self.lower_bound(offset).min(last))
    }

    fn update(&mut self, index: usize, extent: u32) -> i64 {
        let Some(&cur) = self.extents.get(index) else {
            vtrace!(index, len = self.extents.len(), "FenwickTable::update out of bounds");
            return 0;
        };
        if cur == extent {
            return 0;
        }
        let delta = extent as i64 - cur as i64;
        self.extents[index] = extent;
        self.add(index, delta);
        self.version = self.version.wrapping_add(1);
        vtrace!(index, extent, delta, "FenwickTable::update");
        delta
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        // The tree is the only derived state; check every prefix against a running sum.
        let mut expected = 0u64;
        for (index, &extent) in self.extents.iter().enumerate() {
            let start = self.prefix_sum(index);
            if start != expected {
                return Err(InvariantViolation::Discontinuity {
                    index,
                    previous_end: expected,
                    start,
                });
            }
            expected = expected.saturating_add(extent as u64);
        }
        if expected != self.total {
            return Err(InvariantViolation::TotalMismatch {
                expected,
                actual: self.total,
            });
        }
        Ok(())
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
