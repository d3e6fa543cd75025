use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::resolver::RangeResolver;
use crate::windower;
use crate::{
    Align, InvariantViolation, MaterializedItem, Measurement, OffsetEntry, OffsetModel,
    OffsetTable, RenderWindow, VListOptions, VisibleRange, WindowState,
};

/// A headless virtual list.
///
/// This type owns the item list, its offset table and the most recently reported scroll
/// offset. It holds no UI objects: the host reports scroll offsets and measured extents, then
/// asks for the items to render (`for_each_rendered` / `materialize`) and for the scrollable
/// extent (`total_extent`).
///
/// Every mutating call finishes its whole state transition (including the cascading repair of
/// the offset table) before returning, so the next query always sees a consistent table.
///
/// `M` selects the offset bookkeeping strategy; see [`OffsetModel`].
#[derive(Clone, Debug)]
pub struct VirtualList<T, K, M = OffsetTable> {
    options: VListOptions<T, K>,
    items: Vec<T>,
    keys: Vec<K>,
    table: M,
    measured: Vec<bool>,
    scroll_offset: i64,
    generation: u64,
    resolver: RangeResolver,
}

impl<T, K> VirtualList<T, K>
where
    K: Clone + PartialEq,
{
    /// Creates a list backed by the flat [`OffsetTable`].
    pub fn new(items: Vec<T>, options: VListOptions<T, K>) -> Self {
        Self::with_model(items, options)
    }
}

impl<T, K, M> VirtualList<T, K, M>
where
    K: Clone + PartialEq,
    M: OffsetModel,
{
    /// Creates a list backed by offset model `M`, e.g. `VirtualList::<_, _, FenwickTable>`.
    pub fn with_model(items: Vec<T>, options: VListOptions<T, K>) -> Self {
        let keys = items.iter().map(&*options.get_item_key).collect();
        let table = M::from_extents(items.iter().map(|item| options.extent_of(item)));
        vdebug!(
            len = items.len(),
            sizing = ?options.sizing,
            viewport_extent = options.config.viewport_extent,
            buffer_count = options.config.buffer_count,
            "VirtualList::with_model"
        );
        Self {
            measured: alloc::vec![false; items.len()],
            resolver: RangeResolver::new(options.scan_budget),
            options,
            items,
            keys,
            table,
            scroll_offset: 0,
            generation: 0,
        }
    }

    pub fn options(&self) -> &VListOptions<T, K> {
        &self.options
    }

    /// Replaces the options, rebuilding the offset table only when item identity or sizing
    /// changed.
    pub fn set_options(&mut self, options: VListOptions<T, K>) {
        let keys_unchanged = Arc::ptr_eq(&self.options.get_item_key, &options.get_item_key);
        let sizing_unchanged = self.options.sizing.same_as(&options.sizing)
            && self.options.config.estimate_extent == options.config.estimate_extent;
        self.options = options;
        self.resolver.set_scan_budget(self.options.scan_budget);
        vtrace!(keys_unchanged, sizing_unchanged, "VirtualList::set_options");

        if !keys_unchanged {
            self.keys = self.compute_keys(&self.items);
            self.rebuild();
        } else if !sizing_unchanged {
            self.rebuild();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VListOptions<T, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn table(&self) -> &M {
        &self.table
    }

    /// Identifies the current item list. Bumped whenever the offset table is rebuilt, so
    /// measurements taken under an older generation can be recognized and dropped.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Supplies a new item list.
    ///
    /// If the key sequence is unchanged and items are measured, the offset table (with its
    /// measurements) is kept and only the item values are replaced. Any other change (length,
    /// keys, order) invalidates the whole table: it is rebuilt from estimates and the
    /// generation is bumped.
    pub fn set_items(&mut self, items: Vec<T>) {
        let keys = self.compute_keys(&items);
        let same_identity = keys == self.keys;
        self.items = items;
        self.keys = keys;
        if same_identity && self.options.sizing.accepts_measurements() {
            vtrace!(len = self.items.len(), "set_items: identity unchanged");
            return;
        }
        self.rebuild();
    }

    fn compute_keys(&self, items: &[T]) -> Vec<K> {
        items.iter().map(&*self.options.get_item_key).collect()
    }

    fn rebuild(&mut self) {
        self.table = M::from_extents(self.items.iter().map(|item| self.options.extent_of(item)));
        self.measured.clear();
        self.measured.resize(self.items.len(), false);
        self.generation = self.generation.wrapping_add(1);
        self.resolver.reset();
        vdebug!(
            len = self.items.len(),
            generation = self.generation,
            total_extent = self.table.total_extent(),
            "rebuild"
        );
    }

    pub fn viewport_extent(&self) -> u32 {
        self.options.config.viewport_extent
    }

    pub fn set_viewport_extent(&mut self, viewport_extent: u32) {
        self.options.config.viewport_extent = viewport_extent;
    }

    pub fn buffer_count(&self) -> usize {
        self.options.config.buffer_count
    }

    pub fn set_buffer_count(&mut self, buffer_count: usize) {
        self.options.config.buffer_count = buffer_count;
    }

    /// The most recently reported scroll offset, as reported (not clamped).
    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    /// Records the host's latest scroll offset. Out-of-range values are accepted and clamped
    /// during resolution.
    pub fn set_scroll_offset(&mut self, scroll_offset: i64) {
        vtrace!(scroll_offset, "set_scroll_offset");
        self.scroll_offset = scroll_offset;
    }

    /// Records the host's latest scroll offset, clamped into `[0, max_scroll_offset()]`.
    pub fn set_scroll_offset_clamped(&mut self, scroll_offset: i64) {
        let clamped = self.clamp_scroll_offset(scroll_offset);
        self.set_scroll_offset(i64::try_from(clamped).unwrap_or(i64::MAX));
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_extent()
            .saturating_sub(self.options.config.viewport_extent as u64)
    }

    pub fn clamp_scroll_offset(&self, scroll_offset: i64) -> u64 {
        u64::try_from(scroll_offset)
            .unwrap_or(0)
            .min(self.max_scroll_offset())
    }

    /// Returns a snapshot of scroll offset, viewport extent and buffer size.
    pub fn window_state(&self) -> WindowState {
        WindowState {
            scroll_offset: self.scroll_offset,
            viewport_extent: self.options.config.viewport_extent,
            buffer_count: self.options.config.buffer_count,
        }
    }

    /// Restores a snapshot previously taken with [`Self::window_state`].
    pub fn restore_window_state(&mut self, state: WindowState) {
        self.options.config.viewport_extent = state.viewport_extent;
        self.options.config.buffer_count = state.buffer_count;
        self.set_scroll_offset(state.scroll_offset);
    }

    /// Records the true extent of `items[index]` and repairs every later offset.
    ///
    /// Returns the change of `total_extent()`. Ignored (returning `0`) when the index is out of
    /// bounds or the sizing strategy does not accept measurements.
    pub fn measure(&mut self, index: usize, extent: u32) -> i64 {
        if !self.options.sizing.accepts_measurements() {
            vdebug!(index, extent, "measure ignored: sizing is not measured");
            return 0;
        }
        if index >= self.items.len() {
            vtrace!(index, len = self.items.len(), "measure out of bounds");
            return 0;
        }
        self.measured[index] = true;
        self.table.update(index, extent)
    }

    /// Applies a host measurement report, dropping it if it was taken under an older
    /// generation.
    pub fn apply_measurement(&mut self, measurement: Measurement) -> i64 {
        if measurement.generation != self.generation {
            vdebug!(
                index = measurement.index,
                stale = measurement.generation,
                current = self.generation,
                "dropping stale measurement"
            );
            return 0;
        }
        self.measure(measurement.index, measurement.extent)
    }

    /// Applies several measurements in order. Returns the summed change of `total_extent()`.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let mut delta = 0i64;
        for (index, extent) in measurements {
            delta = delta.saturating_add(self.measure(index, extent));
        }
        delta
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// The scrollable extent the host should size its scroll track to.
    pub fn total_extent(&self) -> u64 {
        self.table.total_extent()
    }

    pub fn item_entry(&self, index: usize) -> Option<OffsetEntry> {
        self.table.entry(index)
    }

    pub fn index_at_offset(&self, offset: i64) -> Option<usize> {
        let offset = u64::try_from(offset).unwrap_or(0);
        self.table.index_at(offset)
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.scroll_offset, self.options.config.viewport_extent)
    }

    pub fn visible_range_for(
        &self,
        scroll_offset: i64,
        viewport_extent: u32,
    ) -> Option<VisibleRange> {
        self.resolver
            .resolve(&self.table, scroll_offset, viewport_extent)
    }

    /// The visible range widened by the buffer. `None` when the list is empty.
    pub fn render_window(&self) -> Option<RenderWindow> {
        let visible = self.visible_range()?;
        Some(windower::expand(
            visible,
            self.options.config.buffer_count,
            self.table.len(),
        ))
    }

    /// Calls `f` for every item in the render window, in index order, without allocating.
    pub fn for_each_rendered<'a>(&'a self, f: impl FnMut(MaterializedItem<'a, T, K>)) {
        let Some(window) = self.render_window() else {
            return;
        };
        let get_key = &self.options.get_item_key;
        windower::for_each_materialized(
            &self.items,
            &self.table,
            window,
            |item| get_key(item),
            f,
        );
    }

    /// Collects the render window into `out` (clears `out` first).
    ///
    /// For maximum performance, prefer `for_each_rendered` or reuse `out` across frames.
    pub fn collect_rendered<'a>(&'a self, out: &mut Vec<MaterializedItem<'a, T, K>>) {
        out.clear();
        self.for_each_rendered(|it| out.push(it));
    }

    pub fn materialize(&self) -> Vec<MaterializedItem<'_, T, K>> {
        let mut out = Vec::new();
        self.collect_rendered(&mut out);
        out
    }

    /// Computes the (clamped) scroll offset that brings `index` into view.
    ///
    /// Out-of-range indexes are clamped to the last item. Returns `0` for an empty list.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let Some(last) = self.table.len().checked_sub(1) else {
            return 0;
        };
        let Some(entry) = self.table.entry(index.min(last)) else {
            return 0;
        };
        let view = self.options.config.viewport_extent as u64;

        let target = match align {
            Align::Start => entry.start,
            Align::End => entry.end.saturating_sub(view),
            Align::Center => {
                let center = entry.start.saturating_add(entry.extent as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.clamp_scroll_offset(self.scroll_offset);
                let cur_end = cur.saturating_add(view);
                if entry.start >= cur && entry.end <= cur_end {
                    cur
                } else if entry.start < cur {
                    entry.start
                } else {
                    entry.end.saturating_sub(view)
                }
            }
        };

        target.min(self.max_scroll_offset())
    }

    /// Programmatically scrolls to an index. Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(i64::try_from(offset).unwrap_or(i64::MAX));
        offset
    }

    /// Re-checks the offset table against its invariants.
    ///
    /// A failure means internal corruption; windows resolved from this list are not
    /// trustworthy until the items are supplied again.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let result = if self.table.len() != self.items.len() {
            Err(InvariantViolation::LengthMismatch {
                items: self.items.len(),
                entries: self.table.len(),
            })
        } else {
            self.table.validate()
        };
        if let Err(_err) = &result {
            vwarn!(err = %_err, generation = self.generation, "offset table invariant violated");
        }
        result
    }
}
