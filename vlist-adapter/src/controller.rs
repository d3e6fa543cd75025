use alloc::vec::Vec;

use vlist::{
    Align, MaterializedItem, OffsetModel, OffsetTable, RenderWindow, VListOptions, VirtualList,
};

use crate::{ProbeKey, ProbeSet, ScrollController};

/// Everything a host needs to draw one frame.
#[derive(Clone, Debug)]
pub struct Frame<'a, T, K> {
    /// Size of the scroll track.
    pub total_extent: u64,
    /// `None` when the list is empty.
    pub window: Option<RenderWindow>,
    /// Items to render, in index order, with their absolute start offsets.
    pub items: Vec<MaterializedItem<'a, T, K>>,
}

/// A framework-neutral controller that wraps a [`VirtualList`] and its size probes.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_extent` / `on_scroll` (or `poll_scroll`) when UI events occur
/// - `on_layout` after laying out a rendered item
/// - `frame()` to get the items to draw
///
/// `frame()` also keeps the probe set in step with the render window, so items that scroll out
/// of view stop reporting.
#[derive(Clone, Debug)]
pub struct Controller<T, K, M = OffsetTable> {
    list: VirtualList<T, K, M>,
    probes: ProbeSet<K>,
}

impl<T, K: ProbeKey> Controller<T, K> {
    /// Creates a controller over a list backed by the flat [`OffsetTable`].
    pub fn new(items: Vec<T>, options: VListOptions<T, K>) -> Self {
        Self::from_list(VirtualList::new(items, options))
    }
}

impl<T, K, M> Controller<T, K, M>
where
    K: ProbeKey,
    M: OffsetModel,
{
    /// Creates a controller over a list backed by offset model `M`.
    pub fn with_model(items: Vec<T>, options: VListOptions<T, K>) -> Self {
        Self::from_list(VirtualList::with_model(items, options))
    }

    pub fn from_list(list: VirtualList<T, K, M>) -> Self {
        Self {
            list,
            probes: ProbeSet::new(),
        }
    }

    pub fn list(&self) -> &VirtualList<T, K, M> {
        &self.list
    }

    /// Direct access to the list. Replacing items through this bypasses probe invalidation;
    /// prefer [`Self::set_items`].
    pub fn list_mut(&mut self) -> &mut VirtualList<T, K, M> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList<T, K, M> {
        self.list
    }

    pub fn probes(&self) -> &ProbeSet<K> {
        &self.probes
    }

    pub fn on_viewport_extent(&mut self, viewport_extent: u32) {
        self.list.set_viewport_extent(viewport_extent);
    }

    /// Call this when the UI reports a scroll offset change.
    pub fn on_scroll(&mut self, scroll_offset: i64) {
        self.list.set_scroll_offset(scroll_offset);
    }

    /// Pulls the latest offset from `source`. Returns whether it changed.
    pub fn poll_scroll(&mut self, mut source: impl ScrollController) -> bool {
        match source.poll_offset() {
            Some(offset) => {
                self.on_scroll(offset);
                true
            }
            None => false,
        }
    }

    /// Feeds a layout observation for a mounted item into the offset table.
    ///
    /// Returns the change of the total extent (`0` for repeated, detached or stale reports).
    pub fn on_layout(&mut self, key: &K, size: f32) -> i64 {
        match self.probes.observe_layout(key, size) {
            Some(measurement) => self.list.apply_measurement(measurement),
            None => 0,
        }
    }

    /// Like [`Self::on_layout`], for hosts that already measure in whole units.
    pub fn on_measure(&mut self, key: &K, extent: u32) -> i64 {
        match self.probes.observe(key, extent) {
            Some(measurement) => self.list.apply_measurement(measurement),
            None => 0,
        }
    }

    /// Supplies a new item list. Probes are dropped when the list's identity changed.
    pub fn set_items(&mut self, items: Vec<T>) {
        let generation = self.list.generation();
        self.list.set_items(items);
        if self.list.generation() != generation {
            adebug!(
                generation = self.list.generation(),
                "item identity changed, probes cleared"
            );
            self.probes.clear();
        }
    }

    /// Resolves the current window, re-syncs probes with it and materializes it.
    pub fn frame(&mut self) -> Frame<'_, T, K> {
        let window = self.list.render_window();
        let generation = self.list.generation();
        let keys = self.list.keys();
        let mounted = window
            .into_iter()
            .flat_map(|w| w.indexes())
            .filter_map(|index| keys.get(index).map(|key| (key.clone(), index)));
        self.probes.sync(mounted, generation);

        Frame {
            total_extent: self.list.total_extent(),
            window,
            items: self.list.materialize(),
        }
    }

    /// Computes and applies a scroll-to-index immediately. Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        self.list.scroll_to_index(index, align)
    }
}
