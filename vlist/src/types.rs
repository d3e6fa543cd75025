use core::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Position of one item along the scroll axis.
///
/// `end == start + extent` always holds for entries produced by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetEntry {
    pub start: u64,
    pub extent: u32,
    pub end: u64,
}

impl OffsetEntry {
    pub fn new(start: u64, extent: u32) -> Self {
        Self {
            start,
            extent,
            end: start.saturating_add(extent as u64),
        }
    }

    /// Start-inclusive, end-exclusive containment. Zero-extent entries contain nothing.
    pub fn contains(&self, offset: u64) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// The minimal index span whose items overlap the viewport. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleRange {
    /// Both ends are inclusive, so a well-formed span holds at least one item. Only a
    /// hand-built span with `start_index > end_index` is empty.
    pub fn is_empty(&self) -> bool {
        self.start_index > self.end_index
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// The visible range widened by the buffer on each side and clamped to the list. Both ends are
/// inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub start_index: usize,
    pub end_index: usize,
    /// The strictly visible range this window was expanded from.
    pub visible: VisibleRange,
}

impl RenderWindow {
    pub fn is_empty(&self) -> bool {
        self.start_index > self.end_index
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// Scroll position, viewport extent and buffer size used to resolve a render window.
///
/// `scroll_offset` is signed because hosts may report transient out-of-range values (e.g. an
/// overscroll bounce); resolution clamps it.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub scroll_offset: i64,
    pub viewport_extent: u32,
    pub buffer_count: usize,
}

/// A measured extent reported by a host for the item at `index`.
///
/// `generation` is the list generation the item was rendered under (see
/// [`crate::VirtualList::generation`]). Reports from an older generation are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub index: usize,
    pub extent: u32,
    pub generation: u64,
}

/// One renderable entry: the item, its key and its absolute position along the axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterializedItem<'a, T, K> {
    pub item: &'a T,
    pub key: K,
    pub index: usize,
    /// Absolute start offset along the scroll axis.
    pub top: u64,
    pub extent: u32,
}

impl<T, K> MaterializedItem<'_, T, K> {
    pub fn end(&self) -> u64 {
        self.top.saturating_add(self.extent as u64)
    }
}
