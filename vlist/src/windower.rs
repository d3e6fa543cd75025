//! Buffer policy and materialization of the renderable subset.

use alloc::vec::Vec;

use crate::resolver;
use crate::{MaterializedItem, OffsetModel, RenderWindow, VisibleRange, WindowState};

/// Widens `visible` by `buffer_count` items on each side, clamped to `[0, len - 1]`.
pub fn expand(visible: VisibleRange, buffer_count: usize, len: usize) -> RenderWindow {
    let last = len.saturating_sub(1);
    RenderWindow {
        start_index: visible.start_index.saturating_sub(buffer_count),
        end_index: visible.end_index.saturating_add(buffer_count).min(last),
        visible,
    }
}

/// Resolves the visible range for `state` and widens it by `state.buffer_count`.
///
/// Returns `None` for an empty model.
pub fn compute_render_window<M: OffsetModel + ?Sized>(
    model: &M,
    state: &WindowState,
) -> Option<RenderWindow> {
    let visible = resolver::visible_range(model, state.scroll_offset, state.viewport_extent)?;
    Some(expand(visible, state.buffer_count, model.len()))
}

/// Calls `f` for every item of `window`, in index order, without allocating.
///
/// `items` and `model` must be index-aligned; indexes past either of them are skipped.
pub fn for_each_materialized<'a, T, K, M>(
    items: &'a [T],
    model: &M,
    window: RenderWindow,
    mut get_key: impl FnMut(&T) -> K,
    mut f: impl FnMut(MaterializedItem<'a, T, K>),
) where
    M: OffsetModel + ?Sized,
{
    debug_assert_eq!(
        items.len(),
        model.len(),
        "items and offset model are not index-aligned"
    );
    let len = items.len().min(model.len());
    if window.start_index >= len {
        return;
    }
    let end = window.end_index.min(len - 1);
    let Some(mut top) = model.start_of(window.start_index) else {
        return;
    };

    for (index, item) in items
        .iter()
        .enumerate()
        .take(end + 1)
        .skip(window.start_index)
    {
        let extent = model.extent(index).unwrap_or(0);
        f(MaterializedItem {
            item,
            key: get_key(item),
            index,
            top,
            extent,
        });
        top = top.saturating_add(extent as u64);
    }
}

/// Zips the items of `window` with their keys and absolute start offsets.
///
/// The result is recomputed from scratch on every call; nothing is patched incrementally.
pub fn materialize<'a, T, K, M>(
    items: &'a [T],
    model: &M,
    window: RenderWindow,
    get_key: impl FnMut(&T) -> K,
) -> Vec<MaterializedItem<'a, T, K>>
where
    M: OffsetModel + ?Sized,
{
    let mut out = Vec::with_capacity(window.len());
    for_each_materialized(items, model, window, get_key, |it| out.push(it));
    out
}
