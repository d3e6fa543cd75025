//! A headless windowing engine for very large, sequential lists.
//!
//! For host-side plumbing (size probes, scroll sources, a frame controller), see the
//! `vlist-adapter` crate.
//!
//! The engine tracks every item's position along the scroll axis in an offset table, resolves
//! which contiguous index range a scroll offset makes visible, widens that range with a buffer
//! of extra items on each side, and repairs positions when an item's real extent is measured
//! after it has been drawn.
//!
//! Three sizing strategies share one model:
//! - uniform items (every item has the same extent),
//! - precomputed items (extents are known up front, per item),
//! - measured items (extents are estimated, then corrected by measurement reports).
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport extent
//! - scroll offsets as they change
//! - measured extents of rendered items (for the measured strategy)
//!
//! ```rust
//! use vlist::{VListOptions, VirtualList};
//!
//! let items: Vec<u32> = (0..5).collect();
//! let options = VListOptions::new(|item: &u32| *item)
//!     .with_uniform_extent(20)
//!     .with_viewport_extent(50)
//!     .with_buffer_count(0);
//! let list: VirtualList<u32, u32> = VirtualList::new(items, options);
//!
//! let window = list.render_window().unwrap();
//! assert_eq!((window.start_index, window.end_index), (0, 2));
//! assert_eq!(list.total_extent(), 100);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod list;
mod model;
mod options;
pub mod resolver;
mod table;
mod types;
pub mod windower;


pub use error::InvariantViolation;
pub use fenwick::FenwickTable;
pub use list::VirtualList;
pub use model::OffsetModel;
pub use options::{ExtentFn, KeyFn, Sizing, VListOptions, WindowConfig};
pub use resolver::RangeResolver;
pub use table::OffsetTable;
pub use types::{
    Align, MaterializedItem, Measurement, OffsetEntry, RenderWindow, VisibleRange, WindowState,
};
