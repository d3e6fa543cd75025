//! Host-side plumbing for the `vlist` engine.
//!
//! The `vlist` crate is UI-agnostic and only does the offset math. This crate provides the
//! framework-neutral pieces an adapter usually needs around it:
//!
//! - Size probes: turn layout observations of rendered items into measurement messages, once
//!   per change, and stop reporting when items leave the window
//! - Scroll sources: a polling trait plus a latest-value implementation
//! - A controller that wires both into a `VirtualList` and produces frames
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod key;
mod probe;
mod scroll;


pub use controller::{Controller, Frame};
pub use key::ProbeKey;
pub use probe::{ProbeSet, extent_from_layout};
pub use scroll::{ScrollCell, ScrollController};
