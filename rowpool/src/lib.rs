//! A headless recycled-row list engine.
//!
//! For gesture-level workflows (drag reorder, auto-scroll, undo), see the
//! `rowpool-adapter` crate.
//!
//! This crate focuses on the core state needed to display arbitrary-length
//! collections through a small pool of row holders: stacked layout over
//! prefix sums of per-item extents, offset → row lookup, and a sliding
//! window that re-binds the holder leaving the visible area to the item
//! entering on the opposite edge.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport geometry (extent on both axes)
//! - scroll offsets
//! - a row template extent and, optionally, per-item extent capabilities
//! - rendering from holder positions, via the bind/change callbacks
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod fenwick;
mod holder;
mod item;
mod options;
mod snapshot;
mod types;
mod window;


pub use container::ListContainer;
pub use holder::Holder;
pub use item::ListItem;
pub use options::{BindCallback, ListOptions, OnChangeCallback, OrderChangedCallback};
pub use snapshot::Snapshot;
pub use types::{ItemKey, Point, Rect, ScrollDirection, TextStyle};
pub use window::VirtualWindow;
