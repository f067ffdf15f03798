//! Gesture and frame-loop workflows for the `rowpool` crate.
//!
//! The `rowpool` crate is UI-agnostic and focuses on the core layout and
//! pool state. This crate provides the small, framework-neutral pieces a
//! host's frame loop needs on top:
//!
//! - A drag-reorder controller (press-hold pickup, live neighbor swaps,
//!   edge auto-scroll, drag-out deletion with one-level undo)
//! - Exponential position smoothing for the "rows slide to make room" feel
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui
//! bindings). Time flows in as millisecond timestamps through
//! [`ReorderController::tick`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod ease;
mod reorder;

#[cfg(test)]
mod tests;

pub use ease::Smoothing;
pub use reorder::{
    ClickCallback, DeleteCallback, ReadyToDeleteCallback, ReorderController, ReorderOptions,
    UndoCallback,
};
