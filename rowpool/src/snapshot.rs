use alloc::vec::Vec;

use crate::holder::Holder;

/// A wholesale copy of the bound list state.
///
/// Captured immediately before a destructive operation and held as the
/// one-level undo buffer; [`crate::ListContainer::restore`] re-derives row
/// extents and layout from it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<T> {
    pub(crate) items: Vec<T>,
    pub(crate) holders: Vec<Holder>,
}

impl<T> Snapshot<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
