use alloc::vec::Vec;

use crate::container::ListContainer;
use crate::item::ListItem;
use crate::options::ListOptions;
use crate::{ItemKey, Rect, ScrollDirection};

/// A bounded sliding window of holders over a much larger collection.
///
/// Wraps a [`ListContainer`] and keeps a fixed-size prefix of its pool
/// synchronized with the scroll offset: the holder leaving the visible area
/// is re-bound to the item entering on the opposite edge, so per-frame cost
/// is O(rows crossing the boundary) and memory stays O(window) regardless
/// of collection size.
///
/// The window assumes the uniform template extent
/// ([`ListOptions::row_extent`]) on the scrolled axis.
///
/// Within a frame, hosts must apply [`Self::on_scroll`] before any holder
/// easing, since easing depends on up-to-date row bindings.
#[derive(Clone, Debug)]
pub struct VirtualWindow<T, K = ItemKey> {
    list: ListContainer<T, K>,
    cell_index: usize,
    window_len: usize,
    prev_offset: u64,
    direction: Option<ScrollDirection>,
}

impl<T: ListItem, K> VirtualWindow<T, K> {
    /// Creates a window over a fresh container. Set the viewport (via
    /// `ListOptions::initial_rect` or [`Self::resize_viewport`]) before the
    /// first `set_items`; window sizing derives from it.
    pub fn new(options: ListOptions<T, K>) -> Self {
        Self {
            list: ListContainer::new(options),
            cell_index: 0,
            window_len: 0,
            prev_offset: 0,
            direction: None,
        }
    }

    pub fn from_container(list: ListContainer<T, K>) -> Self {
        Self {
            list,
            cell_index: 0,
            window_len: 0,
            prev_offset: 0,
            direction: None,
        }
    }

    pub fn list(&self) -> &ListContainer<T, K> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListContainer<T, K> {
        &mut self.list
    }

    pub fn into_list(self) -> ListContainer<T, K> {
        self.list
    }

    /// First item index currently represented in the window.
    pub fn cell_index(&self) -> usize {
        self.cell_index
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Replaces the collection and re-derives the window.
    ///
    /// Prefix sums cover every item, so `total_size()` spans the whole
    /// collection while only `window_len` holders are bound. A collection
    /// shorter than the window degrades to plain container behavior.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.list.replace_items(items);
        self.window_len = self.derive_window_len();
        self.cell_index = 0;
        rdebug!(
            count = self.list.len(),
            window = self.window_len,
            "VirtualWindow::set_items"
        );
        self.list.bind_window(0, self.window_len);
        self.prev_offset = self.list.scroll_offset();
        self.direction = None;
        self.list.notify();
    }

    /// Re-derives the window for new viewport geometry and reinitializes it.
    pub fn resize_viewport(&mut self, rect: Rect) {
        self.list.set_viewport_rect(rect);
        self.window_len = self.derive_window_len();
        self.cell_index = self
            .cell_index
            .min(self.list.len().saturating_sub(self.window_len));
        self.list.bind_window(self.cell_index, self.window_len);
        self.list.notify();
    }

    /// Applies a new scroll offset and recycles boundary holders.
    ///
    /// Scrolling forward re-binds leading holders to trailing items;
    /// backward is symmetric. A zero delta is a no-op.
    pub fn on_scroll(&mut self, offset: u64) {
        let offset = self.list.clamp_scroll_offset(offset);
        if offset == self.prev_offset {
            return;
        }
        let forward = offset > self.prev_offset;
        self.direction = Some(if forward {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        });
        self.list.set_scroll_offset_quiet(offset);
        if forward {
            self.recycle_forward();
        } else {
            self.recycle_backward();
        }
        self.prev_offset = offset;
        self.list.notify();
    }

    fn derive_window_len(&self) -> usize {
        let row = self.list.options().row_extent.max(1) as u64;
        let view = self.list.viewport_size() as u64;
        let visible = view.div_ceil(row) as usize;
        (visible + self.list.options().overscan).min(self.list.len())
    }

    fn recycle_forward(&mut self) {
        let count = self.list.len();
        let row = self.list.options().row_extent.max(1) as u64;
        let mut prev_first = None;
        loop {
            if self.window_len == 0 {
                break;
            }
            let Some(first) = self.list.holders().first() else {
                break;
            };
            if !first.active() {
                break;
            }
            let first_target = first.target();
            if self.list.scroll_offset().saturating_sub(first_target) <= row {
                break;
            }
            if self.cell_index + self.window_len >= count {
                break;
            }
            // guard against non-advancing iteration
            if prev_first == Some(first_target) {
                rwarn!(first_target, "recycle_forward stalled");
                break;
            }
            prev_first = Some(first_target);

            self.cell_index += 1;
            let incoming = self.cell_index + self.window_len - 1;
            let target = self
                .list
                .holders()
                .get(self.window_len - 1)
                .map(|h| h.end())
                .unwrap_or(0);
            self.list
                .recycle_front_to_back(self.window_len, incoming, target);
        }
    }

    fn recycle_backward(&mut self) {
        let row = self.list.options().row_extent.max(1) as u64;
        let scroll_end = self
            .list
            .scroll_offset()
            .saturating_add(self.list.viewport_size() as u64);
        let mut prev_last = None;
        loop {
            if self.window_len == 0 {
                break;
            }
            let Some(last) = self.list.holders().get(self.window_len - 1) else {
                break;
            };
            if !last.active() {
                break;
            }
            let last_target = last.target();
            if last_target <= scroll_end.saturating_add(row) {
                break;
            }
            if self.cell_index == 0 {
                break;
            }
            // guard against non-advancing iteration
            if prev_last == Some(last_target) {
                rwarn!(last_target, "recycle_backward stalled");
                break;
            }
            prev_last = Some(last_target);

            self.cell_index -= 1;
            let extent = self
                .list
                .item_extent(self.cell_index)
                .unwrap_or(row as u32) as u64;
            let target = self
                .list
                .holders()
                .first()
                .map(|h| h.target().saturating_sub(extent))
                .unwrap_or(0);
            self.list
                .recycle_back_to_front(self.window_len, self.cell_index, target);
        }
    }
}
