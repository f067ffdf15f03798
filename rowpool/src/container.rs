use alloc::vec::Vec;
use core::cell::Cell;

use crate::fenwick::PrefixSums;
use crate::holder::Holder;
use crate::item::ListItem;
use crate::options::ListOptions;
use crate::snapshot::Snapshot;
use crate::{ItemKey, Rect};

/// A headless list container.
///
/// Owns the backing item sequence and a pool of recyclable row holders, and
/// lays the pool out as a vertical stack over prefix sums of the resolved
/// row extents. It holds no UI objects:
/// - the host pushes viewport geometry and scroll offsets in,
/// - the host reads holder positions/activation back out (typically from
///   the `on_change` callback),
/// - pointer gestures and per-frame settling live in the `rowpool-adapter`
///   crate.
///
/// Windowed recycling over large collections is layered on top by
/// [`crate::VirtualWindow`].
#[derive(Clone, Debug)]
pub struct ListContainer<T, K = ItemKey> {
    options: ListOptions<T, K>,
    items: Vec<T>,
    holders: Vec<Holder>,
    extents: Vec<u32>,
    sums: PrefixSums,
    viewport: Rect,
    scroll_offset: u64,
    dragged: Option<usize>,
    next_holder_id: usize,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T: ListItem, K> ListContainer<T, K> {
    pub fn new(options: ListOptions<T, K>) -> Self {
        let viewport = options.initial_rect.unwrap_or_default();
        rdebug!(
            row_extent = options.row_extent,
            overscan = options.overscan,
            enabled = options.enabled,
            "ListContainer::new"
        );
        Self {
            options,
            items: Vec::new(),
            holders: Vec::new(),
            extents: Vec::new(),
            sums: PrefixSums::new(),
            viewport,
            scroll_offset: 0,
            dragged: None,
            next_holder_id: 0,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ListOptions<T, K> {
        &self.options
    }

    /// Clones the current options, applies `f`, then rebinds the pool.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<T, K>)) {
        f(&mut self.options);
        self.resolve_extents();
        self.bind_window(0, self.items.len());
        self.notify();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ListContainer<T, K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
        self.notify();
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.bind_window(0, self.items.len());
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    pub(crate) fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    // --- items and binding ---

    /// Replaces the backing collection and binds one holder per item.
    ///
    /// Holders are reused by slot where present and created lazily beyond
    /// that; holders past the new length stay pooled but deactivate. An
    /// empty collection deactivates everything and leaves the extent at 0.
    /// Any live drag is dissolved.
    pub fn set_items(&mut self, items: Vec<T>) {
        rdebug!(count = items.len(), "set_items");
        self.replace_items(items);
        self.bind_window(0, self.items.len());
        self.notify();
    }

    /// Replaces items and re-resolves extents without touching the pool.
    pub(crate) fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.resolve_extents();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn key_for(&self, index: usize) -> Option<K> {
        let item = self.items.get(index)?;
        Some((self.options.get_item_key)(item, index))
    }

    /// Resolves every row extent from the item's capability, falling back to
    /// the template extent, and rebuilds the prefix sums.
    fn resolve_extents(&mut self) {
        let row = self.options.row_extent;
        self.extents.clear();
        self.extents.reserve_exact(self.items.len());
        for item in &self.items {
            self.extents.push(item.custom_extent().unwrap_or(row));
        }
        self.sums = PrefixSums::from_extents(&self.extents);
    }

    /// Binds `pool` holders to the items starting at `first`, deactivating
    /// the rest of the pool. Growing stops at the item count.
    pub(crate) fn bind_window(&mut self, first: usize, pool: usize) {
        self.dragged = None;
        if !self.options.enabled {
            for h in &mut self.holders {
                h.active = false;
            }
            return;
        }
        let len = self.items.len();
        let first = first.min(len);
        let pool = pool.min(len - first);
        while self.holders.len() < pool {
            let id = self.next_holder_id;
            self.next_holder_id += 1;
            self.holders.push(Holder::new(id));
        }
        for slot in 0..pool {
            self.bind_holder(slot, first + slot);
        }
        for h in &mut self.holders[pool..] {
            h.active = false;
        }
    }

    /// Re-binds the holder at `slot` to `index` at its slot position.
    fn bind_holder(&mut self, slot: usize, index: usize) {
        let target = self.start_of(index);
        self.bind_holder_at(slot, index, target);
    }

    /// Re-binds the holder at `slot` to `index` at an explicit position.
    fn bind_holder_at(&mut self, slot: usize, index: usize, target: u64) {
        let size = self.extents[index];
        self.holders[slot].bind(index, size, target);
        self.fire_bind(slot, index);
    }

    fn fire_bind(&self, slot: usize, index: usize) {
        if let Some(cb) = &self.options.on_bind {
            let item = &self.items[index];
            cb(&self.holders[slot], item, item.text_style());
        }
    }

    /// Recycles the front holder of the `window`-long prefix to `index`,
    /// placed at `target`, and moves it to the back of the window ordering.
    /// Caller notifies.
    pub(crate) fn recycle_front_to_back(&mut self, window: usize, index: usize, target: u64) {
        rtrace!(index, target, "recycle front -> back");
        let window = window.min(self.holders.len());
        if window == 0 {
            return;
        }
        self.bind_holder_at(0, index, target);
        self.holders[..window].rotate_left(1);
    }

    /// Recycles the back holder of the `window`-long prefix to `index`,
    /// placed at `target`, and moves it to the front of the window ordering.
    /// Caller notifies.
    pub(crate) fn recycle_back_to_front(&mut self, window: usize, index: usize, target: u64) {
        rtrace!(index, target, "recycle back -> front");
        let window = window.min(self.holders.len());
        if window == 0 {
            return;
        }
        self.bind_holder_at(window - 1, index, target);
        self.holders[..window].rotate_right(1);
    }

    // --- holders ---

    pub fn holders(&self) -> &[Holder] {
        &self.holders
    }

    /// Looks a holder up by its stable pool id.
    pub fn holder(&self, id: usize) -> Option<&Holder> {
        self.holders.iter().find(|h| h.id == id)
    }

    /// The active holder currently bound to `index`, if pooled.
    pub fn holder_for_index(&self, index: usize) -> Option<&Holder> {
        self.holders.iter().find(|h| h.active && h.index == index)
    }

    pub fn active_holders(&self) -> impl Iterator<Item = &Holder> {
        self.holders.iter().filter(|h| h.active)
    }

    fn slot_of(&self, id: usize) -> Option<usize> {
        self.holders.iter().position(|h| h.id == id)
    }

    /// Re-derives every active holder's slot target from the current order.
    ///
    /// `current` positions are left alone: non-dragged holders ease toward
    /// their targets frame by frame.
    fn relayout(&mut self) {
        let mut targets = Vec::with_capacity(self.holders.len());
        for h in &self.holders {
            targets.push(if h.active {
                Some((self.extents[h.index], self.start_of(h.index)))
            } else {
                None
            });
        }
        for (h, t) in self.holders.iter_mut().zip(targets) {
            if let Some((size, target)) = t {
                h.size = size;
                h.target = target;
            }
        }
    }

    /// One exponential-smoothing step moving every active, non-dragged
    /// holder toward its slot; snaps within one unit of the target.
    pub fn ease_holders(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let mut moved = false;
        for h in &mut self.holders {
            if !h.active || h.dragging {
                continue;
            }
            let next = ease_step(h.current, h.target, alpha);
            moved |= next != h.current;
            h.current = next;
        }
        if moved {
            self.notify();
        }
    }

    // --- geometry ---

    pub fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport.main
    }

    pub fn set_viewport_rect(&mut self, rect: Rect) {
        if self.viewport == rect {
            return;
        }
        self.viewport = rect;
        self.notify();
    }

    pub fn set_viewport_size(&mut self, main: u32) {
        if self.viewport.main == main {
            return;
        }
        self.viewport.main = main;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    pub(crate) fn set_scroll_offset_quiet(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies viewport size and scroll offset in one coalesced update.
    pub fn set_viewport_and_scroll(&mut self, viewport_main: u32, scroll_offset: u64) {
        self.batch_update(|l| {
            l.set_viewport_size(viewport_main);
            l.set_scroll_offset_clamped(scroll_offset);
        });
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size().saturating_sub(self.viewport.main as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Total scrollable extent: the sum of every resolved row extent.
    pub fn total_size(&self) -> u64 {
        if !self.options.enabled {
            return 0;
        }
        self.sums.total()
    }

    fn start_of(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    /// Slot start offset of the row at `index`.
    pub fn item_start(&self, index: usize) -> Option<u64> {
        if !self.options.enabled {
            return None;
        }
        (index < self.items.len()).then(|| self.start_of(index))
    }

    /// Resolved extent of the row at `index`.
    pub fn item_extent(&self, index: usize) -> Option<u32> {
        if !self.options.enabled {
            return None;
        }
        self.extents.get(index).copied()
    }

    /// Maps a content offset to the row containing it (clamped to the last
    /// row past the end).
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if !self.options.enabled || self.items.is_empty() {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(self.items.len() - 1))
    }

    // --- order mutation ---

    /// Swaps the items at `a` and `b`, carrying extents, bound holders, and
    /// slot targets along. Emits `on_order_changed(a, b)`.
    ///
    /// Out-of-range indices clamp to the collection; a degenerate pair is a
    /// no-op, as is any swap on an empty collection.
    pub fn swap_items(&mut self, a: usize, b: usize) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let a = a.min(len - 1);
        let b = b.min(len - 1);
        if a == b {
            return;
        }
        rtrace!(a, b, "swap_items");
        self.items.swap(a, b);
        let (ea, eb) = (self.extents[a], self.extents[b]);
        if ea != eb {
            self.sums.add(a, eb as i64 - ea as i64);
            self.sums.add(b, ea as i64 - eb as i64);
            self.extents.swap(a, b);
        }
        for h in &mut self.holders {
            if !h.active {
                continue;
            }
            if h.index == a {
                h.index = b;
            } else if h.index == b {
                h.index = a;
            }
        }
        self.relayout();
        if let Some(cb) = &self.options.on_order_changed {
            cb(a, b);
        }
        self.notify();
    }

    /// Removes the item at `index`, shrinking the pool by its holder.
    ///
    /// Subsequent holder indices shift down by one, the extent shrinks, and
    /// the scroll offset is pulled back when the removed row started before
    /// it so the viewport stays anchored. Out of range returns `None`.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed_start = self.start_of(index);
        let removed_extent = self.extents[index] as u64;
        rdebug!(index, "remove_item");

        let item = self.items.remove(index);
        self.extents.remove(index);
        self.sums = PrefixSums::from_extents(&self.extents);

        if let Some(slot) = self.holders.iter().position(|h| h.active && h.index == index) {
            let removed = self.holders.remove(slot);
            if self.dragged == Some(removed.id) {
                self.dragged = None;
            }
        }
        for h in &mut self.holders {
            if h.active && h.index > index {
                h.index -= 1;
            }
        }
        self.relayout();

        if removed_start < self.scroll_offset {
            self.scroll_offset = self.scroll_offset.saturating_sub(removed_extent);
        }
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.notify();
        Some(item)
    }

    // --- drag bookkeeping ---

    /// Marks the holder as dragged, detaching it from layout easing.
    ///
    /// Starting a drag while another is live is ignored (returns `false`).
    /// All slot targets are re-derived so easing assumes the current order.
    pub fn begin_drag(&mut self, holder_id: usize) -> bool {
        if self.dragged.is_some() {
            return false;
        }
        let Some(slot) = self.slot_of(holder_id) else {
            return false;
        };
        if !self.holders[slot].active {
            return false;
        }
        rtrace!(holder_id, "begin_drag");
        self.holders[slot].dragging = true;
        self.dragged = Some(holder_id);
        self.relayout();
        self.notify();
        true
    }

    /// Resolves any live drag back to normal layout.
    pub fn end_drag(&mut self) {
        let Some(id) = self.dragged.take() else {
            return;
        };
        rtrace!(id, "end_drag");
        if let Some(slot) = self.slot_of(id) {
            let h = &mut self.holders[slot];
            h.dragging = false;
            h.ready_to_delete = false;
        }
        self.notify();
    }

    pub fn is_dragging_item(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged_holder(&self) -> Option<&Holder> {
        let id = self.dragged?;
        self.holder(id)
    }

    /// Moves the dragged holder's rendered position (its target slot is
    /// untouched). No-op without a live drag.
    pub fn set_dragged_position(&mut self, position: u64) {
        let Some(id) = self.dragged else {
            return;
        };
        let Some(slot) = self.slot_of(id) else {
            return;
        };
        if self.holders[slot].current == position {
            return;
        }
        self.holders[slot].current = position;
        self.notify();
    }

    /// Arms or disarms drag-out deletion on the dragged holder.
    ///
    /// Returns whether the flag actually changed, so visual callbacks fire
    /// once per transition.
    pub fn set_ready_to_delete(&mut self, armed: bool) -> bool {
        let Some(id) = self.dragged else {
            return false;
        };
        let Some(slot) = self.slot_of(id) else {
            return false;
        };
        if self.holders[slot].ready_to_delete == armed {
            return false;
        }
        rtrace!(id, armed, "ready_to_delete");
        self.holders[slot].ready_to_delete = armed;
        self.notify();
        true
    }
}

impl<T: ListItem + Clone, K> ListContainer<T, K> {
    /// Clones the bound state into an undo buffer.
    pub fn capture(&self) -> Snapshot<T> {
        Snapshot {
            items: self.items.clone(),
            holders: self.holders.clone(),
        }
    }

    /// Restores a previously captured snapshot wholesale.
    ///
    /// Row extents and slot targets are re-derived; transient drag state is
    /// cleared.
    pub fn restore(&mut self, snapshot: Snapshot<T>) {
        rdebug!(count = snapshot.items.len(), "restore");
        self.items = snapshot.items;
        self.holders = snapshot.holders;
        self.dragged = None;
        for h in &mut self.holders {
            h.dragging = false;
            h.ready_to_delete = false;
        }
        self.resolve_extents();
        self.relayout();
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.notify();
    }
}

fn ease_step(current: u64, target: u64, alpha: f32) -> u64 {
    if current.abs_diff(target) <= 1 {
        return target;
    }
    let cur = current as f32;
    let tgt = target as f32;
    let next = (cur + (tgt - cur) * alpha).max(0.0) as u64;
    if next == current {
        // f32 truncation must not stall short of the snap distance
        if target > current { current + 1 } else { current - 1 }
    } else {
        next
    }
}
