use alloc::sync::Arc;
use alloc::vec::Vec;

use rowpool::{Holder, ItemKey, ListContainer, ListItem, ListOptions, Point, Snapshot};

use crate::Smoothing;

/// Fired when a press resolves without ever becoming a drag (a tap).
pub type ClickCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Fired when the dragged holder arms or disarms drag-out deletion.
///
/// Fires only on a state change, so hosts can drive a visual toggle.
pub type ReadyToDeleteCallback = Arc<dyn Fn(usize, bool) + Send + Sync>;

/// Fired after a drag-out delete commits, with the holder id and the item
/// index that was removed.
pub type DeleteCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Fired after an undo restores the pre-delete state.
pub type UndoCallback = Arc<dyn Fn() + Send + Sync>;

/// Tuning and hooks for [`ReorderController`].
///
/// The thresholds are defaults arrived at by feel, not contracts; tune them
/// per host.
#[derive(Clone)]
pub struct ReorderOptions {
    /// How long a press must be held before it becomes a drag.
    pub hold_delay_ms: u64,

    /// Fraction of the neighbor's extent the dragged row's center must
    /// cross past their shared edge before the rows swap. The offset doubles
    /// as hysteresis against thrashing.
    pub swap_threshold: f32,

    /// Fraction of a row extent the dragged row may poke past a viewport
    /// edge before auto-scroll engages.
    pub edge_fraction: f32,

    /// Auto-scroll speed cap, in content units per second. Speed ramps
    /// linearly with the overshoot distance up to this cap.
    pub max_scroll_speed: f32,

    /// Enables drag-out deletion. Off by default; cross-axis pointer
    /// movement is ignored entirely while off.
    pub delete_enabled: bool,

    /// Fraction of the viewport cross extent the pointer must travel on the
    /// cross axis to arm deletion.
    pub delete_fraction: f32,

    /// Settling rate for non-dragged rows, per second.
    pub ease_rate: f32,

    pub on_click: Option<ClickCallback>,
    pub on_ready_to_delete: Option<ReadyToDeleteCallback>,
    pub on_delete: Option<DeleteCallback>,
    pub on_undo: Option<UndoCallback>,
}

impl ReorderOptions {
    pub fn new() -> Self {
        Self {
            hold_delay_ms: 500,
            swap_threshold: 0.25,
            edge_fraction: 0.5,
            max_scroll_speed: 1000.0,
            delete_enabled: false,
            delete_fraction: 0.5,
            ease_rate: 10.0,
            on_click: None,
            on_ready_to_delete: None,
            on_delete: None,
            on_undo: None,
        }
    }

    pub fn with_hold_delay_ms(mut self, hold_delay_ms: u64) -> Self {
        self.hold_delay_ms = hold_delay_ms;
        self
    }

    pub fn with_swap_threshold(mut self, swap_threshold: f32) -> Self {
        self.swap_threshold = swap_threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_edge_fraction(mut self, edge_fraction: f32) -> Self {
        self.edge_fraction = edge_fraction.max(0.0);
        self
    }

    pub fn with_max_scroll_speed(mut self, max_scroll_speed: f32) -> Self {
        self.max_scroll_speed = max_scroll_speed.max(0.0);
        self
    }

    pub fn with_delete_enabled(mut self, delete_enabled: bool) -> Self {
        self.delete_enabled = delete_enabled;
        self
    }

    pub fn with_delete_fraction(mut self, delete_fraction: f32) -> Self {
        self.delete_fraction = delete_fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_ease_rate(mut self, ease_rate: f32) -> Self {
        self.ease_rate = ease_rate.max(0.0);
        self
    }

    pub fn with_on_click(mut self, on_click: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_click = on_click.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_ready_to_delete(
        mut self,
        on_ready_to_delete: Option<impl Fn(usize, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_ready_to_delete = on_ready_to_delete.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_delete(
        mut self,
        on_delete: Option<impl Fn(usize, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_delete = on_delete.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_undo(mut self, on_undo: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_undo = on_undo.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ReorderOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReorderOptions")
            .field("hold_delay_ms", &self.hold_delay_ms)
            .field("swap_threshold", &self.swap_threshold)
            .field("edge_fraction", &self.edge_fraction)
            .field("max_scroll_speed", &self.max_scroll_speed)
            .field("delete_enabled", &self.delete_enabled)
            .field("delete_fraction", &self.delete_fraction)
            .field("ease_rate", &self.ease_rate)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    holder: usize,
    at_ms: u64,
    pointer: Point,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    holder: usize,
    pointer_origin: Point,
    holder_origin: u64,
    scroll_origin: u64,
}

/// A frame-driven drag-reorder controller over a [`ListContainer`].
///
/// The host routes pointer events (viewport-space, tagged with the
/// originating holder id) into `on_pointer_down/move/up` and calls
/// [`Self::tick`] once per frame. A press held past the delay picks its row
/// up; dragging swaps neighbors live, auto-scrolls near viewport edges, and
/// (when enabled) arms drag-out deletion with a one-level undo buffer.
///
/// Releasing the pointer, or [`Self::cancel`], always resolves a live drag
/// back to idle.
#[derive(Clone, Debug)]
pub struct ReorderController<T, K = ItemKey> {
    list: ListContainer<T, K>,
    options: ReorderOptions,
    pointer: Point,
    press: Option<Press>,
    drag: Option<Drag>,
    backup: Option<Snapshot<T>>,
    last_tick_ms: Option<u64>,
}

impl<T: ListItem + Clone, K> ReorderController<T, K> {
    pub fn new(list_options: ListOptions<T, K>, options: ReorderOptions) -> Self {
        Self::from_container(ListContainer::new(list_options), options)
    }

    pub fn from_container(list: ListContainer<T, K>, options: ReorderOptions) -> Self {
        Self {
            list,
            options,
            pointer: Point::default(),
            press: None,
            drag: None,
            backup: None,
            last_tick_ms: None,
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

    pub fn options(&self) -> &ReorderOptions {
        &self.options
    }

    pub fn is_dragging_item(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragged_holder(&self) -> Option<&Holder> {
        self.list.dragged_holder()
    }

    pub fn can_undo(&self) -> bool {
        self.backup.is_some()
    }

    /// Replaces the collection; any live gesture dissolves and the undo
    /// buffer (which described the old collection) is dropped.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.press = None;
        self.drag = None;
        self.backup = None;
        self.list.set_items(items);
    }

    /// Pointer-down on a holder starts a press candidate.
    ///
    /// Ignored while a drag or another press is live, and on inactive or
    /// already-dragging holders.
    pub fn on_pointer_down(&mut self, holder_id: usize, pointer: Point, now_ms: u64) {
        if self.drag.is_some() || self.press.is_some() {
            return;
        }
        let Some(h) = self.list.holder(holder_id) else {
            return;
        };
        if !h.active() || h.is_dragging() {
            return;
        }
        self.pointer = pointer;
        self.press = Some(Press {
            holder: holder_id,
            at_ms: now_ms,
            pointer,
        });
    }

    pub fn on_pointer_move(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Releases the pointer: commits a live drag (delete if armed), or
    /// resolves a bare press as a tap. Always lands in idle.
    pub fn on_pointer_up(&mut self, _now_ms: u64) {
        if let Some(drag) = self.drag.take() {
            self.commit(drag);
        } else if let Some(press) = self.press.take() {
            if let Some(cb) = &self.options.on_click {
                cb(press.holder);
            }
        }
        self.press = None;
    }

    /// Host-signaled gesture cancellation: resolves to idle, never deletes.
    pub fn cancel(&mut self) {
        if self.drag.take().is_some() {
            self.list.end_drag();
        }
        self.press = None;
    }

    /// Restores the pre-delete snapshot (single level).
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.backup.take() else {
            return false;
        };
        self.cancel();
        self.list.restore(snapshot);
        if let Some(cb) = &self.options.on_undo {
            cb();
        }
        true
    }

    /// Advances the controller by one frame.
    ///
    /// Promotes a held press to a drag, tracks the dragged row against the
    /// pointer, auto-scrolls near edges, runs the neighbor-swap and delete
    /// arming tests, and settles every other row toward its slot. Hosts
    /// apply window recycling before this call within a frame.
    pub fn tick(&mut self, now_ms: u64) {
        let dt_ms = self
            .last_tick_ms
            .map_or(0, |t| now_ms.saturating_sub(t));
        self.last_tick_ms = Some(now_ms);

        // a rebind may have dissolved the drag under us
        if self.drag.is_some() && !self.list.is_dragging_item() {
            self.drag = None;
        }

        if let Some(press) = self.press {
            if self.drag.is_none()
                && now_ms.saturating_sub(press.at_ms) >= self.options.hold_delay_ms
            {
                self.promote(press);
            }
        }

        if self.drag.is_some() {
            self.drive_drag(dt_ms);
        }

        // runs while idle too, so released rows slide home
        let alpha = Smoothing::new(self.options.ease_rate).alpha(dt_ms);
        self.list.ease_holders(alpha);
    }

    fn promote(&mut self, press: Press) {
        self.press = None;
        let Some(h) = self.list.holder(press.holder) else {
            return;
        };
        let holder_origin = h.current();
        if !self.list.begin_drag(press.holder) {
            return;
        }
        self.drag = Some(Drag {
            holder: press.holder,
            pointer_origin: press.pointer,
            holder_origin,
            scroll_origin: self.list.scroll_offset(),
        });
    }

    fn drive_drag(&mut self, dt_ms: u64) {
        let Some(drag) = self.drag else {
            return;
        };

        // the row rides the pointer; scroll carries it deeper into the list
        let scroll_delta = self.list.scroll_offset() as i64 - drag.scroll_origin as i64;
        let pointer_delta = (self.pointer.main - drag.pointer_origin.main) as i64;
        let position = (drag.holder_origin as i64 + scroll_delta + pointer_delta).max(0) as u64;
        self.list.set_dragged_position(position);

        self.auto_scroll(dt_ms);
        self.swap_if_past_threshold();
        if self.options.delete_enabled {
            self.update_delete_arming(drag);
        }
    }

    fn auto_scroll(&mut self, dt_ms: u64) {
        if dt_ms == 0 {
            return;
        }
        let Some(h) = self.list.dragged_holder() else {
            return;
        };
        let row = h.size().max(1) as f32;
        let top = self.list.scroll_offset() as f32;
        let bottom = top + self.list.viewport_size() as f32;
        let start = h.current() as f32;
        let end = start + h.size() as f32;
        let margin = self.options.edge_fraction * row;
        let dt = dt_ms as f32 / 1000.0;

        if top - start > margin {
            let over = top - start - margin;
            let speed = self.options.max_scroll_speed * (over / row).min(1.0);
            let delta = (speed * dt) as u64;
            let next = self.list.scroll_offset().saturating_sub(delta);
            self.list.set_scroll_offset(next);
        } else if end - bottom > margin {
            let over = end - bottom - margin;
            let speed = self.options.max_scroll_speed * (over / row).min(1.0);
            let delta = (speed * dt) as u64;
            let next = self.list.scroll_offset().saturating_add(delta);
            self.list.set_scroll_offset_clamped(next);
        }
    }

    fn swap_if_past_threshold(&mut self) {
        let Some(h) = self.list.dragged_holder() else {
            return;
        };
        let index = h.index();
        let center = h.current() as f32 + h.size() as f32 / 2.0;
        let threshold = self.options.swap_threshold;

        if index > 0 {
            if let (Some(start), Some(extent)) = (
                self.list.item_start(index - 1),
                self.list.item_extent(index - 1),
            ) {
                // shared edge with the previous row is its end
                let edge = (start + extent as u64) as f32;
                if center < edge - threshold * extent as f32 {
                    self.list.swap_items(index - 1, index);
                    return;
                }
            }
        }
        if index + 1 < self.list.len() {
            if let (Some(start), Some(extent)) = (
                self.list.item_start(index + 1),
                self.list.item_extent(index + 1),
            ) {
                // shared edge with the next row is its start
                let edge = start as f32;
                if center > edge + threshold * extent as f32 {
                    self.list.swap_items(index, index + 1);
                }
            }
        }
    }

    fn update_delete_arming(&mut self, drag: Drag) {
        let cross = self.list.viewport_rect().cross.max(1) as f32;
        let travel = fabs(self.pointer.cross - drag.pointer_origin.cross);
        let armed = travel > self.options.delete_fraction * cross;
        if self.list.set_ready_to_delete(armed) {
            if let Some(cb) = &self.options.on_ready_to_delete {
                cb(drag.holder, armed);
            }
        }
    }

    fn commit(&mut self, drag: Drag) {
        let armed = self
            .list
            .dragged_holder()
            .is_some_and(|h| h.ready_to_delete());
        if armed {
            let index = self.list.dragged_holder().map(|h| h.index());
            self.backup = Some(self.list.capture());
            if let Some(index) = index {
                self.list.remove_item(index);
                if let Some(cb) = &self.options.on_delete {
                    cb(drag.holder, index);
                }
            }
        }
        // remove_item already cleared the drag when it dropped the holder
        self.list.end_drag();
    }
}

fn fabs(x: f32) -> f32 {
    if x < 0.0 { -x } else { x }
}
