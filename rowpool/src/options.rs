use alloc::sync::Arc;

use crate::container::ListContainer;
use crate::holder::Holder;
use crate::{ItemKey, Rect, TextStyle};

/// Fired after a holder is (re)bound to an item.
///
/// The third argument is the item's [`TextStyle`] capability, resolved once
/// at bind time for the host to apply.
pub type BindCallback<T> = Arc<dyn Fn(&Holder, &T, Option<TextStyle>) + Send + Sync>;

/// Fired when container state changes (layout, scroll, order, activation).
pub type OnChangeCallback<T, K> = Arc<dyn Fn(&ListContainer<T, K>) + Send + Sync>;

/// Fired after a neighbor swap with the two item indices involved.
///
/// Hosts needing the full order read `items()`/`key_for()` afterwards.
pub type OrderChangedCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Configuration for [`ListContainer`].
///
/// Cheap to clone: callbacks are stored in `Arc`s so hosts can tweak a few
/// fields and rebuild without reallocating closures.
pub struct ListOptions<T, K = ItemKey> {
    /// Template row extent on the scrolled axis, used when an item reports
    /// no [`crate::ListItem::custom_extent`]. Windowed recycling assumes
    /// this extent uniformly.
    pub row_extent: u32,

    /// Stable identity for the item at an index, reported through
    /// [`ListContainer::key_for`] so hosts can follow items across
    /// reordering.
    pub get_item_key: Arc<dyn Fn(&T, usize) -> K + Send + Sync>,

    /// Extra pooled rows beyond the visible count under a
    /// [`crate::VirtualWindow`]; absorbs sub-frame scroll jitter.
    pub overscan: usize,

    /// When false the engine degrades to visually inert: queries return
    /// empty/zero and holders stay deactivated.
    pub enabled: bool,

    /// Initial viewport geometry, applied by `ListContainer::new`.
    pub initial_rect: Option<Rect>,

    pub on_bind: Option<BindCallback<T>>,
    pub on_change: Option<OnChangeCallback<T, K>>,
    pub on_order_changed: Option<OrderChangedCallback>,
}

impl<T, K> Clone for ListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            row_extent: self.row_extent,
            get_item_key: Arc::clone(&self.get_item_key),
            overscan: self.overscan,
            enabled: self.enabled,
            initial_rect: self.initial_rect,
            on_bind: self.on_bind.clone(),
            on_change: self.on_change.clone(),
            on_order_changed: self.on_order_changed.clone(),
        }
    }
}

impl<T> ListOptions<T, ItemKey> {
    /// Creates options for a list keyed by index (`ItemKey = u64`).
    ///
    /// `row_extent` is the template row extent (the prototype row's
    /// measurable size on the scrolled axis).
    pub fn new(row_extent: u32) -> Self {
        Self {
            row_extent,
            get_item_key: Arc::new(|_, i| i as u64),
            overscan: 4,
            enabled: true,
            initial_rect: None,
            on_bind: None,
            on_change: None,
            on_order_changed: None,
        }
    }
}

impl<T, K> ListOptions<T, K> {
    /// Creates options with a custom key mapping.
    pub fn new_with_key(
        row_extent: u32,
        get_item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            row_extent,
            get_item_key: Arc::new(get_item_key),
            overscan: 4,
            enabled: true,
            initial_rect: None,
            on_bind: None,
            on_change: None,
            on_order_changed: None,
        }
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_on_bind(
        mut self,
        on_bind: Option<impl Fn(&Holder, &T, Option<TextStyle>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_bind = on_bind.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ListContainer<T, K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_order_changed(
        mut self,
        on_order_changed: Option<impl Fn(usize, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_order_changed = on_order_changed.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for ListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("row_extent", &self.row_extent)
            .field("overscan", &self.overscan)
            .field("enabled", &self.enabled)
            .field("initial_rect", &self.initial_rect)
            .finish_non_exhaustive()
    }
}
