use crate::TextStyle;

/// Capability probes on list items.
///
/// Every method is defaulted: an item implements only what it actually
/// supports, and a plain `impl ListItem for MyItem {}` opts out of all of
/// them. The container queries these once per bind, never per layout pass.
pub trait ListItem {
    /// Per-item row extent on the scrolled axis.
    ///
    /// `None` falls back to the template extent from
    /// [`crate::ListOptions::row_extent`].
    fn custom_extent(&self) -> Option<u32> {
        None
    }

    /// Optional styling hint, passed through to the bind callback untouched.
    fn text_style(&self) -> Option<TextStyle> {
        None
    }
}

impl<T: ListItem + ?Sized> ListItem for &T {
    fn custom_extent(&self) -> Option<u32> {
        (**self).custom_extent()
    }

    fn text_style(&self) -> Option<TextStyle> {
        (**self).text_style()
    }
}

impl<T: ListItem + ?Sized> ListItem for alloc::boxed::Box<T> {
    fn custom_extent(&self) -> Option<u32> {
        (**self).custom_extent()
    }

    fn text_style(&self) -> Option<TextStyle> {
        (**self).text_style()
    }
}

impl<T: ListItem + ?Sized> ListItem for alloc::sync::Arc<T> {
    fn custom_extent(&self) -> Option<u32> {
        (**self).custom_extent()
    }

    fn text_style(&self) -> Option<TextStyle> {
        (**self).text_style()
    }
}
