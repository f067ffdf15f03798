#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Viewport geometry of the host's scroll surface.
///
/// `main` is the scrolled axis extent (height for vertical lists), `cross`
/// the other axis (width).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// A pointer position in viewport space.
///
/// `main` is measured from the viewport's leading edge along the scrolled
/// axis, `cross` from its left edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub main: f32,
    pub cross: f32,
}

pub type ItemKey = u64;

/// Styling hint an item may carry for the row that displays it.
///
/// The engine never interprets this; it is resolved once per bind and
/// handed to the bind callback for the host to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub font_size: Option<u16>,
    /// RGBA.
    pub color: Option<[u8; 4]>,
}
