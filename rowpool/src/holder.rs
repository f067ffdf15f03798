/// A recyclable row slot.
///
/// Holders are created lazily up to the pool capacity and reused
/// indefinitely as the window re-binds them; only a drag-out delete removes
/// one from the pool. The `id` is the stable identity the host tags pointer
/// events with — it survives recycling, the bound `index` does not.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holder {
    pub(crate) id: usize,
    pub(crate) index: usize,
    pub(crate) target: u64,
    pub(crate) current: u64,
    pub(crate) size: u32,
    pub(crate) active: bool,
    pub(crate) dragging: bool,
    pub(crate) ready_to_delete: bool,
}

impl Holder {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            index: 0,
            target: 0,
            current: 0,
            size: 0,
            active: false,
            dragging: false,
            ready_to_delete: false,
        }
    }

    /// Stable pool identity.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The item index this holder currently represents.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The anchored slot position (start offset on the scrolled axis).
    pub fn target(&self) -> u64 {
        self.target
    }

    /// The eased actual position the host should render at.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Resolved row extent on the scrolled axis.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn ready_to_delete(&self) -> bool {
        self.ready_to_delete
    }

    /// True while the holder has not settled on its slot.
    pub fn is_moving(&self) -> bool {
        self.current.abs_diff(self.target) > 1
    }

    /// End offset of the slot (`target + size`).
    pub fn end(&self) -> u64 {
        self.target.saturating_add(self.size as u64)
    }

    pub(crate) fn bind(&mut self, index: usize, size: u32, target: u64) {
        self.index = index;
        self.size = size;
        self.target = target;
        self.current = target;
        self.active = true;
        self.dragging = false;
        self.ready_to_delete = false;
    }
}
