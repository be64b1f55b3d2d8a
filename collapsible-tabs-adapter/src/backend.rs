use collapsible_tabs::ScrollHandle;

use crate::{ItemLayout, ListKind, ViewabilityConfig};

/// Offsets are reported every frame so the header tracks the finger.
pub const SCROLL_EVENT_THROTTLE_MS: u64 = 16;

/// Everything an engine needs to set itself up for an [`crate::AnimatedList`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackendConfig {
    pub kind: ListKind,
    pub scroll_event_throttle_ms: u64,
    pub viewability: ViewabilityConfig,
}

impl BackendConfig {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            scroll_event_throttle_ms: SCROLL_EVENT_THROTTLE_MS,
            viewability: ViewabilityConfig::default(),
        }
    }
}

/// The external virtualization engine behind a list.
///
/// The engine reports scroll offsets, momentum/drag events and viewable items back through the
/// owning [`crate::AnimatedList`]; this trait covers the calls going the other way.
pub trait ListBackend {
    /// Imperative scroll capability, usable after the list is handed to the synchronizer.
    type Handle: ScrollHandle + 'static;

    fn configure(&mut self, config: &BackendConfig);

    /// Per-item size/offset overrides; `None` entries are measured by the engine.
    fn set_item_layouts(&mut self, layouts: Vec<Option<ItemLayout>>);

    /// The scroll handle, once the engine has created its scrollable view.
    fn scroll_handle(&mut self) -> Option<Self::Handle>;

    fn scroll_to_offset(&mut self, offset: f32, animated: bool);
}
