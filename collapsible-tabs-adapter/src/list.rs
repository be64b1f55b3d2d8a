use collapsible_tabs::{ConfigError, ListHandle, SceneEvent, SceneProps, ScrollSignal};

use crate::{BackendConfig, ListBackend, ListItem, ListKind};

/// The capabilities every tab list offers the synchronizer, whatever engine backs it.
pub trait ScrollableList {
    fn key(&self) -> &str;

    /// Feeds the engine's current scroll offset into the shared signal.
    fn report_offset(&mut self, offset: f32) -> bool;

    fn scroll_to(&mut self, offset: f32, animated: bool);

    /// Returns the list's handle the first time a scrollable view exists.
    fn register(&mut self) -> Option<ListHandle>;

    /// Runs the preload hook of newly visible items. Returns how many preloaded successfully.
    fn report_visible_items(&mut self, visible: &[usize]) -> usize;
}

/// A tab list: wraps an engine and wires it to a tab's shared scroll signal.
///
/// This type does not hold any UI objects. Adapters forward engine events:
/// - `on_scroll` for every offset change (one per frame)
/// - `on_viewable_items_changed` when the viewable set changes
/// - momentum and drag-end events, whose returned [`SceneEvent`]s go to the tab host
#[derive(Debug)]
pub struct AnimatedList<B, T> {
    key: String,
    signal: ScrollSignal,
    backend: B,
    config: BackendConfig,
    items: Vec<T>,
    attached: bool,
    last_offset: f32,
}

impl<B: ListBackend, T: ListItem> AnimatedList<B, T> {
    pub fn new(
        key: impl Into<String>,
        signal: ScrollSignal,
        mut backend: B,
        kind: ListKind,
    ) -> Result<Self, ConfigError> {
        kind.validate()?;
        let config = BackendConfig::new(kind);
        backend.configure(&config);
        Ok(Self {
            key: key.into(),
            signal,
            backend,
            config,
            items: Vec::new(),
            attached: false,
            last_offset: 0.0,
        })
    }

    /// Builds the list for a scene rendered by the tab host.
    pub fn from_scene(
        props: &SceneProps<'_>,
        backend: B,
        kind: ListKind,
    ) -> Result<Self, ConfigError> {
        Self::new(props.route.key.clone(), props.signal.clone(), backend, kind)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &ListKind {
        &self.config.kind
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    /// Replaces the data set and hands the matching layout overrides to the engine.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.backend
            .set_item_layouts(self.config.kind.item_layouts(&items));
        self.items = items;
    }

    /// Returns the list's handle for registration, at most once.
    ///
    /// `None` until the engine has a scrollable view, and after the handle was taken.
    pub fn attach(&mut self) -> Option<ListHandle> {
        if self.attached {
            return None;
        }
        let handle = self.backend.scroll_handle()?;
        self.attached = true;
        atrace!(key = self.key.as_str(), "list attached");
        Some(ListHandle::new(self.key.clone(), handle))
    }

    /// The engine scrolled to `offset`. Returns whether the signal accepted it.
    pub fn on_scroll(&mut self, offset: f32) -> bool {
        if !offset.is_finite() {
            return false;
        }
        self.last_offset = offset;
        self.signal.report(&self.key, offset)
    }

    pub fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self.backend.scroll_to_offset(offset, animated);
    }

    /// Preloads the items at the `visible` indexes. A failing preload is logged and skipped.
    pub fn on_viewable_items_changed(&mut self, visible: &[usize]) -> usize {
        let mut loaded = 0;
        for &index in visible {
            let Some(item) = self.items.get_mut(index) else {
                continue;
            };
            match item.preload() {
                None => {}
                Some(Ok(())) => loaded += 1,
                Some(Err(_err)) => {
                    awarn!(key = self.key.as_str(), index, error = %_err, "item preload failed");
                }
            }
        }
        loaded
    }

    pub fn on_momentum_scroll_begin(&self) -> SceneEvent {
        SceneEvent::MomentumScrollBegin {
            key: self.key.clone(),
        }
    }

    pub fn on_momentum_scroll_end(&self) -> SceneEvent {
        SceneEvent::MomentumScrollEnd {
            key: self.key.clone(),
        }
    }

    /// The user lifted their finger at `offset`.
    pub fn on_scroll_end_drag(&mut self, offset: f32) -> SceneEvent {
        if offset.is_finite() {
            self.last_offset = offset;
        }
        SceneEvent::ScrollEndDrag {
            key: self.key.clone(),
            offset,
        }
    }
}

impl<B: ListBackend, T: ListItem> ScrollableList for AnimatedList<B, T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn report_offset(&mut self, offset: f32) -> bool {
        self.on_scroll(offset)
    }

    fn scroll_to(&mut self, offset: f32, animated: bool) {
        self.scroll_to_offset(offset, animated);
    }

    fn register(&mut self) -> Option<ListHandle> {
        self.attach()
    }

    fn report_visible_items(&mut self, visible: &[usize]) -> usize {
        self.on_viewable_items_changed(visible)
    }
}
