use std::fmt;

use crate::{
    Color, ConfigError, GesturePhase, ListHandle, PlatformFamily, RefreshTicket, ScrollSignal,
    Synchronizer, TabRoute, TabViewOptions,
};

/// Opacity of an unfocused tab label.
pub const UNFOCUSED_LABEL_OPACITY: f32 = 0.5;

type SceneRenderer<V> = Box<dyn Fn(SceneProps<'_>) -> V>;
type HeaderRenderer<V> = Box<dyn Fn(&TabRoute) -> V>;
type LoadingRenderer<V> = Box<dyn Fn() -> V>;
type RefreshCallback = Box<dyn FnMut(RefreshTicket)>;
type TabChangeCallback = Box<dyn FnMut(usize)>;

/// Everything a scene renderer needs to build one tab's list.
#[derive(Clone, Debug)]
pub struct SceneProps<'a> {
    pub route: &'a TabRoute,
    pub focused: bool,
    /// The shared signal the scene's list adapter reports into.
    pub signal: ScrollSignal,
    pub header_height: f32,
    pub tab_bar_height: f32,
    pub pull_to_refresh_distance: f32,
}

/// Scroll lifecycle events a scene's list reports back to the host.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    MomentumScrollBegin { key: String },
    MomentumScrollEnd { key: String },
    ScrollEndDrag { key: String, offset: f32 },
}

impl SceneEvent {
    pub fn key(&self) -> &str {
        match self {
            Self::MomentumScrollBegin { key }
            | Self::MomentumScrollEnd { key }
            | Self::ScrollEndDrag { key, .. } => key,
        }
    }
}

/// One frame of the tab view, ready for the host UI to draw.
#[derive(Debug)]
pub struct HostView<V> {
    pub header: HeaderView<V>,
    pub body: HostBody<V>,
    /// Present only when the host has a refresh callback.
    pub refresh_indicator: Option<RefreshIndicatorView>,
}

#[derive(Debug)]
pub struct HeaderView<V> {
    pub translate_y: f32,
    pub background: Color,
    pub content: Option<V>,
}

#[derive(Debug)]
pub enum HostBody<V> {
    /// The header has not been measured yet.
    Loading(LoadingView<V>),
    Tabs { tab_bar: TabBarView, scenes: Vec<V> },
}

#[derive(Debug)]
pub enum LoadingView<V> {
    Custom(V),
    /// Default loading view: a large spinner.
    Spinner { color: Color },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabBarView {
    pub translate_y: f32,
    pub height: f32,
    pub background: Color,
    pub indicator: Color,
    pub labels: Vec<TabLabel>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabLabel {
    pub title: String,
    pub focused: bool,
    pub opacity: f32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshIndicatorView {
    pub platform: PlatformFamily,
    pub translate_y: f32,
    pub animating: bool,
}

/// The tab view shell: wires the tab/paging engine, header gestures and list adapters to a
/// [`Synchronizer`] and composes the header, tab bar and scenes.
///
/// `V` is the host UI's view type, produced by the configured renderers.
pub struct TabHost<V> {
    sync: Synchronizer,
    options: TabViewOptions,
    render_scene: SceneRenderer<V>,
    render_header: Option<HeaderRenderer<V>>,
    render_loading: Option<LoadingRenderer<V>>,
    on_refresh: Option<RefreshCallback>,
    on_tab_change: Option<TabChangeCallback>,
}

impl<V> TabHost<V> {
    pub fn new(
        routes: Vec<TabRoute>,
        mut options: TabViewOptions,
        render_scene: impl Fn(SceneProps<'_>) -> V + 'static,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        // Refresh needs a callback to hand tickets to; `with_refresh` turns it on.
        options.behavior.refresh_enabled = false;
        let sync = Synchronizer::new(routes, options.behavior)?;
        Ok(Self {
            sync,
            options,
            render_scene: Box::new(render_scene),
            render_header: None,
            render_loading: None,
            on_refresh: None,
            on_tab_change: None,
        })
    }

    pub fn with_header(mut self, render: impl Fn(&TabRoute) -> V + 'static) -> Self {
        self.render_header = Some(Box::new(render));
        self
    }

    pub fn with_loading(mut self, render: impl Fn() -> V + 'static) -> Self {
        self.render_loading = Some(Box::new(render));
        self
    }

    /// Enables pull-to-refresh. `on_refresh` receives the ticket of each refresh; the host
    /// starts its refresh work and later passes the ticket to [`TabHost::finish_refresh`].
    pub fn with_refresh(mut self, on_refresh: impl FnMut(RefreshTicket) + 'static) -> Self {
        self.on_refresh = Some(Box::new(on_refresh));
        self.options.behavior.refresh_enabled = true;
        self.sync.set_refresh_enabled(true);
        self
    }

    pub fn with_tab_change(mut self, on_tab_change: impl FnMut(usize) + 'static) -> Self {
        self.on_tab_change = Some(Box::new(on_tab_change));
        self
    }

    pub fn options(&self) -> &TabViewOptions {
        &self.options
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    pub fn synchronizer_mut(&mut self) -> &mut Synchronizer {
        &mut self.sync
    }

    pub fn signal(&self) -> &ScrollSignal {
        self.sync.signal()
    }

    pub fn active_index(&self) -> usize {
        self.sync.active_index()
    }

    pub fn on_header_layout(&mut self, height: f32) {
        self.sync.on_header_layout(height);
    }

    pub fn register_list(&mut self, handle: ListHandle) -> bool {
        self.sync.register_list(handle)
    }

    /// A tab was pressed in the tab bar. Returns `false` when the press must be prevented.
    pub fn on_tab_press(&self, _index: usize) -> bool {
        self.sync.can_switch_tabs()
    }

    /// The paging engine switched to `index`.
    pub fn on_index_change(&mut self, index: usize) {
        if index >= self.sync.routes().len() || index == self.sync.active_index() {
            return;
        }
        self.sync.reconcile_inactive_tabs();
        self.sync.on_tab_activated(index);
        self.sync.reconcile_inactive_tabs();
        if let Some(cb) = self.on_tab_change.as_mut() {
            cb(index);
        }
    }

    pub fn handle_scene_event(&mut self, event: SceneEvent, now_ms: u64) {
        match event {
            SceneEvent::MomentumScrollBegin { .. } => self.sync.on_momentum_scroll_begin(),
            SceneEvent::MomentumScrollEnd { .. } => self.sync.on_momentum_scroll_end(),
            SceneEvent::ScrollEndDrag { key, offset } => {
                if let Some(ticket) = self.sync.on_scroll_end_drag(&key, offset, now_ms) {
                    self.dispatch_refresh(ticket);
                }
            }
        }
    }

    pub fn on_header_touch_start(&mut self) {
        self.sync.on_header_touch_start();
    }

    pub fn should_claim_header_drag(&mut self, dy: f32) -> bool {
        self.sync.should_claim_header_drag(dy)
    }

    pub fn on_header_drag_start(&mut self) {
        self.sync.on_header_drag_start();
    }

    pub fn on_header_drag_move(&mut self, dy: f32) {
        self.sync.on_header_drag_move(dy);
    }

    /// Ends a header drag and returns the resulting gesture phase. A refresh triggered by the
    /// release is handed to the refresh callback.
    pub fn on_header_drag_end(&mut self, velocity_y: f32, now_ms: u64) -> GesturePhase {
        if let Some(ticket) = self
            .sync
            .on_header_drag_end(velocity_y, now_ms)
            .into_refresh_ticket()
        {
            self.dispatch_refresh(ticket);
        }
        self.sync.phase()
    }

    pub fn finish_refresh<E: fmt::Display>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<(), E>,
        now_ms: u64,
    ) -> Result<(), E> {
        self.sync.finish_refresh(ticket, result, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.sync.tick(now_ms)
    }

    fn dispatch_refresh(&mut self, ticket: RefreshTicket) {
        if let Some(cb) = self.on_refresh.as_mut() {
            cb(ticket);
        }
    }

    pub fn render(&self) -> HostView<V> {
        let colors = self.options.colors;
        let active = self.sync.active_route();

        let header = HeaderView {
            translate_y: self.sync.header_translate_y(),
            background: colors.header_background,
            content: self.render_header.as_ref().map(|render| render(active)),
        };

        let Some(header_height) = self.sync.header_height().measured() else {
            let loading = match &self.render_loading {
                Some(render) => LoadingView::Custom(render()),
                None => LoadingView::Spinner {
                    color: colors.header_background,
                },
            };
            return HostView {
                header,
                body: HostBody::Loading(loading),
                refresh_indicator: self.refresh_indicator(),
            };
        };

        let tab_bar_height = self.options.tab_bar_height();
        let labels = self
            .sync
            .routes()
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let focused = i == self.sync.active_index();
                TabLabel {
                    title: route.title.clone(),
                    focused,
                    opacity: if focused { 1.0 } else { UNFOCUSED_LABEL_OPACITY },
                    color: colors.label,
                }
            })
            .collect();
        let tab_bar = TabBarView {
            translate_y: self.sync.tab_bar_translate_y(),
            height: tab_bar_height,
            background: colors.tab_bar_background,
            indicator: colors.indicator,
            labels,
        };

        let scenes = self
            .sync
            .routes()
            .iter()
            .map(|route| {
                (self.render_scene)(SceneProps {
                    route,
                    focused: route.key == active.key,
                    signal: self.sync.signal().clone(),
                    header_height,
                    tab_bar_height,
                    pull_to_refresh_distance: self.options.behavior.pull_to_refresh_distance,
                })
            })
            .collect();

        HostView {
            header,
            body: HostBody::Tabs { tab_bar, scenes },
            refresh_indicator: self.refresh_indicator(),
        }
    }

    fn refresh_indicator(&self) -> Option<RefreshIndicatorView> {
        self.on_refresh.as_ref()?;
        Some(RefreshIndicatorView {
            platform: self.sync.platform(),
            translate_y: self.sync.refresh_indicator_translate_y(),
            animating: true,
        })
    }
}

impl<V> fmt::Debug for TabHost<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabHost")
            .field("sync", &self.sync)
            .field("options", &self.options)
            .field("has_header", &self.render_header.is_some())
            .field("has_loading", &self.render_loading.is_some())
            .field("has_refresh", &self.on_refresh.is_some())
            .finish_non_exhaustive()
    }
}
