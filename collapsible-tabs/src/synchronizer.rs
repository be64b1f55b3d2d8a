use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::animation::{Decay, Tween};
use crate::gesture::{
    AUXILIARY_ANIMATION_MS, AUXILIARY_PULL_DAMPING, AUXILIARY_REFRESH_OFFSET, DECAY_MIN_VELOCITY,
    DIRECT_PULL_DAMPING, DIRECT_REFRESH_OFFSET, DRAG_CLAIM_THRESHOLD,
};
use crate::handle::reconcile_target;
use crate::{
    ConfigError, GesturePhase, GestureState, HeaderHeight, Interpolation, ListHandle,
    OffsetMemory, PlatformFamily, RefreshState, RefreshTicket, ReleaseOutcome, ScrollSignal,
    Subscription, SynchronizerOptions, TabRoute,
};

/// Keeps the collapsing header, the tab bar and every tab's list consistent.
///
/// This type does not hold any UI objects. The host drives it by:
/// - registering each tab's list once it is mounted (`register_list`)
/// - forwarding list scroll offsets into the shared [`ScrollSignal`]
/// - forwarding scroll-end, momentum and header gesture events
/// - calling `tick(now_ms)` every frame while `is_animating()` is true
///
/// Lists are moved through their [`crate::ScrollHandle`]s; the header and tab bar read their
/// transforms from `header_translate_y` / `tab_bar_translate_y`.
#[derive(Debug)]
pub struct Synchronizer {
    options: SynchronizerOptions,
    routes: Vec<TabRoute>,
    active: usize,
    header_height: HeaderHeight,

    signal: ScrollSignal,
    memory: Rc<RefCell<OffsetMemory>>,
    lists: Vec<ListHandle>,

    header_pull: f32,
    header_pull_tween: Option<Tween>,
    decay: Option<Decay>,
    gesture: Option<GestureState>,
    phase: GesturePhase,
    refresh: RefreshState,
    gliding: bool,

    _memory_listener: Subscription,
}

impl Synchronizer {
    pub fn new(routes: Vec<TabRoute>, options: SynchronizerOptions) -> Result<Self, ConfigError> {
        validate_routes(&routes)?;
        options.validate()?;

        let active = options.initial_tab_index.min(routes.len() - 1);
        let signal = ScrollSignal::new();
        signal.set_owner(&routes[active].key);

        let memory = Rc::new(RefCell::new(OffsetMemory::new()));
        let memory_listener = signal.subscribe({
            let memory = Rc::clone(&memory);
            move |key, value| memory.borrow_mut().record(key, value)
        });

        cdebug!(
            routes = routes.len(),
            active,
            platform = ?options.platform,
            "Synchronizer::new"
        );

        Ok(Self {
            options,
            routes,
            active,
            header_height: HeaderHeight::Unmeasured,
            signal,
            memory,
            lists: Vec::new(),
            header_pull: 0.0,
            header_pull_tween: None,
            decay: None,
            gesture: None,
            phase: GesturePhase::Idle,
            refresh: RefreshState::default(),
            gliding: false,
            _memory_listener: memory_listener,
        })
    }

    pub fn options(&self) -> &SynchronizerOptions {
        &self.options
    }

    /// Enables or disables pull-to-refresh. Disabling does not cancel a refresh in flight.
    pub(crate) fn set_refresh_enabled(&mut self, enabled: bool) {
        self.options.refresh_enabled = enabled;
    }

    pub fn platform(&self) -> PlatformFamily {
        self.options.platform
    }

    pub fn routes(&self) -> &[TabRoute] {
        &self.routes
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_route(&self) -> &TabRoute {
        &self.routes[self.active]
    }

    /// The shared scroll signal. Clone it into every list adapter.
    pub fn signal(&self) -> &ScrollSignal {
        &self.signal
    }

    pub fn scroll_offset(&self) -> f32 {
        self.signal.value()
    }

    pub fn header_height(&self) -> HeaderHeight {
        self.header_height
    }

    pub fn remembered_offset(&self, key: &str) -> Option<f32> {
        self.memory.borrow().get(key)
    }

    /// The auxiliary pull signal (only moves on [`PlatformFamily::AuxiliarySignalPull`]).
    pub fn header_pull(&self) -> f32 {
        self.header_pull
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn gesture(&self) -> Option<GestureState> {
        self.gesture
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_active()
    }

    /// `true` while a list is in momentum scroll.
    pub fn is_gliding(&self) -> bool {
        self.gliding
    }

    /// Tab presses are rejected while a list is gliding.
    pub fn can_switch_tabs(&self) -> bool {
        !self.gliding
    }

    pub fn is_animating(&self) -> bool {
        self.decay.is_some() || self.header_pull_tween.is_some()
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.lists.iter().any(|l| l.key() == key)
    }

    pub fn mounted_count(&self) -> usize {
        self.lists.len()
    }

    /// Header translateY: `[0, h] -> [0, -h]`, clamped.
    pub fn header_translate_y(&self) -> f32 {
        let h = self.header_height.value();
        Interpolation::new((0.0, h), (0.0, -h)).sample(self.signal.value())
    }

    /// Tab bar translateY: `[0, h] -> [h, 0]`, clamped.
    pub fn tab_bar_translate_y(&self) -> f32 {
        let h = self.header_height.value();
        Interpolation::new((0.0, h), (h, 0.0)).sample(self.signal.value())
    }

    /// Refresh indicator translateY for the configured platform family.
    pub fn refresh_indicator_translate_y(&self) -> f32 {
        match self.options.platform {
            PlatformFamily::DirectListPull => {
                Interpolation::new((-100.0, 0.0), (120.0, 0.0)).sample(self.signal.value())
            }
            PlatformFamily::AuxiliarySignalPull => {
                Interpolation::new((-300.0, 0.0), (150.0, 0.0)).sample(self.header_pull)
            }
        }
    }

    /// Records the header's laid-out height. The first call moves the header to measured.
    pub fn on_header_layout(&mut self, height: f32) {
        if !height.is_finite() || height < 0.0 {
            cwarn!(height, "ignoring invalid header height");
            return;
        }
        if self.header_height == HeaderHeight::Measured(height) {
            return;
        }
        cdebug!(
            height,
            first = !self.header_height.is_measured(),
            "header measured"
        );
        self.header_height = HeaderHeight::Measured(height);
    }

    /// Registers a tab's list. The first registration per route key wins; later ones are
    /// ignored. Returns `true` when the handle was added.
    ///
    /// A list mounted while inactive is moved to match the current header state right away.
    pub fn register_list(&mut self, handle: ListHandle) -> bool {
        if !self.routes.iter().any(|r| r.key == handle.key()) {
            cwarn!(key = handle.key(), "ignoring list for unknown route");
            return false;
        }
        if self.is_mounted(handle.key()) {
            return false;
        }
        ctrace!(key = handle.key(), "list registered");
        self.lists.push(handle);

        let Some(header_height) = self.header_height.measured() else {
            return true;
        };
        let offset = self.signal.value();
        let active_key = self.routes[self.active].key.as_str();
        if let Some(list) = self.lists.last_mut().filter(|l| l.key() != active_key) {
            reconcile_list(list, &self.memory, offset, header_height);
        }
        true
    }

    /// Reports the active list's scroll offset into the shared signal.
    pub fn on_active_scroll_changed(&mut self, offset: f32) -> bool {
        self.signal.report(&self.routes[self.active].key, offset)
    }

    /// Makes tab `index` the owner of the scroll signal. Does not move any list.
    ///
    /// When the tab has a remembered offset it is republished so the header reflects it.
    /// Returns `false` for out-of-range or already-active indexes.
    pub fn on_tab_activated(&mut self, index: usize) -> bool {
        if index >= self.routes.len() || index == self.active {
            return false;
        }
        self.active = index;
        let key = self.routes[index].key.as_str();
        self.signal.set_owner(key);
        let remembered = self.memory.borrow().get(key);
        if let Some(offset) = remembered {
            self.signal.publish(offset);
        }
        cdebug!(index, key, "tab activated");
        true
    }

    /// Brings every mounted inactive tab in line with the current signal value.
    ///
    /// Returns the number of scroll commands issued; a second call with no intervening scroll
    /// issues none.
    pub fn reconcile_inactive_tabs(&mut self) -> usize {
        let Some(header_height) = self.header_height.measured() else {
            return 0;
        };
        let offset = self.signal.value();
        let active_key = self.routes[self.active].key.as_str();

        let mut issued = 0;
        for list in self.lists.iter_mut().filter(|l| l.key() != active_key) {
            if reconcile_list(list, &self.memory, offset, header_height) {
                issued += 1;
            }
        }
        ctrace!(offset, issued, "reconcile_inactive_tabs");
        issued
    }

    pub fn on_momentum_scroll_begin(&mut self) {
        self.gliding = true;
    }

    pub fn on_momentum_scroll_end(&mut self) {
        self.gliding = false;
        self.reconcile_inactive_tabs();
    }

    /// The user lifted their finger from a list body at `offset`.
    ///
    /// On the direct-list-pull family an overscroll beyond the pull distance starts a refresh.
    pub fn on_scroll_end_drag(
        &mut self,
        key: &str,
        offset: f32,
        now_ms: u64,
    ) -> Option<RefreshTicket> {
        self.reconcile_inactive_tabs();
        if self.options.platform != PlatformFamily::DirectListPull
            || key != self.routes[self.active].key
            || !(offset < -self.options.pull_to_refresh_distance)
        {
            return None;
        }
        self.begin_refresh(now_ms)
    }

    /// A touch landed on the header. Never claims the gesture.
    pub fn on_header_touch_start(&mut self) {
        self.stop_decay();
        self.reconcile_inactive_tabs();
    }

    /// Whether a move of `dy` should be claimed as a header drag.
    pub fn should_claim_header_drag(&mut self, dy: f32) -> bool {
        self.stop_decay();
        dy.is_finite() && dy.abs() > DRAG_CLAIM_THRESHOLD
    }

    /// The header drag was granted.
    pub fn on_header_drag_start(&mut self) {
        self.stop_decay();
        if !self.refresh.is_active() {
            self.header_pull_tween = None;
        }
        self.gesture = Some(GestureState {
            start_offset: self.signal.value(),
            delta: 0.0,
        });
        self.phase = GesturePhase::Dragging;
    }

    /// The header drag moved; `dy` is the cumulative vertical movement since the grant.
    pub fn on_header_drag_move(&mut self, dy: f32) {
        if !dy.is_finite() {
            return;
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        gesture.delta = dy;
        let offset = gesture.requested_offset();

        let refreshing = self.refresh.is_active();
        let active_key = self.routes[self.active].key.as_str();
        let Some(list) = self.lists.iter_mut().find(|l| l.key() == active_key) else {
            return;
        };

        if offset > 0.0 {
            list.scroll_to_offset(offset, false);
            return;
        }
        match self.options.platform {
            PlatformFamily::DirectListPull => {
                list.scroll_to_offset(offset / DIRECT_PULL_DAMPING, false);
            }
            PlatformFamily::AuxiliarySignalPull => {
                if !refreshing {
                    self.header_pull = offset / AUXILIARY_PULL_DAMPING;
                }
            }
        }
    }

    /// The header drag ended with vertical velocity `velocity_y` (units/ms).
    pub fn on_header_drag_end(&mut self, velocity_y: f32, now_ms: u64) -> ReleaseOutcome {
        if self.gesture.take().is_none() {
            return ReleaseOutcome::Settled;
        }
        self.phase = GesturePhase::Releasing;
        self.reconcile_inactive_tabs();

        let outcome = match self.options.platform {
            PlatformFamily::DirectListPull => self.release_direct(velocity_y, now_ms),
            PlatformFamily::AuxiliarySignalPull => self.release_auxiliary(now_ms),
        };
        self.phase = match outcome {
            ReleaseOutcome::Settled => GesturePhase::Idle,
            ReleaseOutcome::SnapBack => GesturePhase::SnappingBack,
            ReleaseOutcome::Decay => GesturePhase::Decaying,
            ReleaseOutcome::Refresh(_) => GesturePhase::Refreshing,
        };
        if self.refresh.is_active() {
            self.phase = GesturePhase::Refreshing;
        }
        ctrace!(phase = ?self.phase, "header released");
        outcome
    }

    fn release_direct(&mut self, velocity_y: f32, now_ms: u64) -> ReleaseOutcome {
        let offset = self.signal.value();
        if offset < 0.0 {
            if offset < -self.options.pull_to_refresh_distance && !self.refresh.is_active() {
                if let Some(ticket) = self.begin_refresh(now_ms) {
                    return ReleaseOutcome::Refresh(ticket);
                }
            }
            self.scroll_all_lists(0.0, true);
            return ReleaseOutcome::SnapBack;
        }
        if velocity_y.is_finite() && velocity_y.abs() >= DECAY_MIN_VELOCITY {
            self.decay = Some(Decay::new(offset, -velocity_y, now_ms));
            return ReleaseOutcome::Decay;
        }
        ReleaseOutcome::Settled
    }

    fn release_auxiliary(&mut self, now_ms: u64) -> ReleaseOutcome {
        // The indicator is held at its refresh position until the refresh settles.
        if self.refresh.is_active() {
            return ReleaseOutcome::Settled;
        }
        let pull = self.header_pull;
        if pull < 0.0 && pull / AUXILIARY_PULL_DAMPING < -self.options.pull_to_refresh_distance {
            if let Some(ticket) = self.begin_refresh(now_ms) {
                return ReleaseOutcome::Refresh(ticket);
            }
        }
        if pull == 0.0 {
            return ReleaseOutcome::Settled;
        }
        self.animate_header_pull(0.0, now_ms);
        ReleaseOutcome::SnapBack
    }

    /// Latches the refresh state and shows the refresh indicator.
    ///
    /// Returns `None` when refresh is disabled or one is already in flight.
    pub fn begin_refresh(&mut self, now_ms: u64) -> Option<RefreshTicket> {
        if !self.options.refresh_enabled {
            return None;
        }
        let ticket = self.refresh.latch()?;
        cdebug!(platform = ?self.options.platform, "refresh started");
        match self.options.platform {
            PlatformFamily::DirectListPull => self.scroll_all_lists(DIRECT_REFRESH_OFFSET, true),
            PlatformFamily::AuxiliarySignalPull => {
                self.animate_header_pull(AUXILIARY_REFRESH_OFFSET, now_ms)
            }
        }
        self.phase = GesturePhase::Refreshing;
        Some(ticket)
    }

    /// Settles a refresh started by `begin_refresh`.
    ///
    /// The latch is cleared and the baseline restored whatever `result` is; `result` is handed
    /// back to the caller unchanged.
    pub fn finish_refresh<E: Display>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<(), E>,
        now_ms: u64,
    ) -> Result<(), E> {
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::warn!(target: "collapsible_tabs", error = %err, "refresh failed");
        }
        if !self.refresh.release(&ticket) {
            cwarn!("ignoring a refresh ticket that is not in flight");
            return result;
        }

        let settled_phase = match self.options.platform {
            PlatformFamily::DirectListPull => {
                self.reconcile_inactive_tabs();
                if self.signal.value() < 0.0 {
                    self.scroll_all_lists(0.0, true);
                    GesturePhase::SnappingBack
                } else {
                    GesturePhase::Idle
                }
            }
            PlatformFamily::AuxiliarySignalPull => {
                self.animate_header_pull(0.0, now_ms);
                GesturePhase::SnappingBack
            }
        };
        if self.gesture.is_none() {
            self.phase = if self.decay.is_some() {
                GesturePhase::Decaying
            } else {
                settled_phase
            };
        }
        cdebug!(ok = result.is_ok(), "refresh finished");
        result
    }

    /// Runs synchronous refresh work between `begin_refresh` and `finish_refresh`.
    ///
    /// Returns `None` without calling `work` when no refresh could start.
    pub fn run_refresh<E: Display>(
        &mut self,
        now_ms: u64,
        work: impl FnOnce() -> Result<(), E>,
    ) -> Option<Result<(), E>> {
        let ticket = self.begin_refresh(now_ms)?;
        let result = work();
        Some(self.finish_refresh(ticket, result, now_ms))
    }

    /// Advances running animations. Returns `true` while anything is still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.tick_decay(now_ms);

        if let Some(tween) = self.header_pull_tween {
            self.header_pull = tween.sample(now_ms);
            if tween.is_done(now_ms) {
                self.header_pull_tween = None;
                if self.phase == GesturePhase::SnappingBack {
                    self.phase = GesturePhase::Idle;
                }
            }
        }

        if self.phase == GesturePhase::SnappingBack
            && self.options.platform == PlatformFamily::DirectListPull
            && self.signal.value() >= 0.0
        {
            self.phase = GesturePhase::Idle;
        }

        self.is_animating()
    }

    fn tick_decay(&mut self, now_ms: u64) {
        let Some(decay) = self.decay else {
            return;
        };
        let header_height = self.header_height.value();
        let value = decay.sample(now_ms);

        let settled = if value > header_height {
            // Finish the collapse, but never pull a deeper list back up to the header.
            if decay.from < header_height {
                if let Some(list) = self.active_list_mut() {
                    list.scroll_to_offset(header_height, false);
                }
            }
            true
        } else {
            if let Some(list) = self.active_list_mut() {
                list.scroll_to_offset(value.max(0.0), false);
            }
            value < 0.0 || decay.is_done(now_ms)
        };

        if settled {
            self.decay = None;
            if self.phase == GesturePhase::Decaying {
                self.phase = GesturePhase::Idle;
            }
            self.reconcile_inactive_tabs();
        }
    }

    fn stop_decay(&mut self) {
        if self.decay.take().is_some() && self.phase == GesturePhase::Decaying {
            self.phase = GesturePhase::Idle;
        }
    }

    fn animate_header_pull(&mut self, to: f32, now_ms: u64) {
        self.header_pull_tween = Some(Tween::new(
            self.header_pull,
            to,
            now_ms,
            AUXILIARY_ANIMATION_MS,
        ));
    }

    // Looked up by key on every call: the active tab may have changed since the last event.
    fn active_list_mut(&mut self) -> Option<&mut ListHandle> {
        let key = self.routes[self.active].key.as_str();
        self.lists.iter_mut().find(|l| l.key() == key)
    }

    fn scroll_all_lists(&mut self, offset: f32, animated: bool) {
        let active_key = self.routes[self.active].key.as_str();
        for list in &mut self.lists {
            list.scroll_to_offset(offset, animated);
            if list.key() != active_key {
                self.memory.borrow_mut().record(list.key(), offset);
            }
        }
    }
}

fn reconcile_list(
    list: &mut ListHandle,
    memory: &RefCell<OffsetMemory>,
    offset: f32,
    header_height: f32,
) -> bool {
    let remembered = memory.borrow().get(list.key());
    let Some(target) = reconcile_target(offset, header_height, remembered) else {
        return false;
    };
    list.scroll_to_offset(target, false);
    memory.borrow_mut().record(list.key(), target);
    true
}

fn validate_routes(routes: &[TabRoute]) -> Result<(), ConfigError> {
    if routes.is_empty() {
        return Err(ConfigError::NoRoutes);
    }
    for (i, route) in routes.iter().enumerate() {
        if routes[..i].iter().any(|r| r.key == route.key) {
            cwarn!(key = route.key.as_str(), "duplicate route key");
            return Err(ConfigError::DuplicateRouteKey(route.key.clone()));
        }
    }
    Ok(())
}
