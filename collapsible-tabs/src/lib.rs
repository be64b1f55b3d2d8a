//! A headless scroll-synchronization engine for collapsible-header tab views.
//!
//! A tab view with a shared header has one header but many independently scrolling lists (one
//! per tab). This crate keeps them visually consistent:
//!
//! - a shared [`ScrollSignal`] carries the active tab's scroll offset
//! - the [`Synchronizer`] derives header/tab-bar transforms from it, remembers each tab's
//!   offset, reconciles inactive tabs, and runs the header drag / pull-to-refresh state machine
//! - the [`TabHost`] composes header, tab bar and scenes for a host UI
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - the header's measured height
//! - list scroll offsets and scroll lifecycle events
//! - header pan gestures (delta and release velocity)
//! - an imperative scroll capability per list ([`ScrollHandle`])
//! - a frame clock for `tick(now_ms)`
//!
//! For list-engine adapters, see the `collapsible-tabs-adapter` crate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animation;
mod error;
mod gesture;
mod handle;
mod host;
mod options;
mod signal;
mod synchronizer;
mod types;


pub use animation::{Decay, Tween};
pub use error::{ConfigError, RefreshError};
pub use gesture::{
    AUXILIARY_ANIMATION_MS, AUXILIARY_PULL_DAMPING, AUXILIARY_REFRESH_OFFSET, DECAY_MIN_VELOCITY,
    DIRECT_PULL_DAMPING, DIRECT_REFRESH_OFFSET, DRAG_CLAIM_THRESHOLD, GesturePhase, GestureState,
    RefreshState, RefreshTicket, ReleaseOutcome,
};
pub use handle::{ListHandle, OffsetMemory, ScrollHandle};
pub use host::{
    HeaderView, HostBody, HostView, LoadingView, RefreshIndicatorView, SceneEvent, SceneProps,
    TabBarView, TabHost, TabLabel, UNFOCUSED_LABEL_OPACITY,
};
pub use options::{
    DEFAULT_PULL_TO_REFRESH_DISTANCE, DEFAULT_TAB_BAR_HEIGHT, SynchronizerOptions, TabViewColors,
    TabViewOptions,
};
pub use signal::{ScrollSignal, Subscription};
pub use synchronizer::Synchronizer;
pub use types::{Color, ColorParseError, HeaderHeight, Interpolation, PlatformFamily, TabRoute};
