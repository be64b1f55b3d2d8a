//! List adapters for the `collapsible-tabs` crate.
//!
//! Each tab of a collapsible tab view owns one list. Whatever engine draws it (a cell
//! recycler with estimated sizes, a batched windowed list, or a fixed-row recycler), the list
//! must offer the synchronizer the same things:
//!
//! - every scroll offset, reported into the tab's [`collapsible_tabs::ScrollSignal`]
//! - an imperative scroll command, handed over once as a [`collapsible_tabs::ListHandle`]
//! - a preload hook for items entering the viewport
//!
//! [`AnimatedList`] provides that contract over any [`ListBackend`], configured by a
//! [`ListKind`]. This crate is framework-agnostic: the backend is the seam to a real engine.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod backend;
mod item;
mod kind;
mod list;

#[cfg(test)]
mod tests;

pub use backend::{BackendConfig, ListBackend, SCROLL_EVENT_THROTTLE_MS};
pub use item::{ListItem, PreloadError};
pub use kind::{
    GRID_GUTTER, ItemLayout, ListKind, PlainListOptions, RecyclingListOptions, ViewabilityConfig,
    WindowedListOptions,
};
pub use list::{AnimatedList, ScrollableList};
