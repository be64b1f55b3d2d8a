use std::collections::HashMap;
use std::fmt;

/// An imperative scroll capability exposed by a mounted list.
pub trait ScrollHandle {
    fn scroll_to_offset(&mut self, offset: f32, animated: bool);
}

impl<F: FnMut(f32, bool)> ScrollHandle for F {
    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self(offset, animated)
    }
}

/// A mounted tab's scrollable list, identified by its route key.
pub struct ListHandle {
    key: String,
    value: Box<dyn ScrollHandle>,
}

impl ListHandle {
    pub fn new(key: impl Into<String>, handle: impl ScrollHandle + 'static) -> Self {
        Self {
            key: key.into(),
            value: Box::new(handle),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        self.value.scroll_to_offset(offset, animated);
    }
}

impl fmt::Debug for ListHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHandle")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Last-known scroll offset per route key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetMemory {
    offsets: HashMap<String, f32>,
}

impl OffsetMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.offsets.get(key).copied()
    }

    pub fn record(&mut self, key: &str, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        match self.offsets.get_mut(key) {
            Some(slot) => *slot = offset,
            None => {
                self.offsets.insert(key.to_owned(), offset);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Where an inactive tab must be moved so that selecting it shows the same header state as the
/// active tab, or `None` when it is already consistent.
///
/// - partially collapsed header (`0 <= offset < header_height`): follow the active tab exactly;
/// - fully collapsed header: lift the tab to `header_height` only if it sits below it, leaving
///   deeper scroll positions alone;
/// - overscroll (`offset < 0`): leave every tab alone.
pub(crate) fn reconcile_target(
    offset: f32,
    header_height: f32,
    remembered: Option<f32>,
) -> Option<f32> {
    if !offset.is_finite() || offset < 0.0 {
        return None;
    }
    if offset < header_height {
        return (remembered != Some(offset)).then_some(offset);
    }
    match remembered {
        Some(m) if m >= header_height => None,
        _ => Some(header_height),
    }
}
