/// Failure reported by an item's preload hook. Logged and otherwise ignored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("preload failed: {message}")]
pub struct PreloadError {
    message: String,
}

impl PreloadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An item shown by an [`crate::AnimatedList`].
///
/// Every capability is optional. Items that know their laid-out height and offset let the
/// engine skip measuring them.
pub trait ListItem {
    fn height(&self) -> Option<f32> {
        None
    }

    fn offset(&self) -> Option<f32> {
        None
    }

    /// Called when the item becomes visible. `None` means the item has nothing to preload.
    fn preload(&mut self) -> Option<Result<(), PreloadError>> {
        None
    }
}
