/// Rejected configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one tab route is required")]
    NoRoutes,
    #[error("duplicate tab route key {0:?}")]
    DuplicateRouteKey(String),
    #[error("`{name}` must be finite and non-negative (got {value})")]
    InvalidNumber { name: &'static str, value: f32 },
}

/// Failure reported by the host's refresh work.
///
/// A failed refresh is logged and otherwise handled exactly like a successful one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("refresh failed: {message}")]
pub struct RefreshError {
    message: String,
}

impl RefreshError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
