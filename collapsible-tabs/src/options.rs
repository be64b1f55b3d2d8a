use crate::{Color, ConfigError, PlatformFamily};

pub const DEFAULT_PULL_TO_REFRESH_DISTANCE: f32 = 150.0;
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 48.0;

/// Behaviour of the [`crate::Synchronizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynchronizerOptions {
    pub platform: PlatformFamily,
    /// Overscroll magnitude required to trigger a refresh.
    pub pull_to_refresh_distance: f32,
    /// Index of the tab that is active first. Out-of-range values fall back to the last tab.
    pub initial_tab_index: usize,
    /// Whether pull gestures may start a refresh at all. Hosts enable this when they have a
    /// refresh callback; [`crate::TabHost`] ignores it and enables refresh in `with_refresh`.
    pub refresh_enabled: bool,
}

impl Default for SynchronizerOptions {
    fn default() -> Self {
        Self {
            platform: PlatformFamily::current(),
            pull_to_refresh_distance: DEFAULT_PULL_TO_REFRESH_DISTANCE,
            initial_tab_index: 0,
            refresh_enabled: false,
        }
    }
}

impl SynchronizerOptions {
    pub fn new(platform: PlatformFamily) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_pull_to_refresh_distance(mut self, distance: f32) -> Self {
        self.pull_to_refresh_distance = distance;
        self
    }

    pub fn with_initial_tab_index(mut self, index: usize) -> Self {
        self.initial_tab_index = index;
        self
    }

    pub fn with_refresh_enabled(mut self, enabled: bool) -> Self {
        self.refresh_enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("pull_to_refresh_distance", self.pull_to_refresh_distance)
    }
}

/// Colours used by the tab host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabViewColors {
    pub header_background: Color,
    pub tab_bar_background: Color,
    pub indicator: Color,
    pub label: Color,
}

impl Default for TabViewColors {
    fn default() -> Self {
        Self {
            header_background: Color::rgb(0xFF, 0xA0, 0x88),
            tab_bar_background: Color::rgb(0xFF, 0xCC, 0x80),
            indicator: Color::rgb(0x22, 0x22, 0x22),
            label: Color::rgb(0x22, 0x22, 0x22),
        }
    }
}

/// Configuration for [`crate::TabHost`].
///
/// Every field has a default, so hosts usually start from `TabViewOptions::default()` and
/// override a few values with the `with_*` methods.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabViewOptions {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub behavior: SynchronizerOptions,
    pub tab_bar_height: Option<f32>,
    pub colors: TabViewColors,
}

impl TabViewOptions {
    pub fn tab_bar_height(&self) -> f32 {
        self.tab_bar_height.unwrap_or(DEFAULT_TAB_BAR_HEIGHT)
    }

    pub fn with_behavior(mut self, behavior: SynchronizerOptions) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.behavior.platform = platform;
        self
    }

    pub fn with_pull_to_refresh_distance(mut self, distance: f32) -> Self {
        self.behavior.pull_to_refresh_distance = distance;
        self
    }

    pub fn with_initial_tab_index(mut self, index: usize) -> Self {
        self.behavior.initial_tab_index = index;
        self
    }

    pub fn with_tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = Some(height);
        self
    }

    pub fn with_colors(mut self, colors: TabViewColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_header_background(mut self, color: Color) -> Self {
        self.colors.header_background = color;
        self
    }

    pub fn with_tab_bar_background(mut self, color: Color) -> Self {
        self.colors.tab_bar_background = color;
        self
    }

    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.colors.indicator = color;
        self
    }

    pub fn with_label_color(mut self, color: Color) -> Self {
        self.colors.label = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behavior.validate()?;
        non_negative("tab_bar_height", self.tab_bar_height())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber { name, value })
    }
}
