use collapsible_tabs::{ConfigError, PlatformFamily};

use crate::ListItem;

/// Gap between grid cells (and at both edges) used for the default grid item width.
pub const GRID_GUTTER: f32 = 10.0;

/// Size and main-axis offset handed to the engine for one item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub size: f32,
    pub offset: f32,
}

/// Which visible items count as "viewable" for the preload hook.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewabilityConfig {
    /// Percentage of the viewport an item must cover.
    pub view_area_coverage_percent_threshold: f32,
    pub minimum_view_time_ms: u64,
}

impl Default for ViewabilityConfig {
    fn default() -> Self {
        Self {
            view_area_coverage_percent_threshold: 10.0,
            minimum_view_time_ms: 100,
        }
    }
}

/// Cell-recycling list with estimated item sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainListOptions {
    pub estimated_item_size: f32,
    pub num_columns: usize,
    /// Fraction of the visible length from the end at which "end reached" fires.
    pub end_reached_threshold: f32,
    /// Extra distance rendered ahead of the viewport.
    pub draw_distance: f32,
}

impl PlainListOptions {
    pub fn new(platform: PlatformFamily, estimated_item_size: f32) -> Self {
        Self {
            estimated_item_size,
            num_columns: 1,
            end_reached_threshold: 0.2,
            draw_distance: render_ahead_for(platform),
        }
    }

    pub fn with_num_columns(mut self, num_columns: usize) -> Self {
        self.num_columns = num_columns;
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: f32) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_draw_distance(mut self, distance: f32) -> Self {
        self.draw_distance = distance;
        self
    }
}

/// Windowed list rendering items in batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowedListOptions {
    pub max_to_render_per_batch: usize,
    /// Rendered window, in viewport lengths.
    pub window_size: usize,
    pub batching_period_ms: u64,
    pub initial_num_to_render: usize,
    pub remove_clipped_subviews: bool,
}

impl WindowedListOptions {
    pub fn new(platform: PlatformFamily) -> Self {
        Self {
            max_to_render_per_batch: 10,
            window_size: 5,
            batching_period_ms: 50,
            initial_num_to_render: 10,
            remove_clipped_subviews: platform == PlatformFamily::AuxiliarySignalPull,
        }
    }

    pub fn with_max_to_render_per_batch(mut self, n: usize) -> Self {
        self.max_to_render_per_batch = n;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_initial_num_to_render(mut self, n: usize) -> Self {
        self.initial_num_to_render = n;
        self
    }
}

/// Recycler with fixed-height rows, optionally laid out as a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecyclingListOptions {
    pub item_height: f32,
    pub num_columns: usize,
    pub window_width: f32,
    /// Overrides the computed cell width when laid out as a grid.
    pub grid_item_width: Option<f32>,
    /// Distance from the end, in units, at which "end reached" fires.
    pub end_reached_threshold: f32,
    /// Spacer rendered after the footer.
    pub footer_spacer: f32,
    pub render_ahead_offset: f32,
}

impl RecyclingListOptions {
    pub fn new(platform: PlatformFamily, item_height: f32, window_width: f32) -> Self {
        Self {
            item_height,
            num_columns: 1,
            window_width,
            grid_item_width: None,
            end_reached_threshold: 20.0,
            footer_spacer: 20.0,
            render_ahead_offset: render_ahead_for(platform),
        }
    }

    pub fn with_num_columns(mut self, num_columns: usize) -> Self {
        self.num_columns = num_columns;
        self
    }

    pub fn with_grid_item_width(mut self, width: f32) -> Self {
        self.grid_item_width = Some(width);
        self
    }

    pub fn is_grid(&self) -> bool {
        self.num_columns > 1
    }

    /// Cell width: the window width for a single column, otherwise the configured grid width or
    /// the window width split into columns with a gutter between and around them.
    pub fn item_width(&self) -> f32 {
        if !self.is_grid() {
            return self.window_width;
        }
        self.grid_item_width.unwrap_or_else(|| {
            let columns = self.num_columns as f32;
            ((self.window_width - (columns + 1.0) * GRID_GUTTER) / columns).max(0.0)
        })
    }
}

/// The list engine flavour backing an [`crate::AnimatedList`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    Plain(PlainListOptions),
    Windowed(WindowedListOptions),
    Recycling(RecyclingListOptions),
}

impl ListKind {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Plain(o) => {
                positive("estimated_item_size", o.estimated_item_size)?;
                columns(o.num_columns)?;
                non_negative("end_reached_threshold", o.end_reached_threshold)?;
                non_negative("draw_distance", o.draw_distance)
            }
            Self::Windowed(o) => {
                if o.max_to_render_per_batch == 0 {
                    return Err(ConfigError::InvalidNumber {
                        name: "max_to_render_per_batch",
                        value: 0.0,
                    });
                }
                if o.window_size == 0 {
                    return Err(ConfigError::InvalidNumber {
                        name: "window_size",
                        value: 0.0,
                    });
                }
                Ok(())
            }
            Self::Recycling(o) => {
                positive("item_height", o.item_height)?;
                columns(o.num_columns)?;
                non_negative("window_width", o.window_width)?;
                if let Some(width) = o.grid_item_width {
                    non_negative("grid_item_width", width)?;
                }
                non_negative("end_reached_threshold", o.end_reached_threshold)?;
                non_negative("render_ahead_offset", o.render_ahead_offset)
            }
        }
    }

    /// The layout override the engine should use for the item at `index`, if any.
    ///
    /// - `Plain`: only items that know both their height and offset.
    /// - `Windowed`: every item, with unknown values as 0.
    /// - `Recycling`: fixed row height at the item's row offset.
    pub fn item_layout<T: ListItem>(&self, index: usize, item: &T) -> Option<ItemLayout> {
        match self {
            Self::Plain(_) => match (item.height(), item.offset()) {
                (Some(size), Some(offset)) if size > 0.0 => Some(ItemLayout { size, offset }),
                _ => None,
            },
            Self::Windowed(_) => Some(ItemLayout {
                size: item.height().unwrap_or(0.0),
                offset: item.offset().unwrap_or(0.0),
            }),
            Self::Recycling(o) => {
                let row = index / o.num_columns.max(1);
                Some(ItemLayout {
                    size: o.item_height,
                    offset: row as f32 * o.item_height,
                })
            }
        }
    }

    pub fn item_layouts<T: ListItem>(&self, items: &[T]) -> Vec<Option<ItemLayout>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.item_layout(i, item))
            .collect()
    }
}

fn render_ahead_for(platform: PlatformFamily) -> f32 {
    match platform {
        PlatformFamily::DirectListPull => 500.0,
        PlatformFamily::AuxiliarySignalPull => 1000.0,
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ConfigError::InvalidNumber { name, value })
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ConfigError::InvalidNumber { name, value })
}

fn columns(n: usize) -> Result<(), ConfigError> {
    if n == 0 {
        return Err(ConfigError::InvalidNumber {
            name: "num_columns",
            value: 0.0,
        });
    }
    Ok(())
}
