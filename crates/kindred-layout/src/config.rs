//! Spacing configuration for the layout engine

use serde::{Deserialize, Serialize};

/// Spacing constants for the generational layout
///
/// # Examples
///
/// ```
/// use kindred_layout::LayoutConfig;
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.vertical_spacing, 4.0);
///
/// let config = LayoutConfig::compact();
/// assert!(config.horizontal_spacing < LayoutConfig::default().horizontal_spacing);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Distance between generation rows
    /// Default: 4.0
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,

    /// Minimum gap between neighbouring units (siblings, unrelated clusters)
    /// Default: 3.0
    #[serde(default = "default_horizontal_spacing")]
    pub horizontal_spacing: f64,

    /// Gap between spouses placed side by side
    /// Default: 1.5
    #[serde(default = "default_couple_spacing")]
    pub couple_spacing: f64,

    /// Depth offset per layer when clusters would overlap
    /// Default: 1.0
    #[serde(default = "default_depth_spacing")]
    pub depth_spacing: f64,
}

fn default_vertical_spacing() -> f64 {
    4.0
}

fn default_horizontal_spacing() -> f64 {
    3.0
}

fn default_couple_spacing() -> f64 {
    1.5
}

fn default_depth_spacing() -> f64 {
    1.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: default_vertical_spacing(),
            horizontal_spacing: default_horizontal_spacing(),
            couple_spacing: default_couple_spacing(),
            depth_spacing: default_depth_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Tighter spacing for large trees
    pub fn compact() -> Self {
        Self {
            vertical_spacing: 2.5,
            horizontal_spacing: 1.8,
            couple_spacing: 1.0,
            depth_spacing: 0.6,
        }
    }

    /// Roomier spacing for small trees
    pub fn spacious() -> Self {
        Self {
            vertical_spacing: 6.0,
            horizontal_spacing: 4.5,
            couple_spacing: 2.0,
            depth_spacing: 1.5,
        }
    }
}
