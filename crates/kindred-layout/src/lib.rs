//! Kindred Layout Engine
//!
//! Turns a family graph into 3D anchor positions.
//!
//! The layout engine provides:
//! - Generation rows (longest parent path, spouses aligned on one row)
//! - Spouse units and sibling clusters centred under their parents
//! - Depth layers that separate half-sibling groups
//! - Override positions for people placed by hand
//! - A bounding box for camera fitting
//!
//! Everything is recomputed from scratch on each call; there is no incremental state.

#![warn(missing_docs)]

mod bounds;
mod config;
mod generation;
mod index;
mod layout;
mod placement;

pub use bounds::BoundingBox;
pub use config::LayoutConfig;
pub use layout::{compute_layout, Layout};
