//! Kindred Physics
//!
//! Spring-based interaction on top of the layout anchors.
//!
//! The physics engine provides:
//! - One body per person, sprung to its anchor with exponential damping
//! - Dragging clamped to a radius around the anchor
//! - Sticky manual placement that survives re-layout
//! - Bounded idle drift for settled bodies
//!
//! Time only moves when the caller ticks the engine.

#![warn(missing_docs)]

mod body;
mod config;
mod engine;

pub use body::{clamp_to_radius, Body};
pub use config::PhysicsConfig;
pub use engine::PhysicsEngine;
