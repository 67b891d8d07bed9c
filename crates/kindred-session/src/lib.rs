//! Kindred Session
//!
//! Wires the graph model, layout engine, physics engine and a repository together.
//!
//! The session provides:
//! - Opening a family from any `FamilyRepository`, with a report of unusable records
//! - Optimistic mutations: validated and applied in memory, then persisted
//! - Automatic re-layout and re-anchoring after every structural change
//! - Drag-and-persist: a dropped person keeps their position across sessions
//! - Snapshot import under fresh ids, reporting every record left out
//! - TOML configuration for all engines
//!
//! # Configuration
//!
//! ```toml
//! [graph]
//! link_spouse_children = true
//!
//! [layout]
//! vertical_spacing = 4.0
//! horizontal_spacing = 3.0
//!
//! [physics]
//! max_drag_radius = 3.0
//! seed = 7
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod import;
mod session;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use import::{ImportIssue, ImportReport, ImportSkip};
pub use session::FamilySession;
