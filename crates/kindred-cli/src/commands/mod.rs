//! Command implementations.

pub mod check;
pub mod config;
pub mod layout;
pub mod simulate;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::layout::execute_layout;
pub use self::simulate::execute_simulate;

use crate::config::Config;
use crate::error::Result;
use kindred_domain::GraphSnapshot;
use kindred_session::{FamilySession, ImportReport};
use kindred_store::MemoryStore;
use std::fs;
use std::path::Path;

/// Read a JSON snapshot file.
pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let contents = fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&contents)?;
    tracing::debug!(
        "Read {} people and {} relationships from {}",
        snapshot.people.len(),
        snapshot.relationships.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Open an in-memory session holding the snapshot at `path`.
pub async fn open_session(
    path: &Path,
    config: &Config,
) -> Result<(FamilySession<MemoryStore>, ImportReport)> {
    let snapshot = load_snapshot(path)?;
    let (mut session, _) = FamilySession::open(MemoryStore::new(), config.session_config()).await?;
    let report = session.import_snapshot(snapshot).await?;
    Ok((session, report))
}
