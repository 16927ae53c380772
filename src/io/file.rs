use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{Snapshot, WorkItem};

/// Either a full snapshot or a bare item array, as exported by the store.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Snapshot(Snapshot),
    Items(Vec<WorkItem>),
}

/// Save a snapshot to a JSON file.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), items = snapshot.items.len(), "snapshot saved");
    Ok(())
}

/// Load a snapshot from a JSON file. A bare array of work items is wrapped
/// in a snapshot named after the file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot = match serde_json::from_str(&json)? {
        SnapshotFile::Snapshot(s) => s,
        SnapshotFile::Items(items) => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Snapshot {
                items,
                ..Snapshot::new(name)
            }
        }
    };
    tracing::info!(path = %path.display(), items = snapshot.items.len(), "snapshot loaded");
    Ok(snapshot)
}
