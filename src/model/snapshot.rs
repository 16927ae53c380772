use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::work_item::WorkItem;

/// A saved set of work items, as the host keeps it between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub items: Vec<WorkItem>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            name: "Untitled Schedule".to_string(),
            items: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Snapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Replace the item with the same id. Returns false if it is gone.
    pub fn replace_item(&mut self, updated: WorkItem) -> bool {
        match self.items.iter_mut().find(|i| i.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.touch();
                true
            }
            None => false,
        }
    }
}
