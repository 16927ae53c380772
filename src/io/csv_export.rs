use std::path::Path;

use crate::error::Result;
use crate::model::WorkItem;

const HEADER: [&str; 12] = [
    "Id",
    "Title",
    "Order Number",
    "Planned Start",
    "Planned End",
    "Due Date",
    "Machines",
    "Assignee",
    "Project",
    "Progress",
    "Status",
    "Priority",
];

fn record(item: &WorkItem) -> [String; 12] {
    [
        item.id.clone(),
        item.title.clone(),
        item.order_number.clone().unwrap_or_default(),
        item.planned_start.clone(),
        item.planned_end.clone().unwrap_or_default(),
        item.due_date.clone().unwrap_or_default(),
        item.machines.join("|"),
        item.assignee.clone().unwrap_or_default(),
        item.project.clone().unwrap_or_default(),
        item.progress_percent().to_string(),
        item.status.label().to_string(),
        item.priority.label().to_string(),
    ]
}

/// Export work items to a semicolon-delimited CSV file that
/// [`import_csv`](super::import_csv) reads back.
///
/// Returns the number of items written.
pub fn export_csv(items: &[WorkItem], path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    wtr.write_record(HEADER)?;
    for item in items {
        wtr.write_record(record(item))?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), items = items.len(), "CSV exported");
    Ok(items.len())
}
