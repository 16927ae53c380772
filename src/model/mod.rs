pub mod snapshot;
pub mod work_item;

pub use snapshot::Snapshot;
pub use work_item::{DateWindow, Priority, WorkItem, WorkStatus};
