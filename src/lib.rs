//! Scheduling visualization engine for shop-floor work items.
//!
//! The engine lays work items out on a calendar grid, groups them by
//! machine, person or project with utilization figures, and turns pointer
//! input into reschedule requests. It never persists anything: the host
//! owns the work-item collection and applies the [`engine::ChartEvent`]s
//! the engine hands back.
//!
//! # Modules
//!
//! - **`model`**: `WorkItem`, `DateWindow`, status and priority tags
//! - **`engine`**: grid builder, coordinate mapper, grouping, interaction
//!   state machine, minimap sync, zoom, and the `GanttEngine` façade
//! - **`io`**: JSON snapshot and CSV import/export of work items
//! - **`config`**: persisted chart settings

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;

pub use error::{GanttError, Result};
