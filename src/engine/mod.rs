//! Scheduling core: calendar grid, coordinates, grouping, interaction.
//!
//! Nothing here depends on egui; the host feeds pointer positions in
//! content coordinates and applies the returned events.

pub mod chart;
pub mod coords;
pub mod filter;
pub mod grid;
pub mod grouping;
pub mod interaction;
pub mod minimap;
pub mod zoom;

pub use chart::{ChartEvent, ChartLayout, GanttEngine, GroupRow, ItemRow, ScheduleWarning};
pub use coords::BarGeometry;
pub use filter::ItemFilter;
pub use grid::{CalendarDay, CalendarGrid, ProjectWindow};
pub use grouping::{GroupingDimension, ResourceGroup, ResourceGroups, UNASSIGNED};
pub use interaction::{DragMode, Edge, InteractionState, ItemMutation, MutationKind, Pointer};
pub use minimap::{ScrollCommand, ScrollPane, ScrollSync, ViewportState};
pub use zoom::ZoomController;
