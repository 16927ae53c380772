pub mod dialogs;
pub mod gantt_chart;
pub mod item_editor;
pub mod minimap;
pub mod resource_panel;
pub mod status_bar;
pub mod theme;
pub mod toolbar;
