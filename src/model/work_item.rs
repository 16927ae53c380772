use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, Result};

/// Date format written back into work items on reschedule.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle tag of a work item. Only used for colouring and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Planning,
    DataPrep,
    Processing,
    Finishing,
    Completed,
    Delayed,
}

impl WorkStatus {
    pub fn all() -> &'static [WorkStatus] {
        &[
            WorkStatus::Planning,
            WorkStatus::DataPrep,
            WorkStatus::Processing,
            WorkStatus::Finishing,
            WorkStatus::Completed,
            WorkStatus::Delayed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::Planning => "Planning",
            WorkStatus::DataPrep => "Data Prep",
            WorkStatus::Processing => "Processing",
            WorkStatus::Finishing => "Finishing",
            WorkStatus::Completed => "Completed",
            WorkStatus::Delayed => "Delayed",
        }
    }

    /// Lenient parse used by the CSV importer.
    pub fn parse(s: &str) -> Option<WorkStatus> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "planning" | "planned" | "new" | "not-started" => Some(WorkStatus::Planning),
            "data-prep" | "in-data-prep" | "dataprep" | "prep" => Some(WorkStatus::DataPrep),
            "processing" | "in-progress" | "active" | "started" => Some(WorkStatus::Processing),
            "finishing" => Some(WorkStatus::Finishing),
            "completed" | "complete" | "done" | "finished" => Some(WorkStatus::Completed),
            "delayed" | "late" => Some(WorkStatus::Delayed),
            _ => None,
        }
    }
}

/// Display-only priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" | "med" | "normal" => Some(Priority::Medium),
            "high" | "urgent" | "critical" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Inclusive calendar window of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Days between start and end (0 for a single-day item).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of calendar days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        self.span_days() + 1
    }

    /// Same duration, shifted so it starts on `start`.
    pub fn moved_to(&self, start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(self.span_days()),
        }
    }

    pub fn overlaps(&self, other: &DateWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A schedulable unit of shop-floor work, as delivered by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub planned_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_end: Option<String>,
    /// Used as the end date when `planned_end` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub machines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Project or client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl WorkItem {
    /// Create a work item spanning `start..=end`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order_number: None,
            planned_start: start.format(DATE_FORMAT).to_string(),
            planned_end: Some(end.format(DATE_FORMAT).to_string()),
            due_date: None,
            machines: Vec::new(),
            assignee: None,
            project: None,
            progress: 0,
            status: WorkStatus::default(),
            priority: Priority::default(),
        }
    }

    /// Parse and validate the scheduling window.
    pub fn window(&self) -> Result<DateWindow> {
        let start = parse_item_date(&self.id, "planned start", &self.planned_start)?;
        let (field, raw) = match (&self.planned_end, &self.due_date) {
            (Some(end), _) if !end.trim().is_empty() => ("planned end", end),
            (_, Some(due)) if !due.trim().is_empty() => ("due", due),
            _ => {
                return Err(GanttError::MissingEndDate {
                    item_id: self.id.clone(),
                })
            }
        };
        let end = parse_item_date(&self.id, field, raw)?;
        if start > end {
            return Err(GanttError::InvertedRange {
                item_id: self.id.clone(),
                start,
                end,
            });
        }
        Ok(DateWindow { start, end })
    }

    /// A copy of this item carrying `window` as its planned dates.
    pub fn rescheduled(&self, window: DateWindow) -> WorkItem {
        let mut item = self.clone();
        item.planned_start = window.start.format(DATE_FORMAT).to_string();
        item.planned_end = Some(window.end.format(DATE_FORMAT).to_string());
        item
    }

    /// Progress clamped to 0..=100.
    pub fn progress_percent(&self) -> u8 {
        self.progress.min(100)
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkStatus::Completed
    }
}

/// Parse one of the date representations the store produces.
fn parse_item_date(item_id: &str, field: &'static str, value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| GanttError::InvalidDate {
        item_id: item_id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_from_planned_dates() {
        let item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        let window = item.window().unwrap();
        assert_eq!(window.start, d(2025, 1, 10));
        assert_eq!(window.end, d(2025, 1, 12));
        assert_eq!(window.span_days(), 2);
        assert_eq!(window.duration_days(), 3);
    }

    #[test]
    fn test_due_date_fallback() {
        let mut item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        item.planned_end = None;
        item.due_date = Some("2025-01-20T09:00:00+09:00".into());
        assert_eq!(item.window().unwrap().end, d(2025, 1, 20));
    }

    #[test]
    fn test_missing_end_is_error() {
        let mut item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        item.planned_end = Some("  ".into());
        assert!(matches!(
            item.window(),
            Err(GanttError::MissingEndDate { .. })
        ));
    }

    #[test]
    fn test_unparseable_date_is_reported_not_coerced() {
        let mut item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        item.planned_start = "next tuesday".into();
        match item.window() {
            Err(GanttError::InvalidDate { field, value, .. }) => {
                assert_eq!(field, "planned start");
                assert_eq!(value, "next tuesday");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_range_is_error() {
        let item = WorkItem::new("W1", "Bracket", d(2025, 1, 12), d(2025, 1, 10));
        assert!(matches!(
            item.window(),
            Err(GanttError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_rescheduled_keeps_due_date() {
        let mut item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        item.due_date = Some("2025-01-31".into());
        let moved = item.rescheduled(DateWindow::new(d(2025, 1, 15), d(2025, 1, 17)));
        assert_eq!(moved.planned_start, "2025-01-15");
        assert_eq!(moved.planned_end.as_deref(), Some("2025-01-17"));
        assert_eq!(moved.due_date.as_deref(), Some("2025-01-31"));
    }

    #[test]
    fn test_deserialize_store_document() {
        let json = r#"{
            "id": "abc123",
            "title": "Panel cut",
            "plannedStart": "2025-03-01",
            "dueDate": "2025-03-04",
            "machines": ["Laser-1", "Press-2"],
            "progress": 140,
            "status": "data-prep",
            "priority": "high"
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, WorkStatus::DataPrep);
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.progress_percent(), 100);
        assert_eq!(item.window().unwrap().end, d(2025, 3, 4));
    }

    #[test]
    fn test_status_parse_is_lenient() {
        assert_eq!(WorkStatus::parse("In Data Prep"), Some(WorkStatus::DataPrep));
        assert_eq!(WorkStatus::parse("done"), Some(WorkStatus::Completed));
        assert_eq!(WorkStatus::parse("???"), None);
    }
}
