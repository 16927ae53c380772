use serde::{Deserialize, Serialize};

use crate::model::{Priority, WorkItem, WorkStatus};

/// Search and tag filters, applied before grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    pub search: String,
    pub status: Option<WorkStatus>,
    pub priority: Option<Priority>,
}

impl ItemFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some() || self.priority.is_some()
    }

    /// Case-insensitive search over title, id, order number, project,
    /// assignee and machines, combined with the tag filters.
    pub fn matches(&self, item: &WorkItem) -> bool {
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != item.priority) {
            return false;
        }
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&query);
        hit(&item.title)
            || hit(&item.id)
            || item.order_number.as_deref().is_some_and(hit)
            || item.project.as_deref().is_some_and(hit)
            || item.assignee.as_deref().is_some_and(hit)
            || item.machines.iter().any(|m| hit(m))
    }

    pub fn apply<'a>(&self, items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<WorkItem> {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut a = WorkItem::new("W-001", "Flange weld", day, day);
        a.machines = vec!["Welder-3".into()];
        a.status = WorkStatus::Processing;
        a.priority = Priority::High;
        let mut b = WorkItem::new("W-002", "Cover plate", day, day);
        b.project = Some("Northwind".into());
        b.status = WorkStatus::Delayed;
        vec![a, b]
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let items = sample();
        let filter = ItemFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&items).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let items = sample();
        let by_machine = ItemFilter {
            search: "welder".into(),
            ..Default::default()
        };
        assert_eq!(by_machine.apply(&items)[0].id, "W-001");
        let by_project = ItemFilter {
            search: "NORTH".into(),
            ..Default::default()
        };
        assert_eq!(by_project.apply(&items)[0].id, "W-002");
    }

    #[test]
    fn test_tag_filters_combine() {
        let items = sample();
        let filter = ItemFilter {
            search: String::new(),
            status: Some(WorkStatus::Processing),
            priority: Some(Priority::Medium),
        };
        assert!(filter.apply(&items).is_empty());
        let filter = ItemFilter {
            priority: Some(Priority::High),
            ..filter
        };
        assert_eq!(filter.apply(&items).len(), 1);
    }
}
