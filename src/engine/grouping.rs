//! Resource grouping and utilization.
//!
//! Grouping is a full recomputation every time: the collections here are
//! tens to a few hundred items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::grid::CalendarGrid;
use crate::model::WorkItem;

/// Group name for items with no resource in the chosen dimension.
pub const UNASSIGNED: &str = "Unassigned";

/// Which resource the chart partitions items by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingDimension {
    #[default]
    Machine,
    Person,
    Project,
}

impl GroupingDimension {
    pub fn all() -> &'static [GroupingDimension] {
        &[
            GroupingDimension::Machine,
            GroupingDimension::Person,
            GroupingDimension::Project,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupingDimension::Machine => "Machine",
            GroupingDimension::Person => "Person",
            GroupingDimension::Project => "Project",
        }
    }

    /// Resource names `item` belongs to. Machines fan out: an item on two
    /// machines belongs to both groups.
    pub fn resources<'a>(&self, item: &'a WorkItem) -> Vec<&'a str> {
        let mut names: Vec<&str> = match self {
            GroupingDimension::Machine => item.machines.iter().map(String::as_str).collect(),
            GroupingDimension::Person => item.assignee.as_deref().into_iter().collect(),
            GroupingDimension::Project => item.project.as_deref().into_iter().collect(),
        };
        names = names
            .into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        let mut seen = Vec::with_capacity(names.len());
        names.retain(|n| {
            if seen.contains(n) {
                false
            } else {
                seen.push(*n);
                true
            }
        });
        names
    }
}

/// Items sharing one resource, with their combined occupancy.
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    pub resource_name: String,
    pub items: Vec<WorkItem>,
    /// Percent of the visible window occupied. Above 100 means overbooked.
    pub utilization: f64,
}

impl ResourceGroup {
    pub fn is_overbooked(&self) -> bool {
        self.utilization > 100.0
    }

    pub fn is_unassigned(&self) -> bool {
        self.resource_name == UNASSIGNED
    }
}

/// Sum of each item's visible scheduled days over the visible day count.
///
/// The denominator is always the whole visible grid, even for items that
/// only partly overlap it. Items whose dates do not parse contribute 0.
pub fn utilization(items: &[WorkItem], grid: &CalendarGrid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let scheduled: usize = items
        .iter()
        .filter_map(|item| item.window().ok())
        .map(|window| grid.visible_days_in(window))
        .sum();
    scheduled as f64 / grid.len() as f64 * 100.0
}

/// Resource name → group, iterated by name with "Unassigned" last.
#[derive(Debug, Clone, Default)]
pub struct ResourceGroups {
    groups: BTreeMap<String, ResourceGroup>,
}

impl ResourceGroups {
    pub fn get(&self, resource_name: &str) -> Option<&ResourceGroup> {
        self.groups.get(resource_name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceGroup> {
        self.groups
            .values()
            .filter(|g| !g.is_unassigned())
            .chain(self.groups.get(UNASSIGNED))
    }

    pub fn overbooked(&self) -> impl Iterator<Item = &ResourceGroup> {
        self.iter().filter(|g| g.is_overbooked())
    }
}

/// Partition `items` by `dimension` and compute each group's utilization.
pub fn group_items<'a, I>(items: I, dimension: GroupingDimension, grid: &CalendarGrid) -> ResourceGroups
where
    I: IntoIterator<Item = &'a WorkItem>,
{
    let mut groups: BTreeMap<String, ResourceGroup> = BTreeMap::new();
    for item in items {
        let mut names = dimension.resources(item);
        if names.is_empty() {
            names.push(UNASSIGNED);
        }
        for name in names {
            groups
                .entry(name.to_string())
                .or_insert_with(|| ResourceGroup {
                    resource_name: name.to_string(),
                    items: Vec::new(),
                    utilization: 0.0,
                })
                .items
                .push(item.clone());
        }
    }
    for group in groups.values_mut() {
        group.utilization = utilization(&group.items, grid);
    }
    ResourceGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::ProjectWindow;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// 10 visible days: 2025-01-01 ..= 2025-01-10.
    fn ten_day_grid() -> CalendarGrid {
        CalendarGrid::build(ProjectWindow::new(d(2025, 1, 1), d(2025, 1, 10)), true, d(2025, 1, 1))
    }

    fn item(id: &str, start: NaiveDate, end: NaiveDate, machines: &[&str]) -> WorkItem {
        let mut it = WorkItem::new(id, id, start, end);
        it.machines = machines.iter().map(|m| m.to_string()).collect();
        it
    }

    #[test]
    fn test_machine_fan_out() {
        let items = vec![
            item("A", d(2025, 1, 1), d(2025, 1, 2), &["Laser-1", "Press-2"]),
            item("B", d(2025, 1, 3), d(2025, 1, 3), &["Press-2"]),
        ];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("Laser-1").unwrap().items.len(), 1);
        assert_eq!(groups.get("Press-2").unwrap().items.len(), 2);
    }

    #[test]
    fn test_duplicate_machine_counted_once() {
        let items = vec![item("A", d(2025, 1, 1), d(2025, 1, 5), &["Laser-1", " Laser-1 "])];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        let laser = groups.get("Laser-1").unwrap();
        assert_eq!(laser.items.len(), 1);
        assert!((laser.utilization - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unassigned_sorted_last() {
        let mut a = item("A", d(2025, 1, 1), d(2025, 1, 2), &[]);
        a.assignee = Some("Sato".into());
        let b = item("B", d(2025, 1, 1), d(2025, 1, 2), &[]);
        let mut c = item("C", d(2025, 1, 1), d(2025, 1, 2), &[]);
        c.assignee = Some("Abe".into());
        let items = vec![a, b, c];
        let groups = group_items(&items, GroupingDimension::Person, &ten_day_grid());
        let names: Vec<_> = groups.iter().map(|g| g.resource_name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Sato", UNASSIGNED]);
    }

    #[test]
    fn test_utilization_non_overlapping_within_bounds() {
        let items = vec![
            item("A", d(2025, 1, 1), d(2025, 1, 3), &["M"]),
            item("B", d(2025, 1, 5), d(2025, 1, 8), &["M"]),
        ];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        let u = groups.get("M").unwrap().utilization;
        assert!((u - 70.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&u));
    }

    #[test]
    fn test_overbooking_is_not_clamped() {
        let items = vec![
            item("A", d(2025, 1, 1), d(2025, 1, 10), &["M"]),
            item("B", d(2025, 1, 1), d(2025, 1, 10), &["M"]),
            item("C", d(2025, 1, 1), d(2025, 1, 5), &["M"]),
        ];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        let m = groups.get("M").unwrap();
        assert!((m.utilization - 250.0).abs() < 1e-9);
        assert!(m.is_overbooked());
        assert_eq!(groups.overbooked().count(), 1);
    }

    #[test]
    fn test_utilization_clips_to_window_but_keeps_full_denominator() {
        // 3 of the item's 6 days are visible.
        let items = vec![item("A", d(2024, 12, 29), d(2025, 1, 3), &["M"])];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        assert!((groups.get("M").unwrap().utilization - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_dates_stay_listed_with_zero_contribution() {
        let mut bad = item("BAD", d(2025, 1, 1), d(2025, 1, 10), &["M"]);
        bad.planned_start = "not a date".into();
        let items = vec![bad, item("OK", d(2025, 1, 1), d(2025, 1, 2), &["M"])];
        let groups = group_items(&items, GroupingDimension::Machine, &ten_day_grid());
        let m = groups.get("M").unwrap();
        assert_eq!(m.items.len(), 2);
        assert!((m.utilization - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_dimension() {
        let mut a = item("A", d(2025, 1, 1), d(2025, 1, 2), &["M"]);
        a.project = Some("Acme".into());
        let items = vec![a];
        let groups = group_items(&items, GroupingDimension::Project, &ten_day_grid());
        assert!(groups.get("Acme").is_some());
        assert!(groups.get("M").is_none());
    }
}
