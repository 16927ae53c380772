use std::path::Path;

use chrono::NaiveDate;

use crate::error::{GanttError, Result};
use crate::model::work_item::{parse_date, DATE_FORMAT};
use crate::model::{Priority, WorkItem, WorkStatus};

/// Items read from a CSV file plus the number of rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub items: Vec<WorkItem>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Title,
    OrderNumber,
    Start,
    End,
    Due,
    Machines,
    Assignee,
    Project,
    Progress,
    Status,
    Priority,
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_', '.'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "itemid" | "workitemid" | "key" => Some(Column::Id),
        "title" | "name" | "task" | "taskname" | "label" | "description" | "part" => {
            Some(Column::Title)
        }
        "order" | "ordernumber" | "orderno" | "workorder" | "wo" => Some(Column::OrderNumber),
        "start" | "startdate" | "plannedstart" | "begin" | "from" => Some(Column::Start),
        "end" | "enddate" | "plannedend" | "finish" | "to" => Some(Column::End),
        "due" | "duedate" | "deadline" | "delivery" => Some(Column::Due),
        "machine" | "machines" | "workcenter" | "station" | "resource" => Some(Column::Machines),
        "assignee" | "person" | "operator" | "owner" | "assignedto" => Some(Column::Assignee),
        "project" | "client" | "customer" => Some(Column::Project),
        "progress" | "percent" | "complete" | "done" => Some(Column::Progress),
        "status" | "state" | "stage" => Some(Column::Status),
        "priority" | "pri" | "importance" => Some(Column::Priority),
        _ => None,
    }
}

/// Dates that parse are normalized to `YYYY-MM-DD`; anything else is kept
/// verbatim so the engine can report it against the item.
fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(d) = parse_date(raw) {
        return d.format(DATE_FORMAT).to_string();
    }
    for fmt in ["%d/%m/%Y", "%d.%m.%Y", "%Y/%m/%d", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.format(DATE_FORMAT).to_string();
        }
    }
    raw.to_string()
}

fn parse_progress(raw: &str) -> u8 {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map(|p| if p > 0.0 && p <= 1.0 && raw.contains('.') { p * 100.0 } else { p })
        .map(|p| p.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

fn split_machines(raw: &str) -> Vec<String> {
    raw.split(['|', ',', '+', '/'])
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Import work items from a CSV file.
///
/// Auto-detects the delimiter (comma, semicolon, tab) and matches headers
/// loosely ("Planned Start", "start_date", ...). Rows without a title or
/// start are skipped; rows without an id get a generated one.
pub fn import_csv(path: &Path) -> Result<ImportReport> {
    let content = std::fs::read_to_string(path)?;
    let report = import_csv_str(&content)?;
    tracing::info!(
        path = %path.display(),
        items = report.items.len(),
        skipped = report.skipped,
        "CSV imported"
    );
    Ok(report)
}

pub fn import_csv_str(content: &str) -> Result<ImportReport> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |c: Column| columns.contains(&Some(c));
    if !has(Column::Title) || !has(Column::Start) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(GanttError::Import(format!(
            "missing required columns, found {:?}; need a title and a start date",
            found
        )));
    }

    let mut report = ImportReport::default();
    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable CSV row");
                report.skipped += 1;
                continue;
            }
        };
        let field = |c: Column| {
            columns
                .iter()
                .position(|col| *col == Some(c))
                .and_then(|idx| record.get(idx))
        };

        let (Some(title), Some(start)) = (non_empty(field(Column::Title)), non_empty(field(Column::Start)))
        else {
            tracing::warn!(row, "skipping CSV row without title or start date");
            report.skipped += 1;
            continue;
        };

        let item = WorkItem {
            id: non_empty(field(Column::Id)).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title,
            order_number: non_empty(field(Column::OrderNumber)),
            planned_start: normalize_date(&start),
            planned_end: non_empty(field(Column::End)).map(|s| normalize_date(&s)),
            due_date: non_empty(field(Column::Due)).map(|s| normalize_date(&s)),
            machines: field(Column::Machines).map(split_machines).unwrap_or_default(),
            assignee: non_empty(field(Column::Assignee)),
            project: non_empty(field(Column::Project)),
            progress: field(Column::Progress).map(parse_progress).unwrap_or(0),
            status: field(Column::Status).and_then(WorkStatus::parse).unwrap_or_default(),
            priority: field(Column::Priority).and_then(Priority::parse).unwrap_or_default(),
        };
        if let Err(e) = item.window() {
            tracing::warn!(row, error = %e, "imported item has unusable dates");
        }
        report.items.push(item);
    }

    if report.items.is_empty() {
        return Err(GanttError::Import(if report.skipped > 0 {
            format!("no valid work items found ({} rows skipped)", report.skipped)
        } else {
            "CSV file is empty or has no data rows".to_string()
        }));
    }
    Ok(report)
}
