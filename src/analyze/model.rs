use crate::model::{DateFormat, DateWindow, FieldNames, IssueTable, Record, ReportConfig};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TOTAL_KEY: &str = "Total";
pub const READY_TO_QA: &str = "Ready To QA";
pub const DONE: &str = "Done";
pub const BACKLOG: &str = "Backlog";

pub type StatusCounts = BTreeMap<String, u64>;
pub type StatusPoints = BTreeMap<String, f64>;
pub type AssigneeCounts = BTreeMap<String, StatusCounts>;
pub type AssigneePoints = BTreeMap<String, StatusPoints>;
pub type TesterCounts = BTreeMap<String, u64>;

/// Inputs of one analysis run, borrowed from the loaded table and the config.
#[derive(Debug, Clone)]
pub struct DataAnalysis<'a> {
    pub records: &'a [Record],
    pub fields: &'a FieldNames,
    pub window: DateWindow,
    pub date_format: &'a DateFormat,
    pub sprint_name: &'a str,
}

impl<'a> DataAnalysis<'a> {
    pub fn new(table: &'a IssueTable, config: &'a ReportConfig) -> Self {
        Self {
            records: &table.records,
            fields: &config.fields,
            window: config.window,
            date_format: &config.date_format,
            sprint_name: &config.sprint_name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusBucket {
    pub issue_count: u64,
    pub story_points: f64,
}

impl StatusBucket {
    pub fn new(issue_count: u64, story_points: f64) -> Self {
        Self {
            issue_count,
            story_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintAnalyzed {
    pub sprint_name: String,
    pub window: DateWindow,
    pub records_total: usize,
    pub records_in_window: usize,
    pub records_in_sprint: usize,
    pub issue_count: AssigneeCounts,
    pub story_points: AssigneePoints,
    pub tested_by_not_in_ready_to_qa: TesterCounts,
    pub ready_to_qa: StatusBucket,
    pub done: StatusBucket,
    pub backlog: StatusBucket,
    pub done_without_tester: u64,
}

/// Story points as a sum contribution: blank, unparsable or non-finite is zero.
pub fn story_points(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|points| points.is_finite())
        .unwrap_or(0.0)
}

/// Adds the synthetic row total over every observed status.
pub fn with_total<V>(mut statuses: BTreeMap<String, V>) -> BTreeMap<String, V>
where
    V: Copy + std::iter::Sum<V>,
{
    let total = statuses.values().copied().sum();
    statuses.insert(TOTAL_KEY.to_string(), total);
    statuses
}
