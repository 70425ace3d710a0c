use crate::analyze::{SprintAnalyzed, StatusBucket, TOTAL_KEY};
use crate::model::{FieldNames, Record};
use std::collections::BTreeMap;

/// `[key, value per configured status..., Total]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesterRow {
    pub tester: String,
    pub issues: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRow {
    pub status: String,
    pub issues: u64,
    pub story_points: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRow {
    pub issue_key: String,
    pub issue_type: String,
    pub status: String,
    pub assignee: String,
    pub tester: String,
    pub story_point: String,
    pub summary: String,
}

/// Rows ordered by key; statuses missing for a key read as zero.
pub fn status_matrix<V, F>(
    table: &BTreeMap<String, BTreeMap<String, V>>,
    statuses: &[String],
    render: F,
) -> Vec<MatrixRow>
where
    V: Copy + Default,
    F: Fn(V) -> String,
{
    table
        .iter()
        .map(|(key, values)| {
            let value_of = |status: &str| values.get(status).copied().unwrap_or_default();
            let cells = statuses
                .iter()
                .map(|status| render(value_of(status.as_str())))
                .chain(std::iter::once(render(value_of(TOTAL_KEY))))
                .collect();
            MatrixRow {
                key: key.clone(),
                cells,
            }
        })
        .collect()
}

pub fn tester_rows(analyzed: &SprintAnalyzed) -> Vec<TesterRow> {
    analyzed
        .tested_by_not_in_ready_to_qa
        .iter()
        .map(|(tester, issues)| TesterRow {
            tester: tester.clone(),
            issues: *issues,
        })
        .collect()
}

pub fn bucket_rows(analyzed: &SprintAnalyzed) -> Vec<BucketRow> {
    let row = |status: &str, bucket: &StatusBucket| BucketRow {
        status: status.to_string(),
        issues: bucket.issue_count,
        story_points: format_points(bucket.story_points),
    };
    vec![
        row(crate::analyze::READY_TO_QA, &analyzed.ready_to_qa),
        row(crate::analyze::DONE, &analyzed.done),
        row(crate::analyze::BACKLOG, &analyzed.backlog),
    ]
}

pub fn issue_rows(records: &[Record], fields: &FieldNames) -> Vec<IssueRow> {
    records
        .iter()
        .map(|record| IssueRow {
            issue_key: record.get(&fields.issue_key).to_string(),
            issue_type: record.get(&fields.issue_type).to_string(),
            status: record.get(&fields.status).to_string(),
            assignee: record.get(&fields.assignee).to_string(),
            tester: record.get(&fields.tested_by).to_string(),
            story_point: record.get(&fields.story_point).to_string(),
            summary: record.get(&fields.summary).to_string(),
        })
        .collect()
}

/// Two decimals at most, without trailing zeros.
pub fn format_points(points: f64) -> String {
    let text = format!("{:.2}", points);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
