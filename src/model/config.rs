use crate::model::{ReportError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Everything one report run needs, validated up front.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub csv_path: PathBuf,
    pub sprint_name: String,
    pub fields: FieldNames,
    pub window: DateWindow,
    pub date_format: DateFormat,
    pub statuses: Vec<String>,
    pub output_path: PathBuf,
    pub summary_json: Option<PathBuf>,
}

/// CSV column names for each role a field plays in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub assignee: String,
    pub status: String,
    pub sprint: String,
    pub story_point: String,
    pub tested_by: String,
    pub updated: String,
    pub issue_key: String,
    pub issue_type: String,
    pub summary: String,
}

impl FieldNames {
    fn named(&self) -> [(&'static str, &str); 9] {
        [
            ("assignee", self.assignee.as_str()),
            ("status", self.status.as_str()),
            ("sprint", self.sprint.as_str()),
            ("story point", self.story_point.as_str()),
            ("tested by", self.tested_by.as_str()),
            ("updated", self.updated.as_str()),
            ("issue key", self.issue_key.as_str()),
            ("issue type", self.issue_type.as_str()),
            ("summary", self.summary.as_str()),
        ]
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.named().into_iter().map(|(_, column)| column)
    }

    pub fn validate(&self) -> Result<()> {
        match self.named().iter().find(|(_, column)| column.trim().is_empty()) {
            Some((role, _)) => Err(ReportError::Config(format!(
                "{} field name must not be blank",
                role
            ))),
            None => Ok(()),
        }
    }
}

/// A chrono strftime pattern used for both the window bounds and record dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    pub fn new(pattern: impl ToString) -> Result<Self> {
        let pattern = pattern.to_string();
        if pattern.trim().is_empty() {
            return Err(ReportError::Config("date format must not be blank".into()));
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::Config(format!(
                "invalid date format `{}`",
                pattern
            )));
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strict parse for configuration values.
    pub fn parse_strict(&self, name: &str, value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), &self.0).map_err(|_| ReportError::InvalidDate {
            name: name.to_string(),
            value: value.to_string(),
            format: self.0.clone(),
        })
    }

    /// Record dates may carry a time of day after the date; it is ignored.
    pub fn parse_lenient(&self, value: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_and_remainder(value.trim(), &self.0) {
            Ok((date, rest)) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                Some(date)
            }
            _ => None,
        }
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReportError::Config(format!(
                "sprint start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str, format: &DateFormat) -> Result<Self> {
        let start = format.parse_strict("sprint start date", start)?;
        let end = format.parse_strict("sprint end date", end)?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Splits a comma-separated status list, trimming entries and dropping repeats.
pub fn parse_statuses(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(ReportError::Config("status list must not be empty".into()));
    }
    let entries = raw.split(',').map(str::trim).collect::<Vec<_>>();
    if let Some(position) = entries.iter().position(|s| s.is_empty()) {
        return Err(ReportError::Config(format!(
            "status list `{}` has an empty entry at position {}",
            raw,
            position + 1
        )));
    }
    Ok(entries.into_iter().unique().map(String::from).collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn field_names() -> FieldNames {
        FieldNames {
            assignee: "Assignee".into(),
            status: "Status".into(),
            sprint: "Sprint".into(),
            story_point: "Story Points".into(),
            tested_by: "Tested By".into(),
            updated: "Updated".into(),
            issue_key: "Issue Key".into(),
            issue_type: "Issue Type".into(),
            summary: "Summary".into(),
        }
    }

    #[test]
    fn test_window_parse_day_month_year() {
        let window = DateWindow::parse("01/10/2026", "14/10/2026", &DateFormat::default()).unwrap();
        assert_eq!(window.start, date(2026, 10, 1));
        assert_eq!(window.end, date(2026, 10, 14));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow::new(date(2026, 10, 1), date(2026, 10, 14)).unwrap();
        assert!(window.contains(date(2026, 10, 1)));
        assert!(window.contains(date(2026, 10, 14)));
        assert!(!window.contains(date(2026, 9, 30)));
        assert!(!window.contains(date(2026, 10, 15)));
    }

    #[test]
    fn test_window_rejects_reversed_range() {
        assert!(DateWindow::new(date(2026, 10, 14), date(2026, 10, 1)).is_err());
    }

    #[test]
    fn test_window_rejects_malformed_date() {
        let result = DateWindow::parse("2026-10-01", "14/10/2026", &DateFormat::default());
        assert!(matches!(result, Err(ReportError::InvalidDate { .. })));
    }

    #[test]
    fn test_month_day_year_format() {
        let format = DateFormat::new("%m/%d/%Y").unwrap();
        let window = DateWindow::parse("10/01/2026", "10/14/2026", &format).unwrap();
        assert_eq!(window.start, date(2026, 10, 1));
    }

    #[test]
    fn test_invalid_format_is_config_error() {
        assert!(DateFormat::new("%Q/%m").is_err());
        assert!(DateFormat::new("  ").is_err());
    }

    #[test]
    fn test_lenient_parse_ignores_time_of_day() {
        let format = DateFormat::default();
        assert_eq!(format.parse_lenient("05/10/2026"), Some(date(2026, 10, 5)));
        assert_eq!(
            format.parse_lenient("05/10/2026 10:31 AM"),
            Some(date(2026, 10, 5))
        );
        assert_eq!(format.parse_lenient("05/10/2026x"), None);
        assert_eq!(format.parse_lenient(""), None);
        assert_eq!(format.parse_lenient("yesterday"), None);
    }

    #[test]
    fn test_parse_statuses_trims_and_dedups() {
        let statuses = parse_statuses("To Do, In Progress ,Done,To Do").unwrap();
        assert_eq!(statuses, vec!["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn test_parse_statuses_rejects_empty_entries() {
        assert!(parse_statuses("").is_err());
        assert!(parse_statuses("Done,,Backlog").is_err());
        assert!(parse_statuses("Done,").is_err());
    }

    #[test]
    fn test_field_names_reject_blank() {
        let mut fields = field_names();
        assert!(fields.validate().is_ok());
        fields.tested_by = " ".into();
        match fields.validate() {
            Err(ReportError::Config(message)) => assert!(message.contains("tested by")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
