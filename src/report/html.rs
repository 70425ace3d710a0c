use crate::analyze::SprintAnalyzed;
use crate::model::{Record, ReportConfig, Result};
use crate::report::table::{
    bucket_rows, format_points, issue_rows, status_matrix, tester_rows, BucketRow, IssueRow,
    MatrixRow, TesterRow,
};
use askama::Template;
use chrono::Local;
use std::fs;
use std::path::Path;

const DATE_DISPLAY: &str = "%d.%m.%Y";

#[derive(Template)]
#[template(path = "report.html")]
pub struct SprintReportTemplate<'a> {
    pub sprint_name: &'a str,
    pub window_start: String,
    pub window_end: String,
    pub generated_at: String,
    pub date_format: &'a str,
    pub records_total: usize,
    pub records_in_window: usize,
    pub records_in_sprint: usize,
    pub statuses: &'a [String],
    pub issue_count_rows: Vec<MatrixRow>,
    pub story_point_rows: Vec<MatrixRow>,
    pub tester_rows: Vec<TesterRow>,
    pub bucket_rows: Vec<BucketRow>,
    pub done_without_tester: u64,
    pub issues: Vec<IssueRow>,
}

pub trait HtmlReport {
    fn report_render(&self, config: &ReportConfig, records: &[Record]) -> Result<String>;
    fn report_create(&self, config: &ReportConfig, records: &[Record]) -> Result<()>;
}

impl HtmlReport for SprintAnalyzed {
    fn report_render(&self, config: &ReportConfig, records: &[Record]) -> Result<String> {
        let template = SprintReportTemplate {
            sprint_name: &self.sprint_name,
            window_start: self.window.start.format(DATE_DISPLAY).to_string(),
            window_end: self.window.end.format(DATE_DISPLAY).to_string(),
            generated_at: Local::now().format("%d.%m.%Y %H:%M").to_string(),
            date_format: config.date_format.as_str(),
            records_total: self.records_total,
            records_in_window: self.records_in_window,
            records_in_sprint: self.records_in_sprint,
            statuses: &config.statuses,
            issue_count_rows: status_matrix(&self.issue_count, &config.statuses, |c| {
                c.to_string()
            }),
            story_point_rows: status_matrix(&self.story_points, &config.statuses, format_points),
            tester_rows: tester_rows(self),
            bucket_rows: bucket_rows(self),
            done_without_tester: self.done_without_tester,
            issues: issue_rows(records, &config.fields),
        };
        Ok(template.render()?)
    }

    fn report_create(&self, config: &ReportConfig, records: &[Record]) -> Result<()> {
        let html = self.report_render(config, records)?;
        write_creating_dirs(&config.output_path, html.as_bytes())?;
        tracing::info!(path = %config.output_path.display(), bytes = html.len(), "Report written");
        Ok(())
    }
}

pub(crate) fn write_creating_dirs(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
