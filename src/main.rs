mod analyze;
mod model;
mod report;
mod utils;

use crate::analyze::analyzer::Analyzer;
use crate::analyze::{DataAnalysis, SprintAnalyzed};
use crate::model::{
    parse_statuses, DateFormat, DateWindow, FieldNames, IssueTable, ReportConfig, ReportError,
    Result,
};
use crate::report::html::HtmlReport;
use crate::report::json::JsonSummary;
use crate::utils::MultiProgressNew;
use clap::Parser;
use indicatif::MultiProgress;
use std::path::PathBuf;
use std::process::ExitCode;

/// Every option can also come from the environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(about = "Sprint report from an issue-tracker CSV export")]
struct Args {
    #[arg(long = "csv", env = "CSV_FILE_PATH")]
    csv_path: PathBuf,
    #[arg(long, env = "SPRINT_NAME")]
    sprint_name: String,
    #[arg(long, env = "ASSIGNEE_FIELD")]
    assignee_field: String,
    #[arg(long, env = "STATUS_FIELD")]
    status_field: String,
    #[arg(long, env = "SPRINT_FIELD")]
    sprint_field: String,
    #[arg(long, env = "STORY_POINT_FIELD")]
    story_point_field: String,
    #[arg(long, env = "TESTED_BY_FIELD")]
    tested_by_field: String,
    #[arg(long, env = "UPDATED_FIELD")]
    updated_field: String,
    #[arg(long, env = "ISSUE_KEY_FIELD")]
    issue_key_field: String,
    #[arg(long, env = "ISSUE_TYPE_FIELD")]
    issue_type_field: String,
    #[arg(long, env = "SUMMARY_FIELD")]
    summary_field: String,
    #[arg(long = "start-date", env = "SPRINT_START_DATE")]
    start_date: String,
    #[arg(long = "end-date", env = "SPRINT_END_DATE")]
    end_date: String,
    /// Comma-separated, in column order
    #[arg(long, env = "STATUSES")]
    statuses: String,
    /// chrono format for the sprint dates and the updated column
    #[arg(long, env = "DATE_FORMAT", default_value = model::DEFAULT_DATE_FORMAT)]
    date_format: String,
    #[arg(
        long = "output",
        env = "REPORT_OUTPUT",
        default_value = "output/sprint-report.html"
    )]
    output_path: PathBuf,
    #[arg(long, env = "REPORT_SUMMARY_JSON")]
    summary_json: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<ReportConfig> {
        if self.sprint_name.trim().is_empty() {
            return Err(ReportError::Config("sprint name must not be blank".into()));
        }
        let fields = FieldNames {
            assignee: self.assignee_field,
            status: self.status_field,
            sprint: self.sprint_field,
            story_point: self.story_point_field,
            tested_by: self.tested_by_field,
            updated: self.updated_field,
            issue_key: self.issue_key_field,
            issue_type: self.issue_type_field,
            summary: self.summary_field,
        };
        fields.validate()?;
        let date_format = DateFormat::new(&self.date_format)?;
        let window = DateWindow::parse(&self.start_date, &self.end_date, &date_format)?;
        let statuses = parse_statuses(&self.statuses)?;

        Ok(ReportConfig {
            csv_path: self.csv_path,
            sprint_name: self.sprint_name,
            fields,
            window,
            date_format,
            statuses,
            output_path: self.output_path,
            summary_json: self.summary_json,
        })
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    utils::init_logger(args.verbose);

    let result = args
        .into_config()
        .and_then(|config| run(&config, &MultiProgress::default()));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ReportConfig, multi_progress: &MultiProgress) -> Result<SprintAnalyzed> {
    tracing::debug!(?config, "Configuration loaded");

    let load_pb = multi_progress.add_step(
        1,
        3,
        &format!("Read file `{}` ...", config.csv_path.display()),
    )?;
    let table = IssueTable::from_csv(&config.csv_path)?;
    table.check_columns(config.fields.columns())?;
    load_pb.finish_with_message(format!(
        "Completed parsing file `{}` (find {} issues)",
        config.csv_path.display(),
        table.records.len()
    ));

    let analyze_pb = multi_progress.add_step(2, 3, "Aggregate issues ...")?;
    let analyzed = DataAnalysis::new(&table, config).analyze_sprint();
    analyze_pb.finish_with_message(format!(
        "Completed aggregation ({} issues in sprint window)",
        analyzed.records_in_window
    ));

    let report_pb = multi_progress.add_step(3, 3, "Render report ...")?;
    analyzed.report_create(config, &table.records)?;
    if let Some(path) = &config.summary_json {
        analyzed.summary_create(path)?;
    }
    report_pb.finish_with_message(format!(
        "Report written to `{}`",
        config.output_path.display()
    ));

    Ok(analyzed)
}
