mod config;
mod record;
mod result;

pub use config::{
    parse_statuses, DateFormat, DateWindow, FieldNames, ReportConfig, DEFAULT_DATE_FORMAT,
};
pub use record::{IssueTable, Record};
pub use result::{ReportError, Result};

#[cfg(test)]
pub(crate) use config::tests::{date, field_names};
