use crate::model::{ReportError, Result};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use itertools::Itertools;
use std::path::Path;

/// One issue-tracker row keyed by header name, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Value of `field`, or the empty string when the row has no such column.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = IndexMap::new();
        for (name, value) in iter {
            fields
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { fields }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IssueTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

// Create
impl IssueTable {
    pub fn from_csv(path: &Path) -> Result<Self> {
        let csv_error = |source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_error)?;

        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(String::from)
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(csv_error)?;
            records.push(headers.iter().zip(row.iter()).collect::<Record>());
        }

        tracing::info!(
            path = %path.display(),
            columns = headers.len(),
            records = records.len(),
            "Loaded issue export"
        );
        Ok(Self { headers, records })
    }
}

// Validation
impl IssueTable {
    /// Fails with every configured column the header row does not define.
    pub fn check_columns<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let missing = columns
            .into_iter()
            .filter(|column| !self.headers.iter().any(|h| h.as_str() == *column))
            .unique()
            .map(String::from)
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingColumn(missing))
        }
    }
}
