use crate::model::{DateFormat, DateWindow, Record};

/// A value-parameterized test over one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<'a> {
    NotEmpty { field: &'a str },
    Empty { field: &'a str },
    Equals { field: &'a str, value: &'a str },
    NotEquals { field: &'a str, value: &'a str },
    DateBetween {
        field: &'a str,
        window: DateWindow,
        format: &'a DateFormat,
    },
}

impl Predicate<'_> {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::NotEmpty { field } => !record.get(field).is_empty(),
            Predicate::Empty { field } => record.get(field).is_empty(),
            Predicate::Equals { field, value } => record.get(field) == *value,
            Predicate::NotEquals { field, value } => record.get(field) != *value,
            Predicate::DateBetween {
                field,
                window,
                format,
            } => match format.parse_lenient(record.get(field)) {
                Some(date) => window.contains(date),
                None => {
                    tracing::debug!(
                        field = *field,
                        value = record.get(field),
                        "Unparsable date, record left out of window"
                    );
                    false
                }
            },
        }
    }
}

pub fn assignee_is_not_empty(field: &str) -> Predicate<'_> {
    Predicate::NotEmpty { field }
}

pub fn equal_sprint_name<'a>(field: &'a str, name: &'a str) -> Predicate<'a> {
    Predicate::Equals { field, value: name }
}

pub fn status_equal<'a>(field: &'a str, name: &'a str) -> Predicate<'a> {
    Predicate::Equals { field, value: name }
}

pub fn status_not_equal<'a>(field: &'a str, name: &'a str) -> Predicate<'a> {
    Predicate::NotEquals { field, value: name }
}

pub fn tested_by_not_empty(field: &str) -> Predicate<'_> {
    Predicate::NotEmpty { field }
}

pub fn tested_by_empty(field: &str) -> Predicate<'_> {
    Predicate::Empty { field }
}

pub fn updated_between<'a>(
    field: &'a str,
    window: DateWindow,
    format: &'a DateFormat,
) -> Predicate<'a> {
    Predicate::DateBetween {
        field,
        window,
        format,
    }
}

/// Narrows `records` once per predicate, left to right.
pub fn filter_records<'r>(records: &'r [Record], predicates: &[Predicate]) -> Vec<&'r Record> {
    predicates
        .iter()
        .fold(records.iter().collect::<Vec<_>>(), |candidates, predicate| {
            candidates
                .into_iter()
                .filter(|record| predicate.matches(record))
                .collect()
        })
}
