use crate::analyze::filter::{
    assignee_is_not_empty, equal_sprint_name, filter_records, status_equal, status_not_equal,
    tested_by_empty, tested_by_not_empty, updated_between, Predicate,
};
use crate::analyze::{
    story_points, with_total, AssigneeCounts, AssigneePoints, DataAnalysis, SprintAnalyzed,
    StatusBucket, TesterCounts, BACKLOG, DONE, READY_TO_QA,
};
use crate::model::Record;

pub trait Analyzer {
    fn analyze_sprint(&self) -> SprintAnalyzed;
}

impl Analyzer for DataAnalysis<'_> {
    fn analyze_sprint(&self) -> SprintAnalyzed {
        let analyzed = SprintAnalyzed {
            sprint_name: self.sprint_name.to_string(),
            window: self.window,
            records_total: self.records.len(),
            records_in_window: self.in_window(&[]).len(),
            records_in_sprint: filter_records(
                self.records,
                &[equal_sprint_name(&self.fields.sprint, self.sprint_name)],
            )
            .len(),
            issue_count: self.per_assignee_per_status_issue_count(),
            story_points: self.per_assignee_per_status_story_points(),
            tested_by_not_in_ready_to_qa: self.per_tested_by_issue_not_in_ready_to_qa(),
            ready_to_qa: self.issue_count_and_story_points_in_given_status(READY_TO_QA),
            done: self.issue_count_and_story_points_in_given_status(DONE),
            backlog: self.issue_count_and_story_points_in_given_status(BACKLOG),
            done_without_tester: self.issue_count_tested_by_none_and_status_done(),
        };
        tracing::info!(
            records = analyzed.records_total,
            in_window = analyzed.records_in_window,
            in_sprint = analyzed.records_in_sprint,
            assignees = analyzed.issue_count.len(),
            testers = analyzed.tested_by_not_in_ready_to_qa.len(),
            "Sprint analyzed"
        );
        analyzed
    }
}

/// The five reducers. Each one narrows to the date window first.
pub trait IssueAggregator {
    fn per_assignee_per_status_issue_count(&self) -> AssigneeCounts;
    fn per_assignee_per_status_story_points(&self) -> AssigneePoints;
    fn per_tested_by_issue_not_in_ready_to_qa(&self) -> TesterCounts;
    fn issue_count_and_story_points_in_given_status(&self, status: &str) -> StatusBucket;
    fn issue_count_tested_by_none_and_status_done(&self) -> u64;
}

impl IssueAggregator for DataAnalysis<'_> {
    fn per_assignee_per_status_issue_count(&self) -> AssigneeCounts {
        let fields = self.fields;
        self.in_window(&[assignee_is_not_empty(&fields.assignee)])
            .into_iter()
            .fold(AssigneeCounts::new(), |mut acc, record| {
                *acc.entry(record.get(&fields.assignee).to_string())
                    .or_default()
                    .entry(record.get(&fields.status).to_string())
                    .or_default() += 1;
                acc
            })
            .into_iter()
            .map(|(assignee, statuses)| (assignee, with_total(statuses)))
            .collect()
    }

    fn per_assignee_per_status_story_points(&self) -> AssigneePoints {
        let fields = self.fields;
        self.in_window(&[assignee_is_not_empty(&fields.assignee)])
            .into_iter()
            .fold(AssigneePoints::new(), |mut acc, record| {
                *acc.entry(record.get(&fields.assignee).to_string())
                    .or_default()
                    .entry(record.get(&fields.status).to_string())
                    .or_default() += self.points_of(record);
                acc
            })
            .into_iter()
            .map(|(assignee, statuses)| (assignee, with_total(statuses)))
            .collect()
    }

    fn per_tested_by_issue_not_in_ready_to_qa(&self) -> TesterCounts {
        let fields = self.fields;
        self.in_window(&[
            tested_by_not_empty(&fields.tested_by),
            status_not_equal(&fields.status, READY_TO_QA),
        ])
        .into_iter()
        .fold(TesterCounts::new(), |mut acc, record| {
            *acc.entry(record.get(&fields.tested_by).to_string())
                .or_default() += 1;
            acc
        })
    }

    fn issue_count_and_story_points_in_given_status(&self, status: &str) -> StatusBucket {
        self.in_window(&[status_equal(&self.fields.status, status)])
            .into_iter()
            .fold(StatusBucket::default(), |acc, record| {
                StatusBucket::new(
                    acc.issue_count + 1,
                    acc.story_points + self.points_of(record),
                )
            })
    }

    fn issue_count_tested_by_none_and_status_done(&self) -> u64 {
        self.in_window(&[
            tested_by_empty(&self.fields.tested_by),
            status_equal(&self.fields.status, DONE),
        ])
        .len() as u64
    }
}

trait DataAnalysisExtension {
    fn in_window<'s>(&'s self, predicates: &[Predicate]) -> Vec<&'s Record>;
    fn points_of(&self, record: &Record) -> f64;
}

impl DataAnalysisExtension for DataAnalysis<'_> {
    fn in_window<'s>(&'s self, predicates: &[Predicate]) -> Vec<&'s Record> {
        let mut all = vec![updated_between(
            &self.fields.updated,
            self.window,
            self.date_format,
        )];
        all.extend_from_slice(predicates);
        filter_records(self.records, &all)
    }

    fn points_of(&self, record: &Record) -> f64 {
        let raw = record.get(&self.fields.story_point);
        let points = story_points(raw);
        if points == 0.0 && !raw.trim().is_empty() && raw.trim().parse::<f64>() != Ok(0.0) {
            tracing::debug!(
                issue = record.get(&self.fields.issue_key),
                value = raw,
                "Unparsable story points counted as 0"
            );
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{StatusCounts, StatusPoints, TOTAL_KEY};
    use crate::model::{date, field_names, DateFormat, DateWindow, FieldNames};
    use pretty_assertions::assert_eq;

    const IN: &str = "05/10/2026";
    const OUT: &str = "20/10/2026";

    struct Fixture {
        records: Vec<Record>,
        fields: FieldNames,
        format: DateFormat,
    }

    impl Fixture {
        // (assignee, status, points, tested by, updated)
        fn new(rows: &[(&str, &str, &str, &str, &str)]) -> Self {
            let records = rows
                .iter()
                .enumerate()
                .map(|(i, &(assignee, status, points, tester, updated))| {
                    let key = format!("SR-{}", i + 1);
                    [
                        ("Issue Key", key.as_str()),
                        ("Assignee", assignee),
                        ("Status", status),
                        ("Story Points", points),
                        ("Tested By", tester),
                        ("Updated", updated),
                        ("Sprint", "Sprint 18"),
                    ]
                    .into_iter()
                    .collect::<Record>()
                })
                .collect();
            Self {
                records,
                fields: field_names(),
                format: DateFormat::default(),
            }
        }

        fn analysis(&self) -> DataAnalysis<'_> {
            DataAnalysis {
                records: &self.records,
                fields: &self.fields,
                window: DateWindow::new(date(2026, 10, 1), date(2026, 10, 14)).unwrap(),
                date_format: &self.format,
                sprint_name: "Sprint 18",
            }
        }
    }

    fn counts(pairs: &[(&str, u64)]) -> StatusCounts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn points(pairs: &[(&str, f64)]) -> StatusPoints {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_alice_scenario() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "2", "", IN),
            ("Alice", "Done", "3", "", IN),
            ("", "Done", "1", "", IN),
        ]);
        let analysis = fixture.analysis();

        assert_eq!(
            analysis.per_assignee_per_status_issue_count(),
            AssigneeCounts::from([(
                "Alice".to_string(),
                counts(&[("Done", 2), (TOTAL_KEY, 2)])
            )])
        );
        assert_eq!(
            analysis.per_assignee_per_status_story_points(),
            AssigneePoints::from([(
                "Alice".to_string(),
                points(&[("Done", 5.0), (TOTAL_KEY, 5.0)])
            )])
        );
    }

    #[test]
    fn test_total_matches_status_sum() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "1", "", IN),
            ("Alice", "In Progress", "2", "", IN),
            ("Alice", "Backlog", "", "", IN),
            ("Bob", "Done", "5", "", IN),
            ("Bob", "Ready To QA", "x", "", IN),
        ]);
        let analysis = fixture.analysis();

        for (_, statuses) in analysis.per_assignee_per_status_issue_count() {
            let sum: u64 = statuses
                .iter()
                .filter(|(status, _)| status.as_str() != TOTAL_KEY)
                .map(|(_, count)| count)
                .sum();
            assert_eq!(statuses[TOTAL_KEY], sum);
        }
        let points = analysis.per_assignee_per_status_story_points();
        assert_eq!(points["Alice"][TOTAL_KEY], 3.0);
    }

    #[test]
    fn test_each_in_window_record_counted_once() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "1", "", IN),
            ("Alice", "Done", "1", "", OUT),
            ("Bob", "Backlog", "1", "", "01/10/2026"),
            ("Bob", "Backlog", "1", "", "14/10/2026"),
            ("Carol", "Done", "1", "", "not a date"),
            ("", "Done", "1", "", IN),
        ]);
        let counted = fixture
            .analysis()
            .per_assignee_per_status_issue_count()
            .values()
            .map(|statuses| statuses[TOTAL_KEY])
            .sum::<u64>();
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_unparsable_points_still_create_status_entry() {
        let fixture = Fixture::new(&[("Alice", "Backlog", "n/a", "", IN)]);
        let analysis = fixture.analysis();

        assert_eq!(
            analysis.per_assignee_per_status_story_points()["Alice"],
            points(&[("Backlog", 0.0), (TOTAL_KEY, 0.0)])
        );
        assert_eq!(
            analysis.per_assignee_per_status_issue_count()["Alice"]["Backlog"],
            1
        );
    }

    #[test]
    fn test_tested_by_excludes_ready_to_qa() {
        let fixture = Fixture::new(&[
            ("Alice", "Ready To QA", "1", "Quinn", IN),
            ("Alice", "Done", "1", "Quinn", IN),
            ("Bob", "Done", "1", "Quinn", OUT),
            ("Bob", "In Progress", "1", "Rae", IN),
            ("Bob", "Done", "1", "", IN),
        ]);
        assert_eq!(
            fixture.analysis().per_tested_by_issue_not_in_ready_to_qa(),
            TesterCounts::from([("Quinn".to_string(), 1), ("Rae".to_string(), 1)])
        );
    }

    #[test]
    fn test_status_bucket_sums_and_skips_bad_points() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "2", "", IN),
            ("", "Done", "abc", "", IN),
            ("Bob", "Done", "1.5", "", IN),
            ("Bob", "Done", "8", "", OUT),
            ("Bob", "Ready To QA", "3", "", IN),
        ]);
        let analysis = fixture.analysis();

        assert_eq!(
            analysis.issue_count_and_story_points_in_given_status(DONE),
            StatusBucket::new(3, 3.5)
        );
        assert_eq!(
            analysis.issue_count_and_story_points_in_given_status(READY_TO_QA),
            StatusBucket::new(1, 3.0)
        );
    }

    #[test]
    fn test_empty_status_bucket() {
        let fixture = Fixture::new(&[("Alice", "Done", "2", "", IN)]);
        assert_eq!(
            fixture
                .analysis()
                .issue_count_and_story_points_in_given_status(BACKLOG),
            StatusBucket::new(0, 0.0)
        );
    }

    #[test]
    fn test_done_without_tester() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "2", "", IN),
            ("Alice", "Done", "2", "Quinn", IN),
            ("Alice", "Done", "2", "", OUT),
            ("", "Done", "2", "", IN),
            ("Alice", "Backlog", "2", "", IN),
        ]);
        assert_eq!(
            fixture.analysis().issue_count_tested_by_none_and_status_done(),
            2
        );
    }

    #[test]
    fn test_analyze_sprint_is_idempotent() {
        let fixture = Fixture::new(&[
            ("Alice", "Done", "2", "Quinn", IN),
            ("Bob", "Backlog", "0.25", "", IN),
            ("Carol", "Ready To QA", "1", "Rae", OUT),
        ]);
        let first = fixture.analysis().analyze_sprint();
        let second = fixture.analysis().analyze_sprint();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.records_total, 3);
        assert_eq!(first.records_in_window, 2);
        assert_eq!(first.records_in_sprint, 3);
    }
}
