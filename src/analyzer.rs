use crate::models::{shift_academic_year, ResultRecord};
use std::collections::HashSet;
use std::fmt;

/// A pass-rate figure for display: either a percentage rendered to two
/// decimal places or the "N/A" sentinel when no students appeared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassFigure {
    Percent(f64),
    NotAvailable,
}

impl fmt::Display for PassFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassFigure::Percent(p) => write!(f, "{:.2}", p),
            PassFigure::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Pure aggregation over an immutable snapshot of the record list. The
/// analyzer never mutates the store and never performs I/O.
pub struct ResultAnalyzer<'a> {
    records: &'a [ResultRecord],
}

impl<'a> ResultAnalyzer<'a> {
    pub fn new(records: &'a [ResultRecord]) -> Self {
        Self { records }
    }

    /// Average pass percentage for one subject offering, `years_ago`
    /// years before `reference_year`, taken across all sections that ran
    /// the subject in the same branch/year-of-study/semester scope.
    ///
    /// Records sharing a (section, normalized subject) key are counted
    /// once; the first encountered wins and counts are never merged.
    pub fn average_pass(
        &self,
        subject: &ResultRecord,
        reference_year: &str,
        years_ago: u32,
    ) -> PassFigure {
        let target_year = shift_academic_year(reference_year, years_ago);
        let subject_name = subject.normalized_subject();

        let mut unique_entries = HashSet::new();
        let mut total_passed: u64 = 0;
        let mut total_appeared: u64 = 0;

        let subjects_for_year = self.records.iter().filter(|t| {
            t.academic_year == target_year
                && t.branch == subject.branch
                && t.year_of_study == subject.year_of_study
                && t.semester == subject.semester
                && t.normalized_subject() == subject_name
        });

        for t in subjects_for_year {
            let unique_key = format!("{}-{}", t.section, t.normalized_subject());
            if unique_entries.insert(unique_key) {
                total_passed += t.passed_count() as u64;
                total_appeared += t.appeared_count() as u64;
            }
        }

        percentage(total_passed, total_appeared)
    }

    /// Overall pass percentage of a section across all of its theory
    /// subjects for one academic year. Lab subjects are excluded;
    /// duplicates collapse on (year-of-study, semester, section,
    /// normalized subject), first occurrence wins.
    pub fn section_average(
        &self,
        academic_year: &str,
        year_of_study: &str,
        semester: &str,
        section: &str,
    ) -> PassFigure {
        let mut unique_subjects = HashSet::new();
        let mut total_passed: u64 = 0;
        let mut total_appeared: u64 = 0;

        let relevant_subjects = self.records.iter().filter(|t| {
            t.academic_year == academic_year
                && t.year_of_study == year_of_study
                && t.semester == semester
                && t.section == section
                && !t.is_lab()
        });

        for sub in relevant_subjects {
            let unique_key = format!(
                "{}-{}-{}-{}",
                sub.year_of_study,
                sub.semester,
                sub.section,
                sub.normalized_subject()
            );
            if unique_subjects.insert(unique_key) {
                total_passed += sub.passed_count() as u64;
                total_appeared += sub.appeared_count() as u64;
            }
        }

        percentage(total_passed, total_appeared)
    }
}

fn percentage(passed: u64, appeared: u64) -> PassFigure {
    if appeared > 0 {
        PassFigure::Percent(passed as f64 / appeared as f64 * 100.0)
    } else {
        PassFigure::NotAvailable
    }
}
