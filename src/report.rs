use crate::analyzer::ResultAnalyzer;
use crate::models::{
    academic_year_start, shift_academic_year, strip_whitespace, ResultRecord, SubjectType,
};
use std::collections::HashSet;

/// Historical window for theory subjects: the reference year plus four
/// prior years (`years_ago` 0..=4). All five computed averages are
/// surfaced as columns.
const HISTORY_WINDOW: u32 = 5;

/// At most this many academic-year tables appear in a theory report,
/// keeping the most recent ones.
const MAX_REPORT_YEARS: usize = 5;

#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub employee_code: String,
    pub department: String,
    pub designation: String,
    pub subject_type: SubjectType,
}

/// Immutable header metadata for one report run, threaded explicitly
/// into the exporters instead of living in shared session state.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub faculty_name: String,
    pub department: String,
    pub designation: String,
    pub employee_id: String,
}

/// One renderable table: a title, column headers, and string cells.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Assembled report for one faculty member: header context plus an
/// ordered list of tables (one per retained academic year for theory, a
/// single listing for lab). An empty `tables` list means the faculty
/// exists but has no subjects of the selected type.
#[derive(Debug, Clone)]
pub struct FacultyReport {
    pub context: ReportContext,
    pub tables: Vec<ReportTable>,
}

/// Build the report for the queried employee code. The code match is
/// whitespace-insensitive and an empty code matches every record.
/// Returns `None` when no record matches the code at all, the explicit
/// no-data outcome.
pub fn build_report(records: &[ResultRecord], query: &ReportQuery) -> Option<FacultyReport> {
    let normalized_code = strip_whitespace(&query.employee_code);

    let faculty_records: Vec<&ResultRecord> = records
        .iter()
        .filter(|t| normalized_code.is_empty() || t.normalized_employee_code() == normalized_code)
        .collect();

    if faculty_records.is_empty() {
        return None;
    }

    let first = faculty_records[0];
    let context = ReportContext {
        faculty_name: present_or(&first.teacher_name, "Not Available"),
        department: present_or(&query.department, "Not Provided"),
        designation: present_or(&query.designation, "Not Provided"),
        employee_id: present_or(&first.normalized_employee_code(), "Not Available"),
    };

    let tables = match query.subject_type {
        SubjectType::Theory => theory_tables(records, &faculty_records),
        SubjectType::Lab => lab_tables(&faculty_records),
    };

    Some(FacultyReport { context, tables })
}

fn present_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One table per academic year, most recent `MAX_REPORT_YEARS` years
/// only, sorted descending by the year's first component. Every row
/// carries the record's own result, its section average, and the
/// subject's historical averages across the window.
fn theory_tables(all_records: &[ResultRecord], faculty_records: &[&ResultRecord]) -> Vec<ReportTable> {
    let theory_records: Vec<&ResultRecord> =
        faculty_records.iter().copied().filter(|t| !t.is_lab()).collect();

    let mut seen_years = HashSet::new();
    let mut academic_years: Vec<String> = theory_records
        .iter()
        .filter(|t| seen_years.insert(t.academic_year.clone()))
        .map(|t| t.academic_year.clone())
        .collect();
    academic_years.sort_by_key(|y| std::cmp::Reverse(academic_year_start(y)));
    academic_years.truncate(MAX_REPORT_YEARS);

    let analyzer = ResultAnalyzer::new(all_records);
    let mut tables = Vec::new();

    for year in academic_years {
        let year_subjects: Vec<&ResultRecord> = theory_records
            .iter()
            .copied()
            .filter(|t| t.academic_year == year)
            .collect();
        if year_subjects.is_empty() {
            continue;
        }

        let mut columns = vec![
            "B. Tech. Year".to_string(),
            "Sem".to_string(),
            "Section".to_string(),
            "Name of the Subject".to_string(),
            "Faculty Result %".to_string(),
            "Section Average".to_string(),
        ];
        for years_ago in 0..HISTORY_WINDOW {
            columns.push(format!(
                "Subject Avg {}",
                shift_academic_year(&year, years_ago)
            ));
        }

        let mut rows = Vec::new();
        for sub in year_subjects {
            let section_average =
                analyzer.section_average(&year, &sub.year_of_study, &sub.semester, &sub.section);

            let mut row = vec![
                sub.year_of_study.clone(),
                sub.semester.clone(),
                sub.section.clone(),
                sub.subject.clone(),
                format!("{:.2}", sub.own_pass_percent()),
                section_average.to_string(),
            ];
            for years_ago in 0..HISTORY_WINDOW {
                row.push(analyzer.average_pass(sub, &year, years_ago).to_string());
            }
            rows.push(row);
        }

        tables.push(ReportTable {
            title: format!("Theory Subjects for {}", year),
            columns,
            rows,
        });
    }

    tables
}

/// Lab subjects are listed as-is, one row per record, without any
/// historical aggregation.
fn lab_tables(faculty_records: &[&ResultRecord]) -> Vec<ReportTable> {
    let lab_records: Vec<&ResultRecord> =
        faculty_records.iter().copied().filter(|t| t.is_lab()).collect();

    if lab_records.is_empty() {
        return Vec::new();
    }

    let columns = vec![
        "Academic Year".to_string(),
        "B. Tech. Year".to_string(),
        "Sem".to_string(),
        "Section".to_string(),
        "Name of the Subject".to_string(),
        "% of Pass".to_string(),
    ];

    let rows = lab_records
        .iter()
        .map(|t| {
            vec![
                t.academic_year.clone(),
                t.year_of_study.clone(),
                t.semester.clone(),
                t.section.clone(),
                t.subject.clone(),
                format!("{:.2}", t.own_pass_percent()),
            ]
        })
        .collect();

    vec![ReportTable {
        title: "Lab Subjects".to_string(),
        columns,
        rows,
    }]
}
