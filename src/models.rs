use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub employee_code: String,
    pub department: String,
    pub designation: String,
    pub subject_type: String,
    // Data source configuration
    pub data_file: Option<String>,
    pub output_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            employee_code: "".to_string(),
            department: "".to_string(),
            designation: "".to_string(),
            subject_type: "".to_string(),
            data_file: Some("teacherData.json".to_string()),
            output_directory: Some("output".to_string()),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    Theory,
    Lab,
}

impl SubjectType {
    /// Parse the user's subject-type selection; anything other than
    /// "theory" or "lab" is rejected at the boundary.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "theory" => Some(SubjectType::Theory),
            "lab" => Some(SubjectType::Lab),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectType::Theory => write!(f, "theory"),
            SubjectType::Lab => write!(f, "lab"),
        }
    }
}

/// One row of the exam-result dataset. Field names mirror the column
/// headers of the source JSON; numeric cells are carried as strings and
/// parsed permissively (unparseable values count as zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Academic Year")]
    pub academic_year: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "B. Tech. Year")]
    pub year_of_study: String,
    #[serde(rename = "Sem")]
    pub semester: String,
    #[serde(rename = "Section")]
    pub section: String,
    #[serde(rename = "Name of the subject")]
    pub subject: String,
    #[serde(rename = "EMP Code")]
    pub employee_code: String,
    #[serde(rename = "Name of the teacher")]
    pub teacher_name: String,
    #[serde(rename = "No of Students Appeared", deserialize_with = "cell_as_string", default)]
    pub appeared: String,
    #[serde(rename = "No of Students passed", deserialize_with = "cell_as_string", default)]
    pub passed: String,
    #[serde(rename = "% of Pass", deserialize_with = "cell_as_string", default)]
    pub pass_percent: String,
}

/// Accept numeric dataset cells written either as strings or as bare
/// JSON numbers.
fn cell_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(s) => s,
        Cell::Int(n) => n.to_string(),
        Cell::Float(n) => n.to_string(),
    })
}

impl ResultRecord {
    pub fn appeared_count(&self) -> u32 {
        self.appeared.trim().parse::<u32>().unwrap_or(0)
    }

    pub fn passed_count(&self) -> u32 {
        self.passed.trim().parse::<u32>().unwrap_or(0)
    }

    pub fn own_pass_percent(&self) -> f64 {
        self.pass_percent.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// A subject counts as a lab iff its name contains "lab" or
    /// "laboratory", case-insensitively. Every record is either lab or
    /// theory, never both.
    pub fn is_lab(&self) -> bool {
        let lab_regex = Regex::new(r"(?i)lab|laboratory").unwrap();
        lab_regex.is_match(&self.subject)
    }

    pub fn normalized_subject(&self) -> String {
        normalize_text(&self.subject)
    }

    pub fn normalized_employee_code(&self) -> String {
        strip_whitespace(&self.employee_code)
    }
}

/// Normalize free text for equality comparison: lower-case and drop all
/// whitespace.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Remove all whitespace without changing case (employee codes keep
/// their letter case on display).
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Shift an academic year like "2023-2024" back by `years_ago`, moving
/// both halves together. Malformed halves parse as zero; no bounds check
/// against the dataset's earliest year, so shifts past the data produce
/// a year that simply matches nothing.
pub fn shift_academic_year(academic_year: &str, years_ago: u32) -> String {
    let mut parts = academic_year.splitn(2, '-');
    let start: i64 = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
    let end: i64 = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
    format!("{}-{}", start - years_ago as i64, end - years_ago as i64)
}

/// First numeric component of an academic year, used for descending
/// year sorts.
pub fn academic_year_start(academic_year: &str) -> i64 {
    academic_year
        .splitn(2, '-')
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_subject(subject: &str) -> ResultRecord {
        ResultRecord {
            academic_year: "2023-2024".to_string(),
            branch: "CSE".to_string(),
            year_of_study: "III".to_string(),
            semester: "I".to_string(),
            section: "A".to_string(),
            subject: subject.to_string(),
            employee_code: "EMP 001".to_string(),
            teacher_name: "Dr. Rao".to_string(),
            appeared: "60".to_string(),
            passed: "55".to_string(),
            pass_percent: "91.67".to_string(),
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let variants = ["Data Structures", "  data STRUCTURES ", "DATASTRUCTURES"];
        for v in variants {
            let once = normalize_text(v);
            assert_eq!(normalize_text(&once), once);
            assert_eq!(once, "datastructures");
        }
    }

    #[test]
    fn normalize_handles_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn lab_classification_is_case_insensitive() {
        assert!(record_with_subject("Data Structures Lab").is_lab());
        assert!(record_with_subject("CHEMISTRY LABORATORY").is_lab());
        assert!(record_with_subject("physics laB").is_lab());
        assert!(!record_with_subject("Data Structures").is_lab());
        assert!(!record_with_subject("Mathematics - II").is_lab());
    }

    #[test]
    fn year_shift_moves_both_halves() {
        assert_eq!(shift_academic_year("2023-2024", 2), "2021-2022");
        assert_eq!(shift_academic_year("2023-2024", 0), "2023-2024");
    }

    #[test]
    fn year_shift_tolerates_malformed_input() {
        // Both halves fall back to zero rather than erroring.
        assert_eq!(shift_academic_year("garbage", 1), "-1--1");
    }

    #[test]
    fn numeric_fields_parse_permissively() {
        let mut record = record_with_subject("Data Structures");
        record.appeared = "not a number".to_string();
        record.passed = "".to_string();
        record.pass_percent = "n/a".to_string();
        assert_eq!(record.appeared_count(), 0);
        assert_eq!(record.passed_count(), 0);
        assert_eq!(record.own_pass_percent(), 0.0);
    }

    #[test]
    fn employee_code_normalization_keeps_case() {
        let record = record_with_subject("Data Structures");
        assert_eq!(record.normalized_employee_code(), "EMP001");
    }

    #[test]
    fn subject_type_parse_accepts_only_the_two_selections() {
        assert_eq!(SubjectType::parse("theory"), Some(SubjectType::Theory));
        assert_eq!(SubjectType::parse(" LAB "), Some(SubjectType::Lab));
        assert_eq!(SubjectType::parse(""), None);
        assert_eq!(SubjectType::parse("practical"), None);
    }
}
