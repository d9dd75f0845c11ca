use crate::models::ResultRecord;
use anyhow::{Context, Result};
use std::fs;

/// Load the exam-result dataset from a JSON file. The dataset is read
/// once per run; everything downstream works on the returned immutable
/// list.
pub fn load_records(file_path: &str) -> Result<Vec<ResultRecord>> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read dataset file: {}", file_path))?;

    parse_records(&content).with_context(|| format!("Failed to parse dataset file: {}", file_path))
}

/// Parse a JSON array of result records into the typed record shape.
/// Field validation happens here, once, instead of ad-hoc lookups during
/// aggregation.
pub fn parse_records(content: &str) -> Result<Vec<ResultRecord>> {
    let records: Vec<ResultRecord> = serde_json::from_str(content)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_string_and_numeric_cells() {
        let content = r#"[
            {
                "Academic Year": "2023-2024",
                "Branch": "CSE",
                "B. Tech. Year": "III",
                "Sem": "I",
                "Section": "A",
                "Name of the subject": "Operating Systems",
                "EMP Code": "EMP 001",
                "Name of the teacher": "Dr. Rao",
                "No of Students Appeared": 60,
                "No of Students passed": "55",
                "% of Pass": 91.67
            }
        ]"#;

        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].appeared_count(), 60);
        assert_eq!(records[0].passed_count(), 55);
        assert_eq!(records[0].own_pass_percent(), 91.67);
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_records("{}").is_err());
        assert!(parse_records("not json").is_err());
    }

    #[test]
    fn missing_numeric_cells_default_to_empty() {
        let content = r#"[
            {
                "Academic Year": "2023-2024",
                "Branch": "CSE",
                "B. Tech. Year": "III",
                "Sem": "I",
                "Section": "A",
                "Name of the subject": "Operating Systems",
                "EMP Code": "EMP001",
                "Name of the teacher": "Dr. Rao"
            }
        ]"#;

        let records = parse_records(content).unwrap();
        assert_eq!(records[0].appeared_count(), 0);
        assert_eq!(records[0].own_pass_percent(), 0.0);
    }
}
