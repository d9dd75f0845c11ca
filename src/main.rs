use anyhow::Result;
use clap::{Arg, Command};
use faculty_result_analyzer::loader;
use faculty_result_analyzer::models::{Config, SubjectType};
use faculty_result_analyzer::report::{self, FacultyReport, ReportQuery};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("faculty-result-analyzer")
        .version("1.0")
        .about("Analyzes faculty exam-result performance across academic years")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .get_matches();

    let config_file = matches.get_one::<String>("config").unwrap();

    // Load or create configuration
    let config = if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
        Config::load_from_file(config_file)?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        let default_config = Config::default();
        default_config.save_to_file(config_file)?;
        println!(
            "⚠️  Please edit {} and set the employee code and subject type, then run the program again.",
            config_file
        );
        return Ok(());
    };

    // Validate configuration: the subject-type selection is required
    // before any aggregation runs.
    let subject_type = match SubjectType::parse(&config.subject_type) {
        Some(subject_type) => subject_type,
        None => {
            println!("❌ Error: subject_type must be \"theory\" or \"lab\" in configuration file");
            println!("   Please edit {} and set the subject type", config_file);
            return Ok(());
        }
    };

    let data_file = config.data_file.as_deref().unwrap_or("teacherData.json");
    let output_dir = config.output_directory.as_deref().unwrap_or("output");

    // Create output directory if it doesn't exist
    fs::create_dir_all(output_dir)?;

    // Clean up previous results
    clean_output_directory(output_dir)?;

    println!("🔍 Analyzing results for employee code: {}", if config.employee_code.trim().is_empty() { "ALL FACULTY" } else { config.employee_code.trim() });
    println!("📂 Reading dataset from: {}", data_file);
    println!("📄 Output directory: {} (cleaned)", output_dir);
    println!("🎯 Subject type: {}", subject_type);

    let records = loader::load_records(data_file)?;
    println!("✅ Loaded {} result records", records.len());

    let query = ReportQuery {
        employee_code: config.employee_code.clone(),
        department: config.department.clone(),
        designation: config.designation.clone(),
        subject_type,
    };

    let faculty_report = match report::build_report(&records, &query) {
        Some(faculty_report) => faculty_report,
        None => {
            println!("❌ No details found for the entered EMP Code.");
            return Ok(());
        }
    };

    if faculty_report.tables.is_empty() {
        println!("❌ No {} subjects found for this faculty member.", subject_type);
        return Ok(());
    }

    generate_text_summary(&faculty_report, output_dir)?;
    generate_html_report(&faculty_report, output_dir)?;
    generate_table_csvs(&faculty_report, output_dir)?;

    print_summary(&faculty_report);

    println!("\n✅ Analysis complete!");
    println!("📂 Results written to: {}", output_dir);
    Ok(())
}

/// Write a plain-text rendition of the report: faculty header block
/// followed by every table.
fn generate_text_summary(faculty_report: &FacultyReport, output_dir: &str) -> Result<()> {
    let context = &faculty_report.context;

    let mut content = String::new();
    content.push_str("Faculty Result Analysis\n");
    content.push_str("=======================\n\n");
    content.push_str(&format!("Faculty Name : {}\n", context.faculty_name));
    content.push_str(&format!("Department   : {}\n", context.department));
    content.push_str(&format!("Designation  : {}\n", context.designation));
    content.push_str(&format!("Employee ID  : {}\n\n", context.employee_id));

    for table in &faculty_report.tables {
        content.push_str(&format!("{}\n", table.title));
        content.push_str(&format!("{}\n", "-".repeat(table.title.len())));
        content.push_str(&format!("{}\n", table.columns.join(" | ")));
        for row in &table.rows {
            content.push_str(&format!("{}\n", row.join(" | ")));
        }
        content.push('\n');
    }

    content.push_str("Signature of COE: ________________________\n");
    content.push_str("Signature of Director: ________________________\n");

    fs::write(Path::new(output_dir).join("summary.txt"), content)?;
    Ok(())
}

/// Write the report as a standalone HTML document with the banner title,
/// faculty details, one table per section, and signature placeholders,
/// ready for printing or document conversion.
fn generate_html_report(faculty_report: &FacultyReport, output_dir: &str) -> Result<()> {
    let context = &faculty_report.context;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Result Analysis</title>\n");
    html.push_str("<style>table { border-collapse: collapse; width: 100%; } th, td { border: 1px solid #000; padding: 5px; text-align: center; } th { background-color: #f4f4f4; } tr:nth-child(even) { background-color: #f0f0f0; }</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<h1 style=\"color: #ea2e2e; text-align: center;\">Result Analysis</h1>\n");
    html.push_str(&format!("<h2>Faculty Name: {}</h2>\n", context.faculty_name));
    html.push_str(&format!("<h2>Department: {}</h2>\n", context.department));
    html.push_str(&format!("<h2>Designation: {}</h2>\n", context.designation));
    html.push_str(&format!("<h2>Employee ID: {}</h2>\n", context.employee_id));
    html.push_str("<h2 style=\"text-align: center;\">Academic Overview</h2>\n");

    for table in &faculty_report.tables {
        html.push_str(&format!("<h3>{}</h3>\n", table.title));
        html.push_str("<table border=\"1\" cellpadding=\"5\" cellspacing=\"0\">\n<thead>\n<tr>");
        for column in &table.columns {
            html.push_str(&format!("<th>{}</th>", column));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in &table.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", cell));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<div class=\"signature\" style=\"margin-top: 20px;\">\n");
    html.push_str("<p>Signature of COE: ________________________</p>\n");
    html.push_str("<p>Signature of Director: ________________________</p>\n");
    html.push_str("</div>\n</body>\n</html>\n");

    fs::write(Path::new(output_dir).join("report.html"), html)?;
    Ok(())
}

/// Write one CSV file per report table under `<output_dir>/tables/`.
fn generate_table_csvs(faculty_report: &FacultyReport, output_dir: &str) -> Result<()> {
    use csv::Writer;

    let tables_dir = Path::new(output_dir).join("tables");
    fs::create_dir_all(&tables_dir)?;

    for table in &faculty_report.tables {
        let safe_name = table.title.replace('/', "_").replace(' ', "_");
        let csv_path = tables_dir.join(format!("{}.csv", safe_name));
        let mut writer = Writer::from_path(csv_path)?;

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }

        writer.flush()?;
    }

    Ok(())
}

fn print_summary(faculty_report: &FacultyReport) {
    println!("\n📊 SUMMARY");
    println!("==========\n");
    println!("Faculty: {} ({})", faculty_report.context.faculty_name, faculty_report.context.employee_id);

    for table in &faculty_report.tables {
        println!("   📈 {} - {} subject rows", table.title, table.rows.len());
    }
}

// Clean up previous results from output directory
fn clean_output_directory(output_dir: &str) -> Result<()> {
    let output_path = Path::new(output_dir);

    if !output_path.exists() {
        return Ok(());
    }

    println!("🧹 Cleaning previous results...");

    // List of files/directories to clean
    let items_to_clean = ["summary.txt", "report.html", "tables"];

    for item in &items_to_clean {
        let item_path = output_path.join(item);

        if item_path.exists() {
            if item_path.is_file() {
                fs::remove_file(&item_path)?;
                println!("   🗑️  Removed file: {}", item);
            } else if item_path.is_dir() {
                fs::remove_dir_all(&item_path)?;
                println!("   🗑️  Removed directory: {}", item);
            }
        }
    }

    println!("   ✅ Output directory cleaned");
    Ok(())
}
