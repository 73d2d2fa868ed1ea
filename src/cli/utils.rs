use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a payload as pretty JSON, or via `text` for human output
pub fn output_data(
    output_format: &OutputFormat,
    data: &Value,
    text: impl FnOnce(&Value),
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text(data),
    }
    Ok(())
}

/// One line per page: slug, title, state, revision, id
pub fn print_page_row(page: &Value) {
    let state = if page["isActive"].as_bool().unwrap_or(false) {
        "active"
    } else {
        "inactive"
    };
    println!(
        "{:<24} {:<32} {:<8} r{:<4} {}",
        page["slug"].as_str().unwrap_or("-"),
        page["title"].as_str().unwrap_or("-"),
        state,
        page["revision"].as_i64().unwrap_or(0),
        page["id"].as_str().unwrap_or("-"),
    );
}

/// Page header followed by its sections in stored order
pub fn print_page(page: &Value) {
    print_page_row(page);
    if let Some(sections) = page["sections"].as_array() {
        for section in sections {
            println!(
                "  [{:>3}] {:<14} {:<34} {}",
                section["sortOrder"].as_i64().unwrap_or(0),
                section["type"].as_str().unwrap_or("?"),
                section["id"].as_str().unwrap_or("-"),
                section["title"].as_str().unwrap_or(""),
            );
        }
    }
}

