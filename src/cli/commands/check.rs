use std::path::PathBuf;

use serde_json::{json, Value};

use crate::cli::config::load_document;
use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::page::editor::build_sections;
use crate::page::payload::validate_page_fields;
use crate::page::{render_section, sorted_for_display, PageInput};

/// Runs the server-side create validation locally and previews each section's block.
pub async fn handle(file: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    let input: PageInput = load_document(&file)?;
    let report = check_document(input)?;

    output_data(&output_format, &report, |report| {
        println!(
            "✓ {} ({}) is valid",
            report["slug"].as_str().unwrap_or("?"),
            report["title"].as_str().unwrap_or("?")
        );
        for section in report["sections"].as_array().into_iter().flatten() {
            println!(
                "  [{:>3}] {:<14} -> {}",
                section["sortOrder"].as_i64().unwrap_or(0),
                section["type"].as_str().unwrap_or("?"),
                section["block"].as_str().unwrap_or("?")
            );
        }
    })
}

fn check_document(input: PageInput) -> anyhow::Result<Value> {
    validate_page_fields(
        &input.slug,
        &input.title,
        input.meta_title.as_deref(),
        input.meta_description.as_deref(),
    )?;

    let mut sections = build_sections(input.sections)?;
    sorted_for_display(&mut sections);
    let rendered: Vec<_> = sections.iter().map(render_section).collect();

    Ok(json!({
        "slug": input.slug,
        "title": input.title,
        "sections": rendered,
    }))
}
