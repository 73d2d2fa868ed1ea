use std::path::PathBuf;

use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::{load_cli_config, load_document};
use crate::cli::utils::{output_data, output_success, print_page, print_page_row};
use crate::cli::OutputFormat;
use crate::page::{PageInput, PagePatch};

#[derive(Subcommand)]
pub enum PagesCommands {
    #[command(about = "List all pages, active or not")]
    List {
        #[arg(long, help = "Ordering, e.g. \"title asc\" (default: updatedAt desc)")]
        order: Option<String>,
    },

    #[command(about = "Show one page by id")]
    Get {
        #[arg(help = "Page id")]
        id: String,
    },

    #[command(about = "Create a page from a JSON or YAML file")]
    Create {
        #[arg(help = "Page document")]
        file: PathBuf,
    },

    #[command(about = "Apply a partial update from a JSON or YAML file")]
    Update {
        #[arg(help = "Page id")]
        id: String,
        #[arg(help = "Patch document")]
        file: PathBuf,
        #[arg(long, help = "Fail if the page is no longer at this revision")]
        revision: Option<i64>,
    },

    #[command(about = "Delete a page")]
    Delete {
        #[arg(help = "Page id")]
        id: String,
    },

    #[command(about = "Reorder sections; sections not listed are removed")]
    Reorder {
        #[arg(help = "Page id")]
        id: String,
        #[arg(help = "Section ids in display order", required = true)]
        sections: Vec<String>,
        #[arg(long, help = "Fail if the page is no longer at this revision")]
        revision: Option<i64>,
    },

    #[command(about = "Fetch the public rendering of a page by slug")]
    Render {
        #[arg(help = "Page slug")]
        slug: String,
    },
}

pub async fn handle(cmd: PagesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_cli_config()?;
    let client = ApiClient::new(&config)?;

    match cmd {
        PagesCommands::List { order } => {
            client.require_session()?;
            let path = match order {
                Some(order) => format!("/admin/pages?order={}", url_encode(&order)),
                None => "/admin/pages".to_string(),
            };
            let pages = client.get(&path).await?;

            output_data(&output_format, &pages, |pages| match pages.as_array() {
                Some(list) if !list.is_empty() => list.iter().for_each(print_page_row),
                _ => println!("No pages"),
            })
        }
        PagesCommands::Get { id } => {
            client.require_session()?;
            let page = client.get(&format!("/admin/pages/{}", id)).await?;
            output_data(&output_format, &page, print_page)
        }
        PagesCommands::Create { file } => {
            client.require_session()?;
            let input: PageInput = load_document(&file)?;
            let page = client.post("/admin/pages", &input).await?;
            output_success(&output_format, &describe("Created", &page), Some(page))
        }
        PagesCommands::Update { id, file, revision } => {
            client.require_session()?;
            let patch: PagePatch = load_document(&file)?;
            let page = client
                .put(&format!("/admin/pages/{}", id), &patch, revision)
                .await?;
            output_success(&output_format, &describe("Updated", &page), Some(page))
        }
        PagesCommands::Delete { id } => {
            client.require_session()?;
            client.delete(&format!("/admin/pages/{}", id)).await?;
            output_success(
                &output_format,
                &format!("Page '{}' deleted", id),
                Some(json!({ "id": id })),
            )
        }
        PagesCommands::Reorder { id, sections, revision } => {
            client.require_session()?;
            let page = client
                .put(
                    &format!("/admin/pages/{}/sections/reorder", id),
                    &json!({ "sections": sections }),
                    revision,
                )
                .await?;
            output_data(&output_format, &page, print_page)
        }
        PagesCommands::Render { slug } => {
            let rendered = client.get(&format!("/pages/{}/render", slug)).await?;
            output_data(&output_format, &rendered, |rendered| {
                println!("{}", rendered["headTitle"].as_str().unwrap_or("-"));
                for section in rendered["sections"].as_array().into_iter().flatten() {
                    println!(
                        "  {:<14} -> {}",
                        section["type"].as_str().unwrap_or("?"),
                        section["block"].as_str().unwrap_or("?")
                    );
                }
            })
        }
    }
}

fn describe(verb: &str, page: &Value) -> String {
    format!(
        "{} page '{}' (revision {})",
        verb,
        page["slug"].as_str().unwrap_or("?"),
        page["revision"].as_i64().unwrap_or(0)
    )
}

fn url_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
