use serde_json::json;

use crate::cli::config::{config_file, load_cli_config, save_cli_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(server: String, output_format: OutputFormat) -> anyhow::Result<()> {
    url::Url::parse(&server).map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", server, e))?;

    let mut config = load_cli_config()?;
    if config.server_url != server {
        // A token from another server is useless here
        config.session = None;
    }
    config.server_url = server;
    save_cli_config(&config)?;

    let path = config_file()?;
    output_success(
        &output_format,
        &format!("Configuration written to {}", path.display()),
        Some(json!({ "server_url": config.server_url, "config_file": path })),
    )
}
