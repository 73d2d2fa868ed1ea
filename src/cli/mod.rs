pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Atelier CLI - manage site pages through the Atelier API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Initialize the configuration directory and target server")]
    Init {
        #[arg(long, help = "API base URL", default_value = config::DEFAULT_SERVER_URL)]
        server: String,
    },

    #[command(about = "Admin authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Page and section management")]
    Pages {
        #[command(subcommand)]
        cmd: commands::pages::PagesCommands,
    },

    #[command(about = "Validate a page file offline and preview its rendering")]
    Check {
        #[arg(help = "Page document (.json, .yaml or .yml)")]
        file: std::path::PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Init { server } => commands::init::handle(server, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Pages { cmd } => commands::pages::handle(cmd, output_format).await,
        Commands::Check { file } => commands::check::handle(file, output_format).await,
    }
}
