use std::io::{self, BufRead, Write};

use chrono::{Duration, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{load_cli_config, save_cli_config, Session};
use crate::cli::utils::{output_data, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login as the site admin")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };

            let mut config = load_cli_config()?;
            let client = ApiClient::new(&config)?;
            let data = client
                .post("/admin/login", &json!({ "username": username, "password": password }))
                .await?;

            let token = data["token"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("login response carried no token"))?
                .to_string();
            let expires_in = data["expiresIn"].as_i64().unwrap_or(0);
            let expires_at = Utc::now() + Duration::seconds(expires_in);

            config.session = Some(Session {
                username: username.clone(),
                token,
                expires_at,
            });
            save_cli_config(&config)?;

            output_success(
                &output_format,
                &format!("Logged in as '{}' on {}", username, config.server_url),
                Some(json!({ "username": username, "expires_at": expires_at })),
            )
        }
        AuthCommands::Logout => {
            let mut config = load_cli_config()?;
            config.session = None;
            save_cli_config(&config)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let config = load_cli_config()?;
            let status = match &config.session {
                Some(s) => json!({
                    "server_url": config.server_url,
                    "username": s.username,
                    "expires_at": s.expires_at,
                    "expired": s.is_expired(),
                }),
                None => json!({ "server_url": config.server_url, "username": null }),
            };

            output_data(&output_format, &status, |status| {
                println!("Server: {}", status["server_url"].as_str().unwrap_or("-"));
                match status["username"].as_str() {
                    Some(user) if status["expired"] == json!(true) => {
                        println!("Session for '{}' has expired", user)
                    }
                    Some(user) => println!(
                        "Logged in as '{}' until {}",
                        user,
                        status["expires_at"].as_str().unwrap_or("?")
                    ),
                    None => println!("Not logged in"),
                }
            })
        }
    }
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
