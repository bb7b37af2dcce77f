use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use signup_cli::commands;
use signup_config::{resolve_base_url, BASE_URL_ENV, DEFAULT_BASE_URL, USERNAME_DEBOUNCE};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Base URL of the signup API
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the service once whether a username is free
    #[command(name = "check-username", alias = "check")]
    CheckUsername { username: String },
    /// Fill the form once and print the derived state as JSON
    Validate {
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
        #[arg(long, default_value_t = USERNAME_DEBOUNCE.as_millis() as u64)]
        debounce_ms: u64,
    },
    /// Read `field=value` lines from stdin and print every derived state
    Watch {
        #[arg(long, default_value_t = USERNAME_DEBOUNCE.as_millis() as u64)]
        debounce_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("default subscriber")?;

    let base_url = resolve_base_url(Some(cli.base_url));

    match cli.command {
        Commands::CheckUsername { username } => {
            commands::cmd_check_username(&base_url, &username).await?;
        }
        Commands::Validate {
            username,
            password,
            confirm_password,
            debounce_ms,
        } => {
            let state = commands::cmd_validate(
                &base_url,
                &username,
                &password,
                &confirm_password,
                Duration::from_millis(debounce_ms),
            )
            .await?;
            if !state.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Watch { debounce_ms } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            commands::cmd_watch(
                &base_url,
                stdin,
                &mut stdout,
                Duration::from_millis(debounce_ms),
            )
            .await?;
        }
    }

    Ok(())
}
