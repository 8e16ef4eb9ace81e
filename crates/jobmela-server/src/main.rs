//! jobmela-server binary.
//!
//! `jobmela-server [--config config.toml]` serves the registration API.
//! `jobmela-server --hash-password` reads a password from stdin and prints
//! the argon2 PHC string to put in `admin_password_hash`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use jobmela_server::{AppState, ServerConfig, auth::hash_password};
use jobmela_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "JobMela registration server")]
struct Cli {
  /// TOML configuration file; `JOBMELA_*` environment variables override it.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password read from stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  if cli.hash_password {
    let hash = hash_password(&read_password()?)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  let config = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  serve(config).await
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  let store = SqliteStore::open(&config.database_path)
    .await
    .with_context(|| format!("failed to open database at {:?}", config.database_path))?;
  tracing::info!(path = %config.database_path.display(), "candidate store ready");

  let address  = config.listen_address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(
    admin = %config.admin_username,
    max_body_bytes = config.max_body_bytes,
    "listening on http://{address}"
  );

  let app = jobmela_server::router(AppState::new(store, config));
  axum::serve(listener, app).await.context("server error")
}

fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\n', '\r']).to_string();
  anyhow::ensure!(!password.is_empty(), "password must not be empty");
  Ok(password)
}
