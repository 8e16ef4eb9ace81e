//! HTTP layer for the JobMela registration portal.
//!
//! Exposes an axum [`Router`] with the public registration endpoint and the
//! Basic-auth protected admin views, backed by any [`CandidateStore`].

pub mod auth;
pub mod error;
pub mod etag;
pub mod handlers;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  http::{HeaderValue, header},
  routing::{get, post},
};
use jobmela_core::store::CandidateStore;
use serde::Deserialize;
use tower_http::{
  cors::CorsLayer,
  set_header::SetResponseHeaderLayer,
  trace::TraceLayer,
};

use handlers::{attachments, candidates, probes, registration, stats};

/// Request bodies above this size are rejected with 413. Attachments travel
/// base64-encoded inside the JSON body, so this bounds them too.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `JOBMELA_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  pub database_path:       PathBuf,
  pub admin_username:      String,
  pub admin_password_hash: String,
  #[serde(default = "default_max_body_bytes")]
  pub max_body_bytes:      usize,
  /// Allow any origin. The registration form is usually served from a
  /// different origin than this API.
  #[serde(default = "default_cors_permissive")]
  pub cors_permissive:     bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 4000 }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }
fn default_cors_permissive() -> bool { true }

impl ServerConfig {
  /// Read `file` (optional) overlaid with `JOBMELA_*` environment variables.
  /// A leading `~/` in `database_path` is expanded.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    let mut cfg: Self = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("JOBMELA"))
      .build()?
      .try_deserialize()?;
    cfg.database_path = expand_tilde(&cfg.database_path);
    Ok(cfg)
  }

  pub fn listen_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CandidateStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S: CandidateStore> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Self {
    Self { store: Arc::new(store), config: Arc::new(config) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the portal.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let cors_permissive = state.config.cors_permissive;

  let app = Router::new()
    .route("/",                                         get(probes::root))
    .route("/api/registration",                         post(registration::submit::<S>))
    .route("/api/registration/candidates",              get(candidates::list::<S>))
    .route("/api/registration/candidates/search",       get(candidates::search::<S>))
    .route("/api/registration/candidates/{id}",         get(candidates::get_one::<S>))
    .route("/api/registration/candidates/{id}/resume",  get(attachments::resume::<S>))
    .route("/api/registration/candidates/{id}/photo",   get(attachments::photo::<S>))
    .route("/api/registration/stats",                   get(stats::handler::<S>))
    .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
    .layer(SetResponseHeaderLayer::overriding(
      header::X_CONTENT_TYPE_OPTIONS,
      HeaderValue::from_static("nosniff"),
    ))
    .layer(TraceLayer::new_for_http())
    .with_state(state);

  if cors_permissive {
    app.layer(CorsLayer::permissive())
  } else {
    app
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
