//! Error types for `jobmela-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("data URL has no `,` between its metadata and its payload")]
  MalformedDataUrl,

  #[error("invalid base64 payload: {0}")]
  Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
