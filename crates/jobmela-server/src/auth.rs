//! Admin access control.
//!
//! Admin routes take an [`Authenticated`] argument. The extractor reads HTTP
//! Basic credentials and checks them against the `admin_username` and
//! `admin_password_hash` of [`ServerConfig`]. Every rejection is logged here
//! with its reason and answered with the same 401 challenge.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::{self, SaltString},
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderValue, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq as _;

use crate::{AppState, ServerConfig, error::Error};
use jobmela_core::store::CandidateStore;

/// `WWW-Authenticate` value sent with every 401.
pub const CHALLENGE: &str = "Basic realm=\"jobmela\"";

/// Admin credentials as configured, borrowed from [`ServerConfig`].
#[derive(Debug, Clone, Copy)]
pub struct AdminCredentials<'a> {
  pub username:      &'a str,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: &'a str,
}

impl ServerConfig {
  pub fn admin(&self) -> AdminCredentials<'_> {
    AdminCredentials {
      username:      &self.admin_username,
      password_hash: &self.admin_password_hash,
    }
  }
}

/// Zero-size marker: present in the handler means the request was authenticated.
pub struct Authenticated;

/// Why a request was refused admin access. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
  NoCredentials,
  Malformed,
  WrongCredentials,
  /// `admin_password_hash` is not a PHC string.
  UnusableHash,
}

impl Denied {
  fn reason(self) -> &'static str {
    match self {
      Denied::NoCredentials    => "no credentials",
      Denied::Malformed        => "malformed Basic credentials",
      Denied::WrongCredentials => "wrong username or password",
      Denied::UnusableHash     => "configured admin_password_hash is not a PHC string",
    }
  }
}

/// Argon2id PHC string for `password` with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// `user:password` from an `Authorization: Basic …` value.
fn basic_credentials(value: &HeaderValue) -> Option<(String, String)> {
  let (scheme, encoded) = value.to_str().ok()?.split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("basic") {
    return None;
  }
  let decoded = String::from_utf8(B64.decode(encoded.trim()).ok()?).ok()?;
  let (username, password) = decoded.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

/// Check the request's Basic credentials against `admin`.
///
/// The argon2 verification runs whether or not the username matches, and the
/// usernames are compared in constant time, so response timing does not
/// reveal which half of the pair was wrong.
pub fn verify_auth(headers: &HeaderMap, admin: AdminCredentials<'_>) -> Result<(), Denied> {
  let value = headers.get(header::AUTHORIZATION).ok_or(Denied::NoCredentials)?;
  let (username, password) = basic_credentials(value).ok_or(Denied::Malformed)?;
  let hash = PasswordHash::new(admin.password_hash).map_err(|_| Denied::UnusableHash)?;

  let password_ok = Argon2::default()
    .verify_password(password.as_bytes(), &hash)
    .is_ok();
  let username_ok: bool = Sha256::digest(username.as_bytes())
    .as_slice()
    .ct_eq(Sha256::digest(admin.username.as_bytes()).as_slice())
    .into();

  if username_ok & password_ok { Ok(()) } else { Err(Denied::WrongCredentials) }
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match verify_auth(&parts.headers, state.config.admin()) {
      Ok(()) => Ok(Authenticated),
      Err(Denied::UnusableHash) => {
        tracing::error!(uri = %parts.uri, reason = Denied::UnusableHash.reason(), "admin request rejected");
        Err(Error::Unauthorized)
      }
      Err(denied) => {
        tracing::warn!(uri = %parts.uri, reason = denied.reason(), "admin request rejected");
        Err(Error::Unauthorized)
      }
    }
  }
}
