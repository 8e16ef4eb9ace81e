//! ETag computation for attachment downloads.
//!
//! Attachments never change after registration, so a SHA-256 over the bytes
//! is a strong validator.

use sha2::{Digest, Sha256};

/// Quoted hex SHA-256 of `bytes`.
pub fn compute_etag(bytes: &[u8]) -> String {
  format!("\"{}\"", hex::encode(Sha256::digest(bytes)))
}

/// True when an `If-None-Match` header value names `etag`.
///
/// Accepts `*`, comma-separated lists, weak (`W/`) tags, and tags sent
/// without their surrounding quotes.
pub fn if_none_match_hits(header: &str, etag: &str) -> bool {
  let want = strip_etag_quotes(etag);
  header.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || strip_etag_quotes(candidate.trim_start_matches("W/")) == want
  })
}

fn strip_etag_quotes(s: &str) -> &str { s.trim_matches('"') }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_bytes_same_etag() {
    assert_eq!(compute_etag(b"resume"), compute_etag(b"resume"));
    assert_ne!(compute_etag(b"resume"), compute_etag(b"resume2"));
  }

  #[test]
  fn etag_is_quoted_hex() {
    let etag = compute_etag(b"");
    assert!(etag.starts_with('"') && etag.ends_with('"'));
    assert_eq!(etag.len(), 64 + 2);
  }

  #[test]
  fn if_none_match_forms() {
    let etag = compute_etag(b"photo");
    let bare = etag.trim_matches('"').to_string();
    assert!(if_none_match_hits(&etag, &etag));
    assert!(if_none_match_hits(&bare, &etag));
    assert!(if_none_match_hits(&format!("W/{etag}"), &etag));
    assert!(if_none_match_hits(&format!("\"other\", {etag}"), &etag));
    assert!(if_none_match_hits("*", &etag));
    assert!(!if_none_match_hits("\"other\"", &etag));
  }
}
