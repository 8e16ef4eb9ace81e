//! Admin downloads of a candidate's resume and photo.
//!
//! Bytes are served exactly as decoded at registration, under the media type
//! recorded then (an allow-listed type or `application/octet-stream`).
//! Responses carry a content-hash `ETag` and honour `If-None-Match`; the
//! router adds `X-Content-Type-Options: nosniff`.

use axum::{
  extract::{Path, State, rejection::PathRejection},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use jobmela_core::{candidate::AttachmentKind, store::CandidateStore};

use crate::{
  AppState,
  auth::Authenticated,
  error::Error,
  etag::{compute_etag, if_none_match_hits},
};

/// `GET /api/registration/candidates/{id}/resume`
pub async fn resume<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let Path(id) = id?;
  serve(&state, id, AttachmentKind::Resume, &headers).await
}

/// `GET /api/registration/candidates/{id}/photo`
pub async fn photo<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let Path(id) = id?;
  serve(&state, id, AttachmentKind::Photo, &headers).await
}

async fn serve<S>(
  state: &AppState<S>,
  id: i64,
  kind: AttachmentKind,
  headers: &HeaderMap,
) -> Result<Response, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let attachment = state
    .store
    .attachment(id, kind)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound)?;

  let etag = compute_etag(&attachment.bytes);

  let not_modified = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| if_none_match_hits(v, &etag));
  if not_modified {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  let disposition = match kind {
    AttachmentKind::Photo => "inline".to_owned(),
    AttachmentKind::Resume => {
      let name = state
        .store
        .get(id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?
        .map(|c| c.full_name)
        .unwrap_or_default();
      format!(
        "attachment; filename=\"{}_Resume.{}\"",
        file_stem(&name, id),
        extension(&attachment.media_type)
      )
    }
  };

  Ok(
    (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, attachment.media_type),
        (header::ETAG, etag),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      Bytes::from(attachment.bytes),
    )
      .into_response(),
  )
}

/// Header-safe file stem: ASCII alphanumerics kept, everything else `_`.
fn file_stem(name: &str, id: i64) -> String {
  let stem: String = name
    .trim()
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
    .collect();
  if stem.is_empty() { format!("candidate_{id}") } else { stem }
}

fn extension(media_type: &str) -> &'static str {
  match media_type {
    "application/pdf" => "pdf",
    "application/msword" => "doc",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
    "image/png" => "png",
    "image/jpeg" => "jpg",
    "image/gif" => "gif",
    "image/webp" => "webp",
    "image/bmp" => "bmp",
    _ => "bin",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_stem_is_header_safe() {
    assert_eq!(file_stem("Asha Rao", 1), "Asha_Rao");
    assert_eq!(file_stem("  \"Q\";x ", 1), "_Q__x");
    assert_eq!(file_stem("", 9), "candidate_9");
  }

  #[test]
  fn extension_follows_media_type() {
    assert_eq!(extension("application/pdf"), "pdf");
    assert_eq!(extension("text/plain"), "bin");
  }
}
