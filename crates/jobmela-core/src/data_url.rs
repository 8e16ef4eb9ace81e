//! Decoding of browser data URLs (`data:<type>;base64,<payload>`).
//!
//! Only the part after the first comma carries the file; the prefix is read
//! for its media type and otherwise ignored. A declared type outside the
//! allow-list for the attachment kind is recorded as `application/octet-stream`,
//! so a registrant cannot make the admin's browser render an upload as markup.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::{
  Error, Result,
  candidate::{Attachment, AttachmentKind},
};

/// Media type recorded when the prefix does not declare a usable one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

const RESUME_MEDIA_TYPES: &[&str] = &[
  "application/pdf",
  "application/msword",
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Raster formats only; `image/svg+xml` can carry script.
const PHOTO_MEDIA_TYPES: &[&str] =
  &["image/jpeg", "image/png", "image/gif", "image/webp", "image/bmp"];

/// Split a data URL, decode its base64 payload and settle its media type.
pub fn decode(input: &str, kind: AttachmentKind) -> Result<Attachment> {
  let (prefix, payload) = input.split_once(',').ok_or(Error::MalformedDataUrl)?;
  let bytes = B64.decode(payload.trim())?;
  Ok(Attachment { media_type: media_type(prefix, kind), bytes })
}

/// `<type>/<subtype>` from a prefix such as `data:image/png;base64`, if the
/// kind allows it.
fn media_type(prefix: &str, kind: AttachmentKind) -> String {
  let allowed = match kind {
    AttachmentKind::Resume => RESUME_MEDIA_TYPES,
    AttachmentKind::Photo => PHOTO_MEDIA_TYPES,
  };
  let rest = prefix.trim().strip_prefix("data:").unwrap_or(prefix);
  rest
    .split(';')
    .next()
    .map(|mt| mt.trim().to_ascii_lowercase())
    .filter(|mt| allowed.contains(&mt.as_str()))
    .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_owned())
}
