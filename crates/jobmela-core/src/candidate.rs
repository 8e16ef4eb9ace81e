//! Candidate types, the single entity of the registration portal.
//!
//! A candidate is written once at registration and never updated. The
//! resume and photo bytes travel separately from the [`CandidateSummary`]
//! read model so listings never carry binary payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
pub enum Gender {
  Male,
  Female,
  Other,
}

/// Whether the candidate has prior work experience.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
pub enum Experience {
  Fresher,
  Experienced,
}

// ─── Attachments ─────────────────────────────────────────────────────────────

/// Which of the two uploaded files an [`Attachment`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
  Resume,
  Photo,
}

/// A decoded upload: raw bytes plus the media type declared by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
  pub media_type: String,
  pub bytes:      Vec<u8>,
}

// ─── NewCandidate ────────────────────────────────────────────────────────────

/// Input to [`crate::store::CandidateStore::insert`].
/// `id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCandidate {
  pub full_name:          String,
  pub father_name:        String,
  pub date_of_birth:      NaiveDate,
  pub gender:             Gender,
  pub mobile:             String,
  pub email:              String,
  pub aadhaar:            Option<String>,
  pub qualification:      String,
  pub specialization:     String,
  pub year_of_passing:    i32,
  pub percentage:         String,
  pub applying_for:       String,
  pub experience:         Experience,
  pub skills:             String,
  pub preferred_location: String,
  pub resume:             Attachment,
  pub photo:              Attachment,
}

// ─── CandidateSummary ────────────────────────────────────────────────────────

/// Every persisted column except the attachment bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
  pub id:                 i64,
  pub full_name:          String,
  pub father_name:        String,
  pub date_of_birth:      NaiveDate,
  pub gender:             Gender,
  pub mobile:             String,
  pub email:              String,
  pub aadhaar:            Option<String>,
  pub qualification:      String,
  pub specialization:     String,
  pub year_of_passing:    i32,
  pub percentage:         String,
  pub applying_for:       String,
  pub experience:         Experience,
  pub skills:             String,
  pub preferred_location: String,
  pub resume_type:        String,
  pub photo_type:         String,
  /// Server-assigned insert timestamp.
  pub created_at:         DateTime<Utc>,
}

impl CandidateSummary {
  /// Build the summary of a freshly inserted candidate.
  pub fn from_new(id: i64, created_at: DateTime<Utc>, c: &NewCandidate) -> Self {
    Self {
      id,
      full_name: c.full_name.clone(),
      father_name: c.father_name.clone(),
      date_of_birth: c.date_of_birth,
      gender: c.gender,
      mobile: c.mobile.clone(),
      email: c.email.clone(),
      aadhaar: c.aadhaar.clone(),
      qualification: c.qualification.clone(),
      specialization: c.specialization.clone(),
      year_of_passing: c.year_of_passing,
      percentage: c.percentage.clone(),
      applying_for: c.applying_for.clone(),
      experience: c.experience,
      skills: c.skills.clone(),
      preferred_location: c.preferred_location.clone(),
      resume_type: c.resume.media_type.clone(),
      photo_type: c.photo.media_type.clone(),
      created_at,
    }
  }
}
