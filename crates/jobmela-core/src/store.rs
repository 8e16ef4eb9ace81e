//! The `CandidateStore` trait and supporting query types.
//!
//! Implemented by storage backends (e.g. `jobmela-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::{collections::BTreeMap, future::Future};

use serde::Serialize;

use crate::candidate::{
  Attachment, AttachmentKind, CandidateSummary, Experience, NewCandidate,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CandidateStore::search`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
  /// Case-insensitive substring matched against full name, email, mobile and
  /// qualification.
  pub text:         Option<String>,
  /// Exact match on the job category applied for.
  pub applying_for: Option<String>,
  pub experience:   Option<Experience>,
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Outcome of [`CandidateStore::insert`].
#[derive(Debug, Clone)]
pub enum InsertOutcome {
  Created(CandidateSummary),
  /// The email or mobile is already registered. Reported by the backend's
  /// uniqueness constraint, so it also covers two concurrent submissions
  /// that both passed [`CandidateStore::find_duplicate`].
  Duplicate,
}

/// Registration counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
  pub total:           u64,
  pub by_applying_for: BTreeMap<String, u64>,
  pub by_experience:   ExperienceCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceCounts {
  #[serde(rename = "Fresher")]
  pub fresher:     u64,
  #[serde(rename = "Experienced")]
  pub experienced: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a candidate store backend.
///
/// Candidates are insert-only: nothing in this trait updates or deletes a
/// row. All methods return `Send` futures so the store can back a
/// multi-threaded axum server.
pub trait CandidateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the id of a stored candidate whose email equals `email` or whose
  /// mobile equals `mobile`, if any.
  fn find_duplicate<'a>(
    &'a self,
    email: &'a str,
    mobile: &'a str,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + 'a;

  /// Persist a new candidate. `id` and `created_at` are assigned here.
  fn insert(
    &self,
    candidate: NewCandidate,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// All candidates, newest first.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<CandidateSummary>, Self::Error>> + Send + '_;

  /// A single candidate by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CandidateSummary>, Self::Error>> + Send + '_;

  /// The stored bytes of one attachment. Returns `None` if the candidate
  /// does not exist.
  fn attachment(
    &self,
    id: i64,
    kind: AttachmentKind,
  ) -> impl Future<Output = Result<Option<Attachment>, Self::Error>> + Send + '_;

  /// Candidates matching `query`, newest first.
  fn search<'a>(
    &'a self,
    query: &'a CandidateQuery,
  ) -> impl Future<Output = Result<Vec<CandidateSummary>, Self::Error>> + Send + 'a;

  fn statistics(
    &self,
  ) -> impl Future<Output = Result<Statistics, Self::Error>> + Send + '_;
}
