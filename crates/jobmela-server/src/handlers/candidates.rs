//! Admin handlers for `/api/registration/candidates`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/candidates` | Every candidate, newest first |
//! | `GET`  | `/candidates/search` | `?q=&applyingFor=&experience=` |
//! | `GET`  | `/candidates/{id}` | 404 if not found |
//!
//! None of these responses carry attachment bytes.

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
  },
};
use jobmela_core::{
  candidate::{CandidateSummary, Experience},
  store::{CandidateQuery, CandidateStore},
};
use serde::Deserialize;

use crate::{AppState, auth::Authenticated, error::Error};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/registration/candidates`
pub async fn list<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CandidateSummary>>, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let candidates = state
    .store
    .list()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(candidates))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
  /// Free text over name, email, mobile and qualification.
  pub q:            Option<String>,
  pub applying_for: Option<String>,
  pub experience:   Option<Experience>,
}

fn non_blank(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// `GET /api/registration/candidates/search[?q=...][&applyingFor=...][&experience=...]`
pub async fn search<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<CandidateSummary>>, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let Query(params) = params?;
  let query = CandidateQuery {
    text:         non_blank(params.q),
    applying_for: non_blank(params.applying_for),
    experience:   params.experience,
  };

  let candidates = state
    .store
    .search(&query)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(candidates))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/registration/candidates/{id}`
pub async fn get_one<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CandidateSummary>, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let Path(id) = id?;
  let candidate = state
    .store
    .get(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound)?;
  Ok(Json(candidate))
}
