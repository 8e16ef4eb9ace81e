//! `GET /api/registration/stats`: registration counts for the dashboard.

use axum::{Json, extract::State};
use jobmela_core::store::{CandidateStore, Statistics};

use crate::{AppState, auth::Authenticated, error::Error};

pub async fn handler<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Statistics>, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let stats = state
    .store
    .statistics()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(stats))
}
