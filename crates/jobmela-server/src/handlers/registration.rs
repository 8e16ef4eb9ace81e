//! `POST /api/registration`: the registration write path.
//!
//! Order of operations: validate every field, reject a known email/mobile,
//! decode the attachments, insert. The insert itself is guarded by the
//! store's uniqueness constraints, so a duplicate that slips past the
//! existence check (two concurrent submissions) is still reported as 409.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use jobmela_core::{
  registration::RegistrationForm,
  store::{CandidateStore, InsertOutcome},
};
use serde_json::json;

use crate::{AppState, error::Error};

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  payload: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
{
  let Json(form) = payload?;
  let registration = form.validate().map_err(Error::Validation)?;

  let existing = state
    .store
    .find_duplicate(&registration.email, &registration.mobile)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if let Some(existing_id) = existing {
    tracing::warn!(existing_id, "registration rejected: email or mobile taken");
    return Err(Error::Duplicate);
  }

  let candidate = registration.into_new_candidate()?;

  match state
    .store
    .insert(candidate)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
  {
    InsertOutcome::Created(summary) => {
      tracing::info!(id = summary.id, "candidate registered");
      Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful" })),
      ))
    }
    InsertOutcome::Duplicate => {
      tracing::warn!("registration rejected at insert: email or mobile taken");
      Err(Error::Duplicate)
    }
  }
}
