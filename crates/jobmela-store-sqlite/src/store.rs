//! [`SqliteStore`], the SQLite implementation of [`CandidateStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;

use jobmela_core::{
  candidate::{Attachment, AttachmentKind, CandidateSummary, Experience, NewCandidate},
  store::{CandidateQuery, CandidateStore, ExperienceCounts, InsertOutcome, Statistics},
};

use crate::{
  encode::{RawSummary, contains_pattern, decode_experience, encode_date, encode_dt},
  schema::{SCHEMA, SUMMARY_COLUMNS},
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A candidate store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// True when `e` is a UNIQUE constraint failure (SQLITE_CONSTRAINT_UNIQUE).
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── CandidateStore impl ─────────────────────────────────────────────────────

impl CandidateStore for SqliteStore {
  type Error = crate::Error;

  async fn find_duplicate(&self, email: &str, mobile: &str) -> Result<Option<i64>> {
    let email  = email.to_owned();
    let mobile = mobile.to_owned();

    let id = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id FROM candidates WHERE email = ?1 OR mobile = ?2 LIMIT 1",
            rusqlite::params![email, mobile],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(id)
  }

  async fn insert(&self, candidate: NewCandidate) -> Result<InsertOutcome> {
    // Truncated to the stored precision so the returned summary equals a re-read.
    let created_at  = Utc::now().trunc_subsecs(6);
    let mut summary = CandidateSummary::from_new(0, created_at, &candidate);
    let at_str      = encode_dt(created_at);

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let c = &candidate;
        let inserted = conn.execute(
          "INSERT INTO candidates (
             full_name, father_name, date_of_birth, gender, mobile, email,
             aadhaar, qualification, specialization, year_of_passing,
             percentage, applying_for, experience, skills, preferred_location,
             resume, resume_type, photo, photo_type, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
          rusqlite::params![
            c.full_name,
            c.father_name,
            encode_date(c.date_of_birth),
            c.gender.to_string(),
            c.mobile,
            c.email,
            c.aadhaar,
            c.qualification,
            c.specialization,
            c.year_of_passing,
            c.percentage,
            c.applying_for,
            c.experience.to_string(),
            c.skills,
            c.preferred_location,
            c.resume.bytes,
            c.resume.media_type,
            c.photo.bytes,
            c.photo.media_type,
            at_str,
          ],
        );
        match inserted {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(match id {
      Some(id) => {
        summary.id = id;
        InsertOutcome::Created(summary)
      }
      None => InsertOutcome::Duplicate,
    })
  }

  async fn list(&self) -> Result<Vec<CandidateSummary>> {
    let raws: Vec<RawSummary> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {SUMMARY_COLUMNS} FROM candidates ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn get(&self, id: i64) -> Result<Option<CandidateSummary>> {
    let raw: Option<RawSummary> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM candidates WHERE id = ?1");
        Ok(conn
          .query_row(&sql, rusqlite::params![id], RawSummary::from_row)
          .optional()?)
      })
      .await?;

    raw.map(RawSummary::into_summary).transpose()
  }

  async fn attachment(&self, id: i64, kind: AttachmentKind) -> Result<Option<Attachment>> {
    let sql = match kind {
      AttachmentKind::Resume => "SELECT resume, resume_type FROM candidates WHERE id = ?1",
      AttachmentKind::Photo  => "SELECT photo, photo_type FROM candidates WHERE id = ?1",
    };

    let attachment = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(sql, rusqlite::params![id], |row| {
            Ok(Attachment {
              bytes:      row.get(0)?,
              media_type: row.get(1)?,
            })
          })
          .optional()?)
      })
      .await?;

    Ok(attachment)
  }

  async fn search(&self, query: &CandidateQuery) -> Result<Vec<CandidateSummary>> {
    let text_pattern = query.text.as_deref().map(contains_pattern);
    let applying_for = query.applying_for.clone();
    let experience   = query.experience.map(|e| e.to_string());

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        // LIKE is case-insensitive for ASCII in SQLite.
        let sql = format!(
          r"SELECT {SUMMARY_COLUMNS}
            FROM candidates
            WHERE (?1 IS NULL
                   OR full_name     LIKE ?1 ESCAPE '\'
                   OR email         LIKE ?1 ESCAPE '\'
                   OR mobile        LIKE ?1 ESCAPE '\'
                   OR qualification LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR applying_for = ?2)
              AND (?3 IS NULL OR experience = ?3)
            ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![text_pattern, applying_for, experience],
            RawSummary::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn statistics(&self) -> Result<Statistics> {
    let (total, by_job, by_exp): (i64, Vec<(String, i64)>, Vec<(String, i64)>) = self
      .conn
      .call(|conn| {
        let total = conn.query_row("SELECT COUNT(*) FROM candidates", [], |r| r.get(0))?;

        let mut stmt = conn.prepare(
          "SELECT applying_for, COUNT(*) FROM candidates GROUP BY applying_for",
        )?;
        let by_job = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
          "SELECT experience, COUNT(*) FROM candidates GROUP BY experience",
        )?;
        let by_exp = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, by_job, by_exp))
      })
      .await?;

    let mut stats = Statistics {
      total: u64::try_from(total)?,
      ..Statistics::default()
    };
    for (job, count) in by_job {
      stats.by_applying_for.insert(job, u64::try_from(count)?);
    }
    let mut counts = ExperienceCounts::default();
    for (exp, count) in by_exp {
      let count = u64::try_from(count)?;
      match decode_experience(&exp)? {
        Experience::Fresher     => counts.fresher = count,
        Experience::Experienced => counts.experienced = count,
      }
    }
    stats.by_experience = counts;

    Ok(stats)
  }
}
