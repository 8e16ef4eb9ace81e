//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed microsecond width so that
//! lexical order equals chronological order. Dates are `YYYY-MM-DD`. The two
//! enums are stored by variant name.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use jobmela_core::candidate::{CandidateSummary, Experience, Gender};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_gender(s: &str) -> Result<Gender> {
  Gender::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "gender",
    value:  s.to_owned(),
  })
}

pub fn decode_experience(s: &str) -> Result<Experience> {
  Experience::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "experience",
    value:  s.to_owned(),
  })
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Wrap `text` in `%…%`, escaping LIKE metacharacters with `\`.
pub fn contains_pattern(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + 2);
  out.push('%');
  for ch in text.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(ch);
  }
  out.push('%');
  out
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `candidates` row (summary columns only).
pub struct RawSummary {
  pub id:                 i64,
  pub full_name:          String,
  pub father_name:        String,
  pub date_of_birth:      String,
  pub gender:             String,
  pub mobile:             String,
  pub email:              String,
  pub aadhaar:            Option<String>,
  pub qualification:      String,
  pub specialization:     String,
  pub year_of_passing:    i64,
  pub percentage:         String,
  pub applying_for:       String,
  pub experience:         String,
  pub skills:             String,
  pub preferred_location: String,
  pub resume_type:        String,
  pub photo_type:         String,
  pub created_at:         String,
}

impl RawSummary {
  /// Read a row selected with [`crate::schema::SUMMARY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      full_name:          row.get(1)?,
      father_name:        row.get(2)?,
      date_of_birth:      row.get(3)?,
      gender:             row.get(4)?,
      mobile:             row.get(5)?,
      email:              row.get(6)?,
      aadhaar:            row.get(7)?,
      qualification:      row.get(8)?,
      specialization:     row.get(9)?,
      year_of_passing:    row.get(10)?,
      percentage:         row.get(11)?,
      applying_for:       row.get(12)?,
      experience:         row.get(13)?,
      skills:             row.get(14)?,
      preferred_location: row.get(15)?,
      resume_type:        row.get(16)?,
      photo_type:         row.get(17)?,
      created_at:         row.get(18)?,
    })
  }

  pub fn into_summary(self) -> Result<CandidateSummary> {
    Ok(CandidateSummary {
      id:                 self.id,
      full_name:          self.full_name,
      father_name:        self.father_name,
      date_of_birth:      decode_date(&self.date_of_birth)?,
      gender:             decode_gender(&self.gender)?,
      mobile:             self.mobile,
      email:              self.email,
      aadhaar:            self.aadhaar,
      qualification:      self.qualification,
      specialization:     self.specialization,
      year_of_passing:    i32::try_from(self.year_of_passing)?,
      percentage:         self.percentage,
      applying_for:       self.applying_for,
      experience:         decode_experience(&self.experience)?,
      skills:             self.skills,
      preferred_location: self.preferred_location,
      resume_type:        self.resume_type,
      photo_type:         self.photo_type,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_sort_lexically() {
    let a = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let b = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
    let (ea, eb) = (encode_dt(a), encode_dt(b));
    assert_eq!(ea.len(), eb.len());
    assert!(ea < eb);
    assert_eq!(decode_dt(&eb).unwrap(), b);
  }

  #[test]
  fn like_metacharacters_are_escaped() {
    assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
  }

  #[test]
  fn unknown_gender_is_an_error() {
    assert!(matches!(
      decode_gender("robot"),
      Err(Error::UnknownVariant { column: "gender", .. })
    ));
  }
}
