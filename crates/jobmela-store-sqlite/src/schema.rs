//! SQL schema for the JobMela SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are insert-only. No UPDATE or DELETE is ever issued.
-- email and mobile are each UNIQUE on their own; a violation on insert is
-- reported to callers as a duplicate registration.
CREATE TABLE IF NOT EXISTS candidates (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name          TEXT    NOT NULL,
    father_name        TEXT    NOT NULL,
    date_of_birth      TEXT    NOT NULL,   -- YYYY-MM-DD
    gender             TEXT    NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    mobile             TEXT    NOT NULL UNIQUE,
    email              TEXT    NOT NULL COLLATE NOCASE UNIQUE,
    aadhaar            TEXT,
    qualification      TEXT    NOT NULL,
    specialization     TEXT    NOT NULL,
    year_of_passing    INTEGER NOT NULL,
    percentage         TEXT    NOT NULL,
    applying_for       TEXT    NOT NULL,
    experience         TEXT    NOT NULL CHECK (experience IN ('Fresher', 'Experienced')),
    skills             TEXT    NOT NULL,
    preferred_location TEXT    NOT NULL,
    resume             BLOB    NOT NULL,
    resume_type        TEXT    NOT NULL,
    photo              BLOB    NOT NULL,
    photo_type         TEXT    NOT NULL,
    created_at         TEXT    NOT NULL    -- RFC 3339 UTC, fixed microsecond width
);

CREATE INDEX IF NOT EXISTS candidates_created_idx ON candidates(created_at);

PRAGMA user_version = 1;
";

/// Columns of a [`CandidateSummary`](jobmela_core::candidate::CandidateSummary),
/// in the order [`crate::encode::RawSummary::from_row`] reads them.
pub const SUMMARY_COLUMNS: &str = "
    id, full_name, father_name, date_of_birth, gender, mobile, email, aadhaar,
    qualification, specialization, year_of_passing, percentage, applying_for,
    experience, skills, preferred_location, resume_type, photo_type, created_at
";
