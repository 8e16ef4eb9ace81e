//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use jobmela_core::{
  candidate::{Attachment, AttachmentKind, Experience, Gender, NewCandidate},
  store::{CandidateQuery, CandidateStore, InsertOutcome},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn candidate(name: &str, email: &str, mobile: &str) -> NewCandidate {
  NewCandidate {
    full_name:          name.into(),
    father_name:        "Ravi Rao".into(),
    date_of_birth:      NaiveDate::from_ymd_opt(2000, 1, 31).unwrap(),
    gender:             Gender::Female,
    mobile:             mobile.into(),
    email:              email.into(),
    aadhaar:            None,
    qualification:      "Bachelor's".into(),
    specialization:     "CSE".into(),
    year_of_passing:    2021,
    percentage:         "81.5".into(),
    applying_for:       "IT".into(),
    experience:         Experience::Fresher,
    skills:             "Rust, SQL".into(),
    preferred_location: "Hyderabad".into(),
    resume:             Attachment {
      media_type: "application/pdf".into(),
      bytes:      b"%PDF-1.4 resume".to_vec(),
    },
    photo:              Attachment {
      media_type: "image/png".into(),
      bytes:      vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3],
    },
  }
}

async fn created(s: &SqliteStore, c: NewCandidate) -> i64 {
  match s.insert(c).await.unwrap() {
    InsertOutcome::Created(summary) => summary.id,
    InsertOutcome::Duplicate => panic!("unexpected duplicate"),
  }
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get() {
  let s = store().await;
  let mut c = candidate("Asha Rao", "asha@example.com", "9876543210");
  c.aadhaar = Some("123412341234".into());

  let outcome = s.insert(c.clone()).await.unwrap();
  let InsertOutcome::Created(summary) = outcome else {
    panic!("expected Created");
  };

  let fetched = s.get(summary.id).await.unwrap().expect("stored row");
  assert_eq!(fetched, summary);
  assert_eq!(fetched.full_name, "Asha Rao");
  assert_eq!(fetched.aadhaar.as_deref(), Some("123412341234"));
  assert_eq!(fetched.gender, Gender::Female);
  assert_eq!(fetched.date_of_birth, c.date_of_birth);
  assert_eq!(fetched.resume_type, "application/pdf");
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn attachments_round_trip_bytes() {
  let s = store().await;
  let c = candidate("Asha Rao", "asha@example.com", "9876543210");
  let id = created(&s, c.clone()).await;

  let resume = s.attachment(id, AttachmentKind::Resume).await.unwrap().unwrap();
  assert_eq!(resume, c.resume);
  let photo = s.attachment(id, AttachmentKind::Photo).await.unwrap().unwrap();
  assert_eq!(photo, c.photo);

  assert!(s.attachment(id + 1, AttachmentKind::Photo).await.unwrap().is_none());
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn same_email_is_a_duplicate() {
  let s = store().await;
  created(&s, candidate("A", "a@x.com", "9876543210")).await;

  let outcome = s
    .insert(candidate("B", "a@x.com", "9000000000"))
    .await
    .unwrap();
  assert!(matches!(outcome, InsertOutcome::Duplicate));
  assert_eq!(s.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_mobile_is_a_duplicate() {
  let s = store().await;
  created(&s, candidate("A", "a@x.com", "9876543210")).await;

  let outcome = s
    .insert(candidate("B", "b@x.com", "9876543210"))
    .await
    .unwrap();
  assert!(matches!(outcome, InsertOutcome::Duplicate));
}

#[tokio::test]
async fn email_comparison_ignores_case() {
  let s = store().await;
  created(&s, candidate("A", "a@x.com", "9876543210")).await;

  assert!(s.find_duplicate("A@X.COM", "0000000000").await.unwrap().is_some());
  let outcome = s
    .insert(candidate("B", "A@x.com", "9000000000"))
    .await
    .unwrap();
  assert!(matches!(outcome, InsertOutcome::Duplicate));
}

#[tokio::test]
async fn find_duplicate_matches_either_field() {
  let s = store().await;
  let id = created(&s, candidate("A", "a@x.com", "9876543210")).await;

  assert_eq!(s.find_duplicate("a@x.com", "1111111111").await.unwrap(), Some(id));
  assert_eq!(s.find_duplicate("z@x.com", "9876543210").await.unwrap(), Some(id));
  assert_eq!(s.find_duplicate("z@x.com", "1111111111").await.unwrap(), None);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  let first = created(&s, candidate("A", "a@x.com", "9000000001")).await;
  let second = created(&s, candidate("B", "b@x.com", "9000000002")).await;
  let third = created(&s, candidate("C", "c@x.com", "9000000003")).await;

  let all = s.list().await.unwrap();
  let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![third, second, first]);
  assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list().await.unwrap().is_empty());
}

// ─── Search ──────────────────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;

  created(&s, candidate("Asha Rao", "asha@example.com", "9876543210")).await;

  let mut b = candidate("Bilal Khan", "bilal@example.org", "9123456780");
  b.applying_for = "Non-IT".into();
  b.experience = Experience::Experienced;
  b.qualification = "Diploma".into();
  created(&s, b).await;

  let mut c = candidate("Chitra 100% Sure", "chitra@example.com", "9555555555");
  c.applying_for = "Support".into();
  created(&s, c).await;

  s
}

fn names(rows: &[jobmela_core::candidate::CandidateSummary]) -> Vec<&str> {
  rows.iter().map(|c| c.full_name.as_str()).collect()
}

#[tokio::test]
async fn search_text_is_case_insensitive_over_name() {
  let s = seeded().await;
  let q = CandidateQuery { text: Some("asha".into()), ..Default::default() };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Asha Rao"]);
}

#[tokio::test]
async fn search_text_matches_mobile_email_and_qualification() {
  let s = seeded().await;

  let q = CandidateQuery { text: Some("912345".into()), ..Default::default() };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Bilal Khan"]);

  let q = CandidateQuery { text: Some("EXAMPLE.ORG".into()), ..Default::default() };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Bilal Khan"]);

  let q = CandidateQuery { text: Some("diploma".into()), ..Default::default() };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Bilal Khan"]);
}

#[tokio::test]
async fn search_wildcards_are_literal() {
  let s = seeded().await;

  let q = CandidateQuery { text: Some("100%".into()), ..Default::default() };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Chitra 100% Sure"]);

  let q = CandidateQuery { text: Some("_".into()), ..Default::default() };
  assert!(s.search(&q).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_filters_combine() {
  let s = seeded().await;

  let q = CandidateQuery {
    experience: Some(Experience::Fresher),
    ..Default::default()
  };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Chitra 100% Sure", "Asha Rao"]);

  let q = CandidateQuery {
    text:         Some("example.com".into()),
    applying_for: Some("IT".into()),
    experience:   Some(Experience::Fresher),
  };
  assert_eq!(names(&s.search(&q).await.unwrap()), vec!["Asha Rao"]);
}

#[tokio::test]
async fn search_without_filters_lists_everything() {
  let s = seeded().await;
  let all = s.search(&CandidateQuery::default()).await.unwrap();
  assert_eq!(all, s.list().await.unwrap());
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn statistics_count_by_category() {
  let s = seeded().await;
  let stats = s.statistics().await.unwrap();

  assert_eq!(stats.total, 3);
  assert_eq!(stats.by_applying_for.get("IT"), Some(&1));
  assert_eq!(stats.by_applying_for.get("Non-IT"), Some(&1));
  assert_eq!(stats.by_applying_for.get("Support"), Some(&1));
  assert_eq!(stats.by_experience.fresher, 2);
  assert_eq!(stats.by_experience.experienced, 1);
}

#[tokio::test]
async fn statistics_on_empty_store_are_zero() {
  let s = store().await;
  let stats = s.statistics().await.unwrap();
  assert_eq!(stats.total, 0);
  assert!(stats.by_applying_for.is_empty());
  assert_eq!(stats.by_experience.fresher, 0);
}
