//! The registration payload and its field-level validation.
//!
//! The payload is accepted as loosely typed JSON so that every field can be
//! checked in one pass: a wrong type in one field must not hide errors in the
//! others. [`RegistrationForm::validate`] either yields a fully typed
//! [`Registration`] or the complete list of [`FieldError`]s.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateEmail as _;

use crate::{
  Result,
  candidate::{AttachmentKind, Experience, Gender, NewCandidate},
  data_url,
};

/// Oldest accepted year of passing (inclusive).
pub const MIN_YEAR_OF_PASSING: i32 = 1990;
/// Latest accepted year of passing (inclusive).
pub const MAX_YEAR_OF_PASSING: i32 = 2026;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One violated rule, keyed by the camelCase name of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

// ─── Raw form ────────────────────────────────────────────────────────────────

/// The JSON body of `POST /api/registration`, before validation.
///
/// Unknown keys are ignored; JSON `null` counts as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
  pub full_name:          Option<Value>,
  pub father_name:        Option<Value>,
  pub date_of_birth:      Option<Value>,
  pub gender:             Option<Value>,
  pub mobile:             Option<Value>,
  pub email:              Option<Value>,
  pub aadhaar:            Option<Value>,
  pub qualification:      Option<Value>,
  pub specialization:     Option<Value>,
  pub year_of_passing:    Option<Value>,
  pub percentage:         Option<Value>,
  pub applying_for:       Option<Value>,
  pub experience:         Option<Value>,
  pub skills:             Option<Value>,
  pub preferred_location: Option<Value>,
  /// Resume as a data URL.
  pub resume_data:        Option<Value>,
  /// Photo as a data URL.
  pub photo_data:         Option<Value>,
  pub declaration:        Option<Value>,
}

// ─── Validated registration ──────────────────────────────────────────────────

/// A registration whose every field passed validation.
///
/// The attachments are still data URLs; decoding happens only after the
/// duplicate check, in [`Registration::into_new_candidate`].
#[derive(Debug, Clone)]
pub struct Registration {
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
  pub resume_data:        String,
  pub photo_data:         String,
}

impl RegistrationForm {
  /// Check every field, collecting all violations rather than stopping at
  /// the first.
  pub fn validate(&self) -> Result<Registration, Vec<FieldError>> {
    let mut v = Checker::default();

    let full_name = v.text("fullName", &self.full_name);
    let father_name = v.text("fatherName", &self.father_name);
    let date_of_birth = v.date("dateOfBirth", &self.date_of_birth);
    let gender = v.one_of::<Gender>("gender", &self.gender, "Male, Female, Other");
    let mobile = v.mobile("mobile", &self.mobile);
    let email = v.email("email", &self.email);
    let qualification = v.text("qualification", &self.qualification);
    let specialization = v.text("specialization", &self.specialization);
    let year_of_passing = v.year("yearOfPassing", &self.year_of_passing);
    let percentage = v.text("percentage", &self.percentage);
    let applying_for = v.text("applyingFor", &self.applying_for);
    let experience =
      v.one_of::<Experience>("experience", &self.experience, "Fresher, Experienced");
    let skills = v.text("skills", &self.skills);
    let preferred_location = v.text("preferredLocation", &self.preferred_location);
    let resume_data = v.text("resumeData", &self.resume_data);
    let photo_data = v.text("photoData", &self.photo_data);
    let declaration = v.accepted("declaration", &self.declaration);

    // Each check records an error whenever it yields `None`.
    let (
      Some(full_name),
      Some(father_name),
      Some(date_of_birth),
      Some(gender),
      Some(mobile),
      Some(email),
      Some(qualification),
      Some(specialization),
      Some(year_of_passing),
      Some(percentage),
      Some(applying_for),
      Some(experience),
      Some(skills),
      Some(preferred_location),
      Some(resume_data),
      Some(photo_data),
      Some(()),
    ) = (
      full_name,
      father_name,
      date_of_birth,
      gender,
      mobile,
      email,
      qualification,
      specialization,
      year_of_passing,
      percentage,
      applying_for,
      experience,
      skills,
      preferred_location,
      resume_data,
      photo_data,
      declaration,
    )
    else {
      return Err(v.errors);
    };

    Ok(Registration {
      full_name,
      father_name,
      date_of_birth,
      gender,
      mobile,
      email,
      aadhaar: optional_text(&self.aadhaar),
      qualification,
      specialization,
      year_of_passing,
      percentage,
      applying_for,
      experience,
      skills,
      preferred_location,
      resume_data,
      photo_data,
    })
  }
}

impl Registration {
  /// Decode both attachments and produce the row to insert.
  pub fn into_new_candidate(self) -> Result<NewCandidate> {
    let resume = data_url::decode(&self.resume_data, AttachmentKind::Resume)?;
    let photo = data_url::decode(&self.photo_data, AttachmentKind::Photo)?;
    Ok(NewCandidate {
      full_name: self.full_name,
      father_name: self.father_name,
      date_of_birth: self.date_of_birth,
      gender: self.gender,
      mobile: self.mobile,
      email: self.email,
      aadhaar: self.aadhaar,
      qualification: self.qualification,
      specialization: self.specialization,
      year_of_passing: self.year_of_passing,
      percentage: self.percentage,
      applying_for: self.applying_for,
      experience: self.experience,
      skills: self.skills,
      preferred_location: self.preferred_location,
      resume,
      photo,
    })
  }
}

// ─── Checks ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Checker {
  errors: Vec<FieldError>,
}

impl Checker {
  fn fail<T>(&mut self, field: &'static str, message: impl Into<String>) -> Option<T> {
    self.errors.push(FieldError::new(field, message));
    None
  }

  fn present<'a>(&mut self, field: &'static str, value: &'a Option<Value>) -> Option<&'a Value> {
    match value {
      Some(v) => Some(v),
      None => self.fail(field, "is required"),
    }
  }

  /// The value as an untrimmed string; numbers are accepted in their JSON form.
  fn string(&mut self, field: &'static str, value: &Option<Value>) -> Option<String> {
    let raw = self.present(field, value)?;
    match as_text(raw) {
      Some(s) => Some(s),
      None => self.fail(field, "must be a string"),
    }
  }

  /// A required free-text field, trimmed.
  fn text(&mut self, field: &'static str, value: &Option<Value>) -> Option<String> {
    let s = self.string(field, value)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return self.fail(field, "must not be empty");
    }
    Some(trimmed.to_owned())
  }

  fn mobile(&mut self, field: &'static str, value: &Option<Value>) -> Option<String> {
    let s = self.string(field, value)?;
    if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
      Some(s)
    } else {
      self.fail(field, "must be exactly 10 digits")
    }
  }

  fn email(&mut self, field: &'static str, value: &Option<Value>) -> Option<String> {
    let s = self.string(field, value)?;
    if s.validate_email() && has_named_domain(&s) {
      Some(s)
    } else {
      self.fail(field, "must be a valid email address")
    }
  }

  fn date(&mut self, field: &'static str, value: &Option<Value>) -> Option<NaiveDate> {
    let s = self.string(field, value)?;
    match parse_iso_date(s.trim()) {
      Some(d) => Some(d),
      None => self.fail(field, "must be an ISO-8601 date"),
    }
  }

  fn year(&mut self, field: &'static str, value: &Option<Value>) -> Option<i32> {
    let raw = self.present(field, value)?;
    let year = match raw {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };
    let range = i64::from(MIN_YEAR_OF_PASSING)..=i64::from(MAX_YEAR_OF_PASSING);
    match year.filter(|y| range.contains(y)).and_then(|y| i32::try_from(y).ok()) {
      Some(y) => Some(y),
      None => self.fail(
        field,
        format!(
          "must be an integer between {MIN_YEAR_OF_PASSING} and {MAX_YEAR_OF_PASSING}"
        ),
      ),
    }
  }

  fn one_of<T: FromStr>(
    &mut self,
    field: &'static str,
    value: &Option<Value>,
    allowed: &str,
  ) -> Option<T> {
    let s = self.string(field, value)?;
    match T::from_str(&s) {
      Ok(t) => Some(t),
      Err(_) => self.fail(field, format!("must be one of {allowed}")),
    }
  }

  /// The declaration checkbox: boolean `true`, or the string `"true"`.
  fn accepted(&mut self, field: &'static str, value: &Option<Value>) -> Option<()> {
    match value {
      Some(Value::Bool(true)) => Some(()),
      Some(Value::String(s)) if s == "true" => Some(()),
      _ => self.fail(field, "must be accepted"),
    }
  }
}

fn as_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// The domain is a dotted host name ending in a top-level domain: no IP
/// literals, no single-label hosts, no numeric TLD.
fn has_named_domain(email: &str) -> bool {
  let Some((_, domain)) = email.rsplit_once('@') else {
    return false;
  };
  if domain.starts_with('[') {
    return false;
  }
  let labels: Vec<&str> = domain.split('.').collect();
  let Some(tld) = labels.last().filter(|_| labels.len() >= 2) else {
    return false;
  };
  let tld_ok = tld.chars().count() >= 2
    && (tld.chars().all(char::is_alphabetic) || tld.to_ascii_lowercase().starts_with("xn--"));
  tld_ok && labels.iter().all(|l| !l.is_empty())
}

/// Optional text: blank or absent becomes `None`.
fn optional_text(value: &Option<Value>) -> Option<String> {
  value
    .as_ref()
    .and_then(as_text)
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

/// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn valid() -> Value {
    json!({
      "fullName":          "  Asha Rao ",
      "fatherName":        "Ravi Rao",
      "dateOfBirth":       "2000-01-31",
      "gender":            "Female",
      "mobile":            "9876543210",
      "email":             "asha@example.com",
      "aadhaar":           "",
      "qualification":     "Bachelor's",
      "specialization":    "CSE",
      "yearOfPassing":     2021,
      "percentage":        "81.5",
      "applyingFor":       "IT",
      "experience":        "Fresher",
      "skills":            "Rust, SQL",
      "preferredLocation": "Hyderabad",
      "resumeData":        "data:application/pdf;base64,JVBERi0xLjQ=",
      "photoData":         "data:image/png;base64,cGhvdG8tYnl0ZXM=",
      "declaration":       true,
    })
  }

  fn form(value: Value) -> RegistrationForm {
    serde_json::from_value(value).unwrap()
  }

  fn with(key: &str, value: Value) -> RegistrationForm {
    let mut v = valid();
    v[key] = value;
    form(v)
  }

  fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
  }

  #[test]
  fn valid_form_passes_and_normalises() {
    let r = form(valid()).validate().unwrap();
    assert_eq!(r.full_name, "Asha Rao");
    assert_eq!(r.gender, Gender::Female);
    assert_eq!(r.experience, Experience::Fresher);
    assert_eq!(r.year_of_passing, 2021);
    assert_eq!(r.aadhaar, None);
    assert_eq!(r.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 31).unwrap());
  }

  #[test]
  fn every_missing_field_is_reported() {
    let errors = form(json!({})).validate().unwrap_err();
    let got = fields(&errors);
    for field in [
      "fullName",
      "fatherName",
      "dateOfBirth",
      "gender",
      "mobile",
      "email",
      "qualification",
      "specialization",
      "yearOfPassing",
      "percentage",
      "applyingFor",
      "experience",
      "skills",
      "preferredLocation",
      "resumeData",
      "photoData",
      "declaration",
    ] {
      assert!(got.contains(&field), "{field} missing from {got:?}");
    }
    assert!(!got.contains(&"aadhaar"));
  }

  #[test]
  fn blank_name_is_rejected() {
    let errors = with("fullName", json!("   ")).validate().unwrap_err();
    assert_eq!(fields(&errors), vec!["fullName"]);
  }

  #[test]
  fn mobile_must_be_ten_digits() {
    for bad in ["987654321", "98765432101", "98765abcde", " 987654321", ""] {
      let errors = with("mobile", json!(bad)).validate().unwrap_err();
      assert_eq!(fields(&errors), vec!["mobile"], "accepted {bad:?}");
    }
    assert!(with("mobile", json!("0123456789")).validate().is_ok());
  }

  #[test]
  fn year_of_passing_bounds_are_inclusive() {
    assert!(with("yearOfPassing", json!(1990)).validate().is_ok());
    assert!(with("yearOfPassing", json!(2026)).validate().is_ok());
    assert!(with("yearOfPassing", json!("2020")).validate().is_ok());
    for bad in [json!(1989), json!(2027), json!("soon"), json!(2020.5)] {
      let errors = with("yearOfPassing", bad.clone()).validate().unwrap_err();
      assert_eq!(fields(&errors), vec!["yearOfPassing"], "accepted {bad}");
    }
  }

  #[test]
  fn enums_are_case_sensitive() {
    let errors = with("gender", json!("female")).validate().unwrap_err();
    assert_eq!(fields(&errors), vec!["gender"]);
    let errors = with("experience", json!("Senior")).validate().unwrap_err();
    assert_eq!(fields(&errors), vec!["experience"]);
  }

  #[test]
  fn invalid_email_and_date_are_reported_together() {
    let mut v = valid();
    v["email"] = json!("not-an-email");
    v["dateOfBirth"] = json!("31/01/2000");
    let errors = form(v).validate().unwrap_err();
    assert_eq!(fields(&errors), vec!["dateOfBirth", "email"]);
  }

  #[test]
  fn email_domain_needs_a_top_level_domain() {
    for bad in ["a@x", "a@[127.0.0.1]", "a@127.0.0.1", "a@example.c", "a@example.123"] {
      let errors = with("email", json!(bad)).validate().unwrap_err();
      assert_eq!(fields(&errors), vec!["email"], "accepted {bad:?}");
    }
    for good in ["a@example.co", "first.last@mail.example.in", "a@xn--p1ai.xn--p1ai"] {
      assert!(with("email", json!(good)).validate().is_ok(), "rejected {good:?}");
    }
  }

  #[test]
  fn rfc3339_date_of_birth_keeps_the_date() {
    let r = with("dateOfBirth", json!("2000-01-31T00:00:00Z")).validate().unwrap();
    assert_eq!(r.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 31).unwrap());
  }

  #[test]
  fn declaration_must_be_true() {
    assert!(with("declaration", json!("true")).validate().is_ok());
    for bad in [json!(false), json!("yes"), json!(1)] {
      let errors = with("declaration", bad).validate().unwrap_err();
      assert_eq!(fields(&errors), vec!["declaration"]);
    }
  }

  #[test]
  fn aadhaar_is_kept_when_given() {
    let r = with("aadhaar", json!("123412341234")).validate().unwrap();
    assert_eq!(r.aadhaar.as_deref(), Some("123412341234"));
  }

  #[test]
  fn into_new_candidate_decodes_attachments() {
    let c = form(valid()).validate().unwrap().into_new_candidate().unwrap();
    assert_eq!(c.resume.bytes, b"%PDF-1.4");
    assert_eq!(c.resume.media_type, "application/pdf");
    assert_eq!(c.photo.bytes, b"photo-bytes");
    assert_eq!(c.photo.media_type, "image/png");
  }

  #[test]
  fn undecodable_attachment_fails_after_validation() {
    let r = with("photoData", json!("no-comma-here")).validate().unwrap();
    assert!(matches!(
      r.into_new_candidate(),
      Err(crate::Error::MalformedDataUrl)
    ));
  }
}
