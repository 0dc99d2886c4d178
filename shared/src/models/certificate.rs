//! Certificate models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{flexible_date, flexible_date_option};

/// Kind of certificate; drives which optional fields apply
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    Internship,
    Course,
    Appreciation,
    Workshop,
}

impl CertificateType {
    pub const ALL: [CertificateType; 4] = [
        CertificateType::Internship,
        CertificateType::Course,
        CertificateType::Appreciation,
        CertificateType::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateType::Internship => "internship",
            CertificateType::Course => "course",
            CertificateType::Appreciation => "appreciation",
            CertificateType::Workshop => "workshop",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CertificateType::Internship => "Internship",
            CertificateType::Course => "Course",
            CertificateType::Appreciation => "Appreciation",
            CertificateType::Workshop => "Workshop",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known enum value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for CertificateType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "internship" => Ok(CertificateType::Internship),
            "course" => Ok(CertificateType::Course),
            "appreciation" => Ok(CertificateType::Appreciation),
            "workshop" => Ok(CertificateType::Workshop),
            other => Err(UnknownVariant {
                kind: "certificate type",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle status of an issued certificate
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    #[default]
    Valid,
    Expired,
    Revoked,
}

impl CertificateStatus {
    pub const ALL: [CertificateStatus; 3] = [
        CertificateStatus::Valid,
        CertificateStatus::Expired,
        CertificateStatus::Revoked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Valid => "valid",
            CertificateStatus::Expired => "expired",
            CertificateStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "valid" => Ok(CertificateStatus::Valid),
            "expired" => Ok(CertificateStatus::Expired),
            "revoked" => Ok(CertificateStatus::Revoked),
            other => Err(UnknownVariant {
                kind: "certificate status",
                value: other.to_string(),
            }),
        }
    }
}

/// A certificate record without its storage key.
///
/// This is the body sent on create and update. Build one through
/// [`crate::CertificateForm::into_draft`] so the type rules and validation
/// have been applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDraft {
    pub id: String,
    pub recipient_name: String,
    pub certificate_title: String,
    pub certificate_type: CertificateType,
    #[serde(with = "flexible_date")]
    pub issue_date: NaiveDate,
    #[serde(
        default,
        with = "flexible_date_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl CertificateDraft {
    /// Status a reader should see on the given day.
    ///
    /// A revoked certificate stays revoked. Otherwise a record whose expiry
    /// date lies before `today` reads as expired, and anything else falls
    /// back to the stored status.
    pub fn effective_status(&self, today: NaiveDate) -> CertificateStatus {
        let stored = self.status.unwrap_or_default();
        if stored == CertificateStatus::Revoked {
            return CertificateStatus::Revoked;
        }
        match self.expiry_date {
            Some(expiry) if expiry < today => CertificateStatus::Expired,
            _ => stored,
        }
    }

    /// Project the optional fields into their type-specific shape
    pub fn details(&self) -> CertificateDetails {
        let status = self.status.unwrap_or_default();
        match self.certificate_type {
            CertificateType::Internship => CertificateDetails::Internship {
                instructor_name: self.instructor_name.clone(),
                skills: self.skills.clone(),
                duration: self.duration.clone(),
                status,
            },
            CertificateType::Course => CertificateDetails::Course {
                instructor_name: self.instructor_name.clone(),
                skills: self.skills.clone(),
                duration: self.duration.clone(),
                grade: self.grade.clone(),
                expiry_date: self.expiry_date,
            },
            CertificateType::Appreciation => CertificateDetails::Appreciation { status },
            CertificateType::Workshop => CertificateDetails::Workshop {
                instructor_name: self.instructor_name.clone(),
                skills: self.skills.clone(),
                status,
            },
        }
    }
}

/// A stored certificate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Backend-assigned key used by admin reads and mutations.
    ///
    /// The public verification endpoint may leave it out, in which case it is
    /// empty.
    #[serde(default, alias = "mongoId", alias = "_id")]
    pub storage_id: String,
    #[serde(flatten)]
    pub record: CertificateDraft,
}

impl Certificate {
    pub fn new(storage_id: impl Into<String>, record: CertificateDraft) -> Self {
        Self {
            storage_id: storage_id.into(),
            record,
        }
    }

    /// Public, user-facing identifier
    pub fn public_id(&self) -> &str {
        &self.record.id
    }

    pub fn effective_status(&self, today: NaiveDate) -> CertificateStatus {
        self.record.effective_status(today)
    }

    pub fn details(&self) -> CertificateDetails {
        self.record.details()
    }
}

/// Type-specific view of a certificate's optional fields.
///
/// Each variant carries only the fields that apply to its type, so a field
/// that does not apply cannot be confused with one left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateDetails {
    Internship {
        instructor_name: Option<String>,
        skills: Vec<String>,
        duration: Option<String>,
        status: CertificateStatus,
    },
    Course {
        instructor_name: Option<String>,
        skills: Vec<String>,
        duration: Option<String>,
        grade: Option<String>,
        expiry_date: Option<NaiveDate>,
    },
    Appreciation {
        status: CertificateStatus,
    },
    Workshop {
        instructor_name: Option<String>,
        skills: Vec<String>,
        status: CertificateStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn course_draft() -> CertificateDraft {
        CertificateDraft {
            id: "TC-2024-001".to_string(),
            recipient_name: "Jane Doe".to_string(),
            certificate_title: "Intro to Security".to_string(),
            certificate_type: CertificateType::Course,
            issue_date: date(2024, 1, 10),
            expiry_date: Some(date(2026, 1, 10)),
            instructor_name: None,
            grade: Some("A".to_string()),
            skills: vec![],
            status: None,
            duration: None,
        }
    }

    #[test]
    fn test_type_round_trips_through_str() {
        for t in CertificateType::ALL {
            assert_eq!(t.as_str().parse::<CertificateType>().unwrap(), t);
        }
        assert!("diploma".parse::<CertificateType>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "revoked".parse::<CertificateStatus>().unwrap(),
            CertificateStatus::Revoked
        );
        assert!("pending".parse::<CertificateStatus>().is_err());
    }

    #[test]
    fn test_draft_serializes_camel_case_and_skips_absent_fields() {
        let json = serde_json::to_value(course_draft()).unwrap();
        assert_eq!(json["recipientName"], "Jane Doe");
        assert_eq!(json["certificateType"], "course");
        assert_eq!(json["issueDate"], "2024-01-10");
        assert_eq!(json["expiryDate"], "2026-01-10");
        assert!(json.get("skills").is_none());
        assert!(json.get("status").is_none());
        assert!(json.get("instructorName").is_none());
    }

    #[test]
    fn test_certificate_accepts_backend_key_aliases() {
        let body = r#"{
            "mongoId": "65a1f0",
            "id": "TC-1",
            "recipientName": "Jane Doe",
            "certificateTitle": "Rust",
            "certificateType": "workshop",
            "issueDate": "2024-01-10T00:00:00.000Z",
            "skills": ["async", "traits"],
            "status": "valid"
        }"#;
        let cert: Certificate = serde_json::from_str(body).unwrap();
        assert_eq!(cert.storage_id, "65a1f0");
        assert_eq!(cert.public_id(), "TC-1");
        assert_eq!(cert.record.issue_date, date(2024, 1, 10));
        assert_eq!(cert.record.skills, vec!["async", "traits"]);
    }

    #[test]
    fn test_public_payload_without_storage_key() {
        let body = r#"{
            "id": "TC-2",
            "recipientName": "Sam",
            "certificateTitle": "Thanks",
            "certificateType": "appreciation",
            "issueDate": "2024-03-01"
        }"#;
        let cert: Certificate = serde_json::from_str(body).unwrap();
        assert!(cert.storage_id.is_empty());
        assert_eq!(cert.record.status, None);
    }

    #[test]
    fn test_effective_status() {
        let draft = course_draft();
        assert_eq!(draft.effective_status(date(2025, 6, 1)), CertificateStatus::Valid);
        assert_eq!(draft.effective_status(date(2026, 1, 10)), CertificateStatus::Valid);
        assert_eq!(draft.effective_status(date(2026, 1, 11)), CertificateStatus::Expired);

        let revoked = CertificateDraft {
            status: Some(CertificateStatus::Revoked),
            ..course_draft()
        };
        assert_eq!(revoked.effective_status(date(2025, 6, 1)), CertificateStatus::Revoked);
        assert_eq!(revoked.effective_status(date(2030, 1, 1)), CertificateStatus::Revoked);
    }

    #[test]
    fn test_details_follow_type() {
        match course_draft().details() {
            CertificateDetails::Course { grade, expiry_date, .. } => {
                assert_eq!(grade.as_deref(), Some("A"));
                assert_eq!(expiry_date, Some(date(2026, 1, 10)));
            }
            other => panic!("unexpected details: {other:?}"),
        }

        let appreciation = CertificateDraft {
            certificate_type: CertificateType::Appreciation,
            status: Some(CertificateStatus::Valid),
            ..course_draft()
        };
        assert_eq!(
            appreciation.details(),
            CertificateDetails::Appreciation {
                status: CertificateStatus::Valid
            }
        );
    }
}
