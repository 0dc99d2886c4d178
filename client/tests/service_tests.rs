//! Service tests over an in-memory repository
//!
//! Tests for certificate services including:
//! - Validation before any repository call
//! - Verification and effective status
//! - Dashboard counts and recent additions

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use proptest::prelude::*;

use certificate_client::services::{
    dashboard::{recent, summarize},
    certificate::matches_search,
    CertificateService, DashboardService, VerificationService,
};
use certificate_client::ClientError;
use shared::{
    Certificate, CertificateDraft, CertificateForm, CertificateRepository, CertificateStatus,
    CertificateType, InMemoryCertificateRepository, RepositoryResult,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn form(id: &str, certificate_type: &str) -> CertificateForm {
    CertificateForm {
        id: id.to_string(),
        recipient_name: "Jane Doe".to_string(),
        certificate_title: "Intro to Security".to_string(),
        certificate_type: certificate_type.to_string(),
        issue_date: "2024-01-10".to_string(),
        expiry_date: "2026-01-10".to_string(),
        grade: "A".to_string(),
        skills: "networking, crypto".to_string(),
        ..Default::default()
    }
}

fn certificate(storage_id: &str, id: &str, certificate_type: CertificateType) -> Certificate {
    Certificate::new(
        storage_id,
        CertificateDraft {
            id: id.to_string(),
            recipient_name: format!("Recipient {}", id),
            certificate_title: "Title".to_string(),
            certificate_type,
            issue_date: date(2024, 2, 1),
            expiry_date: None,
            instructor_name: None,
            grade: None,
            skills: vec![],
            status: Some(CertificateStatus::Valid),
            duration: None,
        },
    )
}

/// Repository that counts calls and stores nothing
#[derive(Default)]
struct CountingRepository {
    calls: AtomicUsize,
}

impl CountingRepository {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl CertificateRepository for CountingRepository {
    async fn create(&self, draft: CertificateDraft) -> RepositoryResult<Certificate> {
        self.record();
        Ok(Certificate::new("counted", draft))
    }

    async fn get_by_id(&self, storage_id: &str) -> RepositoryResult<Certificate> {
        self.record();
        Err(shared::RepositoryError::NotFound(storage_id.to_string()))
    }

    async fn get_by_public_id(&self, id: &str) -> RepositoryResult<Certificate> {
        self.record();
        Err(shared::RepositoryError::NotFound(id.to_string()))
    }

    async fn list(&self) -> RepositoryResult<Vec<Certificate>> {
        self.record();
        Ok(Vec::new())
    }

    async fn update(
        &self,
        _storage_id: &str,
        draft: CertificateDraft,
    ) -> RepositoryResult<Certificate> {
        self.record();
        Ok(Certificate::new("counted", draft))
    }

    async fn delete(&self, _storage_id: &str) -> RepositoryResult<()> {
        self.record();
        Ok(())
    }
}

// ============================================================================
// Unit Tests: Certificate Service
// ============================================================================

#[tokio::test]
async fn test_invalid_form_makes_no_repository_call() {
    let service = CertificateService::new(CountingRepository::default());
    let bad = CertificateForm {
        recipient_name: "  ".to_string(),
        ..form("TC-1", "course")
    };

    let err = service.create_certificate(bad.clone()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    let err = service.update_certificate("abc", bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(service.repository().calls(), 0);

    service.create_certificate(form("TC-1", "course")).await.unwrap();
    assert_eq!(service.repository().calls(), 1);
}

#[tokio::test]
async fn test_created_record_reads_back_equal() {
    let service = CertificateService::new(InMemoryCertificateRepository::new());
    let created = service
        .create_certificate(form("TC-2024-001", "course"))
        .await
        .unwrap();

    let fetched = service.get_certificate(&created.storage_id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.record.skills, vec!["networking", "crypto"]);
    assert_eq!(fetched.record.expiry_date, Some(date(2026, 1, 10)));
}

#[tokio::test]
async fn test_type_rules_drop_inapplicable_fields() {
    let service = CertificateService::new(InMemoryCertificateRepository::new());
    let created = service
        .create_certificate(form("AP-1", "appreciation"))
        .await
        .unwrap();

    assert_eq!(created.record.grade, None);
    assert_eq!(created.record.expiry_date, None);
    assert!(created.record.skills.is_empty());
    assert_eq!(created.record.status, Some(CertificateStatus::Valid));
}

#[tokio::test]
async fn test_edit_form_round_trips() {
    let service = CertificateService::new(InMemoryCertificateRepository::new());
    let created = service
        .create_certificate(form("IN-1", "internship"))
        .await
        .unwrap();

    let edit = service.edit_form(&created.storage_id).await.unwrap();
    assert_eq!(edit.certificate_type, "internship");
    assert_eq!(edit.skills, "networking, crypto");
    assert_eq!(edit.grade, "");

    let updated = service
        .update_certificate(&created.storage_id, edit)
        .await
        .unwrap();
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_editing_revoked_course_keeps_it_revoked() {
    let mut revoked = certificate("s1", "TC-2024-009", CertificateType::Course);
    revoked.record.expiry_date = Some(date(2030, 1, 10));
    revoked.record.grade = Some("A".to_string());
    revoked.record.status = Some(CertificateStatus::Revoked);
    let service =
        CertificateService::new(InMemoryCertificateRepository::with_certificates(vec![revoked]));

    let mut edit = service.edit_form("s1").await.unwrap();
    edit.grade = "B".to_string();
    let updated = service.update_certificate("s1", edit).await.unwrap();

    assert_eq!(updated.record.grade.as_deref(), Some("B"));
    assert_eq!(updated.record.status, Some(CertificateStatus::Revoked));
    assert_eq!(
        updated.effective_status(date(2025, 1, 1)),
        CertificateStatus::Revoked
    );
}

#[tokio::test]
async fn test_search() {
    let service = CertificateService::new(InMemoryCertificateRepository::with_certificates(vec![
        certificate("s1", "TC-001", CertificateType::Course),
        certificate("s2", "WS-002", CertificateType::Workshop),
    ]));

    assert_eq!(service.search_certificates("ws-").await.unwrap().len(), 1);
    assert_eq!(service.search_certificates("2024-02").await.unwrap().len(), 2);
    assert_eq!(service.search_certificates("").await.unwrap().len(), 2);
    assert!(service.search_certificates("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let service = CertificateService::new(InMemoryCertificateRepository::new());
    let err = service.delete_certificate("missing").await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

// ============================================================================
// Unit Tests: Verification
// ============================================================================

#[tokio::test]
async fn test_verify_reports_expiry() {
    let service = CertificateService::new(InMemoryCertificateRepository::new());
    service
        .create_certificate(form("TC-2024-001", "course"))
        .await
        .unwrap();

    let verification = VerificationService::new(InMemoryCertificateRepository::with_certificates(
        service.list_certificates().await.unwrap(),
    ));
    let before = verification
        .verify_on(" TC-2024-001 ", date(2025, 1, 1))
        .await
        .unwrap();
    assert_eq!(before.effective_status, CertificateStatus::Valid);

    let after = verification
        .verify_on("TC-2024-001", date(2026, 1, 11))
        .await
        .unwrap();
    assert_eq!(after.effective_status, CertificateStatus::Expired);
    assert_eq!(after.verified_on, date(2026, 1, 11));
}

#[tokio::test]
async fn test_blank_id_is_rejected_locally() {
    let verification = VerificationService::new(CountingRepository::default());
    let err = verification.verify("").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyCertificateId));
}

#[tokio::test]
async fn test_storage_id_does_not_verify() {
    let verification = VerificationService::new(InMemoryCertificateRepository::with_certificates(
        vec![certificate("s1", "TC-001", CertificateType::Course)],
    ));
    let err = verification.verify("s1").await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

// ============================================================================
// Unit Tests: Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_summary() {
    let mut revoked = certificate("s3", "AP-003", CertificateType::Appreciation);
    revoked.record.status = Some(CertificateStatus::Revoked);
    let service = DashboardService::new(InMemoryCertificateRepository::with_certificates(vec![
        certificate("s1", "TC-001", CertificateType::Course),
        certificate("s2", "WS-002", CertificateType::Workshop),
        revoked,
    ]));

    let summary = service.summary(2).await.unwrap();
    assert_eq!(summary.total_certificates, 3);
    assert_eq!(summary.by_type[&CertificateType::Course], 1);
    assert_eq!(summary.by_type[&CertificateType::Internship], 0);
    assert_eq!(summary.by_status[&CertificateStatus::Revoked], 1);
    let recent_ids: Vec<_> = summary
        .recent_certificates
        .iter()
        .map(|c| c.public_id())
        .collect();
    assert_eq!(recent_ids, vec!["WS-002", "AP-003"]);
}

#[test]
fn test_summary_counts_expired_by_date() {
    let mut expiring = certificate("s1", "TC-001", CertificateType::Course);
    expiring.record.expiry_date = Some(date(2024, 6, 1));
    let summary = summarize(vec![expiring], 5, date(2025, 1, 1));
    assert_eq!(summary.by_status[&CertificateStatus::Expired], 1);
    assert_eq!(summary.by_status[&CertificateStatus::Valid], 0);
}

#[test]
fn test_matches_search_is_case_insensitive() {
    let cert = certificate("s1", "TC-001", CertificateType::Course);
    assert!(matches_search(&cert, "recipient tc"));
    assert!(matches_search(&cert, "TITLE"));
    assert!(!matches_search(&cert, "s1"));
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_recent_is_a_bounded_suffix(len in 0usize..20, count in 0usize..25) {
        let certificates: Vec<_> = (0..len)
            .map(|i| {
                certificate(&format!("s{}", i), &format!("ID-{}", i), CertificateType::Workshop)
            })
            .collect();
        let tail = recent(&certificates, count);

        prop_assert_eq!(tail.len(), count.min(len));
        prop_assert_eq!(tail, &certificates[len - tail.len()..]);
    }

    #[test]
    fn prop_summary_counts_add_up(types in prop::collection::vec(0usize..4, 0..30)) {
        let certificates: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                certificate(&format!("s{}", i), &format!("ID-{}", i), CertificateType::ALL[*t])
            })
            .collect();
        let summary = summarize(certificates, 5, date(2025, 1, 1));

        prop_assert_eq!(summary.total_certificates, types.len());
        prop_assert_eq!(summary.by_type.values().sum::<usize>(), types.len());
        prop_assert_eq!(summary.by_status.values().sum::<usize>(), types.len());
    }
}
