//! Certificate administration handlers

use std::fmt::Write;

use chrono::Utc;
use serde::Serialize;
use shared::{
    display_title_heading, Certificate, CertificateDetails, CertificateForm, CertificateStatus,
    DATE_FORMAT,
};

use super::{AppState, Reply};
use crate::cli::FormArgs;
use crate::error::ClientResult;
use crate::services::{CertificateService, DashboardService};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub storage_id: String,
    pub deleted: bool,
}

/// Totals by type and status plus the most recent additions
pub async fn dashboard(state: &AppState, recent: Option<usize>) -> ClientResult<Reply> {
    let recent = recent.unwrap_or(state.config.dashboard.recent_count);
    let service = DashboardService::new(state.admin_api()?);
    let summary = service.summary(recent).await?;

    let mut text = format!("Total certificates: {}\n", summary.total_certificates);
    for (certificate_type, count) in &summary.by_type {
        let _ = writeln!(text, "  {:<14}{}", certificate_type.display_name(), count);
    }
    text.push_str("Status:\n");
    for (status, count) in &summary.by_status {
        let _ = writeln!(text, "  {:<14}{}", status.as_str(), count);
    }
    text.push_str("Recently added:\n");
    text.push_str(&render_table(&summary.recent_certificates));

    Reply::new(&summary, text)
}

/// All certificates, or those matching a search term
pub async fn list(state: &AppState, search: Option<&str>) -> ClientResult<Reply> {
    let service = CertificateService::new(state.admin_api()?);
    let certificates = match search {
        Some(term) => service.search_certificates(term).await?,
        None => service.list_certificates().await?,
    };
    let text = render_table(&certificates);
    Reply::new(&certificates, text)
}

/// One certificate by storage ID
pub async fn show(state: &AppState, storage_id: &str) -> ClientResult<Reply> {
    let service = CertificateService::new(state.admin_api()?);
    let certificate = service.get_certificate(storage_id).await?;
    let status = certificate.effective_status(Utc::now().date_naive());
    let text = format!(
        "Storage ID:      {}\n{}",
        certificate.storage_id,
        render_certificate(&certificate, status)
    );
    Reply::new(&certificate, text)
}

pub async fn add(state: &AppState, form: CertificateForm) -> ClientResult<Reply> {
    let service = CertificateService::new(state.admin_api()?);
    let certificate = service.create_certificate(form).await?;
    let text = format!(
        "Created certificate {} (storage ID {}).",
        certificate.record.id, certificate.storage_id
    );
    Reply::new(&certificate, text)
}

/// Load the stored record, apply the given flags and save the whole record
pub async fn edit(state: &AppState, storage_id: &str, changes: FormArgs) -> ClientResult<Reply> {
    let service = CertificateService::new(state.admin_api()?);
    let mut form = service.edit_form(storage_id).await?;
    changes.apply_to(&mut form);

    let certificate = service.update_certificate(storage_id, form).await?;
    let text = format!("Updated certificate {}.", certificate.record.id);
    Reply::new(&certificate, text)
}

pub async fn delete(state: &AppState, storage_id: &str) -> ClientResult<Reply> {
    let service = CertificateService::new(state.admin_api()?);
    service.delete_certificate(storage_id).await?;
    Reply::new(
        &DeleteResponse {
            storage_id: storage_id.to_string(),
            deleted: true,
        },
        format!("Deleted certificate {}.", storage_id),
    )
}

/// Detail view showing only the fields that apply to the certificate's type
pub fn render_certificate(certificate: &Certificate, status: CertificateStatus) -> String {
    let record = &certificate.record;
    let mut out = String::new();
    let mut row = |label: &str, value: &str| {
        let _ = writeln!(out, "{:<17}{}", format!("{}:", label), value);
    };

    row("Certificate ID", &record.id);
    row("Recipient", &record.recipient_name);
    row(display_title_heading(record.certificate_type), &record.certificate_title);
    row("Type", record.certificate_type.display_name());
    row("Issued", &record.issue_date.format(DATE_FORMAT).to_string());

    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let skills = |skills: &[String]| {
        if skills.is_empty() {
            "-".to_string()
        } else {
            skills.join(", ")
        }
    };

    match certificate.details() {
        CertificateDetails::Internship {
            instructor_name,
            skills: list,
            duration,
            ..
        } => {
            row("Instructor", &optional(&instructor_name));
            row("Duration", &optional(&duration));
            row("Skills", &skills(&list));
        }
        CertificateDetails::Course {
            instructor_name,
            skills: list,
            duration,
            grade,
            expiry_date,
        } => {
            row("Instructor", &optional(&instructor_name));
            row("Duration", &optional(&duration));
            row("Grade", &optional(&grade));
            row("Skills", &skills(&list));
            let expiry = expiry_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            row("Expires", &expiry);
        }
        CertificateDetails::Appreciation { .. } => {}
        CertificateDetails::Workshop {
            instructor_name,
            skills: list,
            ..
        } => {
            row("Instructor", &optional(&instructor_name));
            row("Skills", &skills(&list));
        }
    }
    row("Status", status.as_str());

    out.trim_end().to_string()
}

/// One line per certificate, in the order given
pub fn render_table(certificates: &[Certificate]) -> String {
    if certificates.is_empty() {
        return "No certificates found.".to_string();
    }
    let today = Utc::now().date_naive();
    let mut out = format!(
        "{:<26}{:<16}{:<24}{:<32}{:<14}{:<12}{}\n",
        "STORAGE ID", "ID", "RECIPIENT", "TITLE", "TYPE", "ISSUED", "STATUS"
    );
    for certificate in certificates {
        let record = &certificate.record;
        let _ = writeln!(
            out,
            "{:<26}{:<16}{:<24}{:<32}{:<14}{:<12}{}",
            certificate.storage_id,
            record.id,
            record.recipient_name,
            record.certificate_title,
            record.certificate_type.as_str(),
            record.issue_date.format(DATE_FORMAT),
            certificate.effective_status(today)
        );
    }
    out.trim_end().to_string()
}
