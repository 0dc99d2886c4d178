//! Validation of certificate input before it is submitted
//!
//! Validation never stops at the first problem: every violation is collected
//! so a form can show them all at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{CertificateForm, CertificateStatus, CertificateType};
use crate::rules::FieldRules;
use crate::types::parse_date;

/// Certificate field a validation error refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CertificateField {
    Id,
    RecipientName,
    CertificateTitle,
    CertificateType,
    IssueDate,
    ExpiryDate,
    Status,
}

impl CertificateField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateField::Id => "id",
            CertificateField::RecipientName => "recipientName",
            CertificateField::CertificateTitle => "certificateTitle",
            CertificateField::CertificateType => "certificateType",
            CertificateField::IssueDate => "issueDate",
            CertificateField::ExpiryDate => "expiryDate",
            CertificateField::Status => "status",
        }
    }
}

impl fmt::Display for CertificateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    InvalidDate,
    BeforeIssueDate,
    InvalidEnum,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::Required => "required",
            ValidationReason::InvalidDate => "invalid_date",
            ValidationReason::BeforeIssueDate => "before_issue_date",
            ValidationReason::InvalidEnum => "invalid_enum",
        }
    }

    /// Message suitable for showing next to the field
    pub fn message(&self) -> &'static str {
        match self {
            ValidationReason::Required => "This field is required",
            ValidationReason::InvalidDate => "Enter a valid date (YYYY-MM-DD)",
            ValidationReason::BeforeIssueDate => "Expiry date cannot be before the issue date",
            ValidationReason::InvalidEnum => "Choose one of the listed values",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ValidationError {
    pub field: CertificateField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: CertificateField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Non-empty collection of violations returned when input is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub(crate) fn invalid_type() -> Self {
        Self(vec![ValidationError::new(
            CertificateField::CertificateType,
            ValidationReason::InvalidEnum,
        )])
    }

    pub(crate) fn invalid_issue_date() -> Self {
        Self(vec![ValidationError::new(
            CertificateField::IssueDate,
            ValidationReason::InvalidDate,
        )])
    }

    pub(crate) fn invalid_status() -> Self {
        Self(vec![ValidationError::new(
            CertificateField::Status,
            ValidationReason::InvalidEnum,
        )])
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given field has at least one violation
    pub fn has(&self, field: CertificateField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

/// Validate certificate input against the required-field and type rules.
///
/// Returns every violation found; an empty list means the input is valid.
pub fn validate_certificate(form: &CertificateForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        (CertificateField::Id, &form.id),
        (CertificateField::RecipientName, &form.recipient_name),
        (CertificateField::CertificateTitle, &form.certificate_title),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, ValidationReason::Required));
        }
    }

    let certificate_type = form.certificate_type.parse::<CertificateType>().ok();
    if certificate_type.is_none() {
        errors.push(ValidationError::new(
            CertificateField::CertificateType,
            ValidationReason::InvalidEnum,
        ));
    }
    let rules = certificate_type
        .map(FieldRules::for_type)
        .unwrap_or(FieldRules::PERMISSIVE);

    let issue_date = match validate_date(&form.issue_date, true) {
        Ok(date) => date,
        Err(reason) => {
            errors.push(ValidationError::new(CertificateField::IssueDate, reason));
            None
        }
    };

    if rules.expiry_date {
        let required = FieldRules::expiry_required(certificate_type);
        match validate_date(&form.expiry_date, required) {
            Ok(Some(expiry)) => {
                if issue_date.is_some_and(|issue| expiry < issue) {
                    errors.push(ValidationError::new(
                        CertificateField::ExpiryDate,
                        ValidationReason::BeforeIssueDate,
                    ));
                }
            }
            Ok(None) => {}
            Err(reason) => {
                errors.push(ValidationError::new(CertificateField::ExpiryDate, reason));
            }
        }
    }

    let status = form.status.trim();
    if !status.is_empty() && status.parse::<CertificateStatus>().is_err() {
        errors.push(ValidationError::new(
            CertificateField::Status,
            ValidationReason::InvalidEnum,
        ));
    }

    errors
}

/// Check a date field; `Ok(None)` means an optional field was left blank
fn validate_date(
    raw: &str,
    required: bool,
) -> Result<Option<chrono::NaiveDate>, ValidationReason> {
    if raw.trim().is_empty() {
        return if required {
            Err(ValidationReason::Required)
        } else {
            Ok(None)
        };
    }
    parse_date(raw)
        .map(Some)
        .ok_or(ValidationReason::InvalidDate)
}
