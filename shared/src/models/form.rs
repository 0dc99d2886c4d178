//! Form input for creating and editing certificates

use serde::{Deserialize, Serialize};

use crate::models::{CertificateDraft, CertificateStatus, CertificateType};
use crate::rules::FieldRules;
use crate::types::parse_date;
use crate::validation::{validate_certificate, ValidationErrors};

/// Raw certificate input as collected from a form or the command line.
///
/// Every field is free text; nothing here is trusted until
/// [`CertificateForm::into_draft`] has validated it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateForm {
    pub id: String,
    pub recipient_name: String,
    pub certificate_title: String,
    pub certificate_type: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub instructor_name: String,
    pub grade: String,
    /// Comma-separated skill list
    pub skills: String,
    pub status: String,
    pub duration: String,
}

impl CertificateForm {
    /// Visibility rules for the form's current type
    pub fn rules(&self) -> FieldRules {
        FieldRules::for_raw(&self.certificate_type)
    }

    /// Validate and convert into a typed draft.
    ///
    /// Fields that do not apply to the chosen type are dropped, blank
    /// optional fields become `None`, and an editable status left blank
    /// defaults to `valid`. A course has no status of its own, but one that
    /// was already stored (say `revoked`) is carried through an edit.
    pub fn into_draft(self) -> Result<CertificateDraft, ValidationErrors> {
        let errors = validate_certificate(&self);
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        let certificate_type = self
            .certificate_type
            .parse::<CertificateType>()
            .map_err(|_| ValidationErrors::invalid_type())?;
        let issue_date =
            parse_date(&self.issue_date).ok_or_else(ValidationErrors::invalid_issue_date)?;
        let rules = FieldRules::for_type(certificate_type);

        let stored_status = non_blank(&self.status)
            .map(|s| s.parse::<CertificateStatus>())
            .transpose()
            .map_err(|_| ValidationErrors::invalid_status())?;
        let status = if rules.status_editable {
            Some(stored_status.unwrap_or_default())
        } else {
            stored_status
        };

        Ok(CertificateDraft {
            id: self.id.trim().to_string(),
            recipient_name: self.recipient_name.trim().to_string(),
            certificate_title: self.certificate_title.trim().to_string(),
            certificate_type,
            issue_date,
            expiry_date: rules
                .expiry_date
                .then(|| parse_date(&self.expiry_date))
                .flatten(),
            instructor_name: applicable(rules.instructor_name, &self.instructor_name),
            grade: applicable(rules.grade, &self.grade),
            skills: if rules.skills {
                parse_skills(&self.skills)
            } else {
                Vec::new()
            },
            status,
            duration: applicable(rules.duration, &self.duration),
        })
    }
}

impl From<&CertificateDraft> for CertificateForm {
    /// Pre-fill an edit form from an existing record
    fn from(draft: &CertificateDraft) -> Self {
        Self {
            id: draft.id.clone(),
            recipient_name: draft.recipient_name.clone(),
            certificate_title: draft.certificate_title.clone(),
            certificate_type: draft.certificate_type.as_str().to_string(),
            issue_date: draft.issue_date.format(crate::types::DATE_FORMAT).to_string(),
            expiry_date: draft
                .expiry_date
                .map(|d| d.format(crate::types::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            instructor_name: draft.instructor_name.clone().unwrap_or_default(),
            grade: draft.grade.clone().unwrap_or_default(),
            skills: draft.skills.join(", "),
            status: draft.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            duration: draft.duration.clone().unwrap_or_default(),
        }
    }
}

/// Split comma-separated skills, trimming entries and dropping blanks and
/// repeats. The first occurrence of each skill keeps its position.
pub fn parse_skills(input: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|existing| existing == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn applicable(visible: bool, value: &str) -> Option<String> {
    if visible {
        non_blank(value).map(str::to_string)
    } else {
        None
    }
}
