//! Field visibility rules per certificate type
//!
//! Which optional fields a certificate shows, and whether its status is
//! editable, depends only on the certificate type. Unknown type strings get
//! the permissive rule set so that nothing is hidden from the user.

use serde::Serialize;

use crate::models::CertificateType;

/// Label used for the title field when the type is unknown
pub const DEFAULT_TITLE_LABEL: &str = "Certificate Title";

/// Visibility of the optional fields for one certificate type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldRules {
    pub grade: bool,
    pub duration: bool,
    pub skills: bool,
    pub instructor_name: bool,
    /// Shown and required
    pub expiry_date: bool,
    /// Status can be set by the user; when false it is implicit
    pub status_editable: bool,
}

impl FieldRules {
    /// Rules when the type is not recognised: every optional field visible
    pub const PERMISSIVE: FieldRules = FieldRules {
        grade: true,
        duration: true,
        skills: true,
        instructor_name: true,
        expiry_date: true,
        status_editable: true,
    };

    pub const fn for_type(certificate_type: CertificateType) -> Self {
        match certificate_type {
            CertificateType::Internship => FieldRules {
                grade: false,
                duration: true,
                skills: true,
                instructor_name: true,
                expiry_date: false,
                status_editable: true,
            },
            CertificateType::Course => FieldRules {
                grade: true,
                duration: true,
                skills: true,
                instructor_name: true,
                expiry_date: true,
                status_editable: false,
            },
            CertificateType::Appreciation => FieldRules {
                grade: false,
                duration: false,
                skills: false,
                instructor_name: false,
                expiry_date: false,
                status_editable: true,
            },
            CertificateType::Workshop => FieldRules {
                grade: false,
                duration: false,
                skills: true,
                instructor_name: true,
                expiry_date: false,
                status_editable: true,
            },
        }
    }

    /// Rules for a raw type string as typed into a form
    pub fn for_raw(raw: &str) -> Self {
        raw.parse::<CertificateType>()
            .map(Self::for_type)
            .unwrap_or(Self::PERMISSIVE)
    }

    /// Whether the expiry date must be supplied.
    ///
    /// Only known types make the expiry date mandatory; the permissive rules
    /// show it without requiring it.
    pub fn expiry_required(certificate_type: Option<CertificateType>) -> bool {
        matches!(certificate_type, Some(CertificateType::Course))
    }
}

/// Label for the title field of a certificate form
pub fn title_label(certificate_type: &str) -> &'static str {
    match certificate_type.parse::<CertificateType>() {
        Ok(CertificateType::Internship) => "Internship Title",
        Ok(CertificateType::Course) => "Course Name",
        Ok(CertificateType::Appreciation) => "Reason for Appreciation",
        Ok(CertificateType::Workshop) => "Workshop Title",
        Err(_) => DEFAULT_TITLE_LABEL,
    }
}

/// Human-readable name of a type, capitalising unknown input as-is
pub fn type_label(certificate_type: &str) -> String {
    let trimmed = certificate_type.trim();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }
    if let Ok(known) = trimmed.parse::<CertificateType>() {
        return known.display_name().to_string();
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}

/// Heading for the title row when a certificate is displayed
pub fn display_title_heading(certificate_type: CertificateType) -> &'static str {
    match certificate_type {
        CertificateType::Course => "Course",
        _ => "Program",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_visibility_table() {
        // (type, grade, duration, skills, instructor, expiry, status editable)
        let table = [
            (CertificateType::Internship, false, true, true, true, false, true),
            (CertificateType::Course, true, true, true, true, true, false),
            (CertificateType::Appreciation, false, false, false, false, false, true),
            (CertificateType::Workshop, false, false, true, true, false, true),
        ];

        for (t, grade, duration, skills, instructor, expiry, status) in table {
            let rules = FieldRules::for_type(t);
            assert_eq!(rules.grade, grade, "grade for {t}");
            assert_eq!(rules.duration, duration, "duration for {t}");
            assert_eq!(rules.skills, skills, "skills for {t}");
            assert_eq!(rules.instructor_name, instructor, "instructor for {t}");
            assert_eq!(rules.expiry_date, expiry, "expiry for {t}");
            assert_eq!(rules.status_editable, status, "status for {t}");
        }
    }

    #[test]
    fn test_unknown_type_is_permissive() {
        assert_eq!(FieldRules::for_raw("diploma"), FieldRules::PERMISSIVE);
        assert_eq!(FieldRules::for_raw(""), FieldRules::PERMISSIVE);
        assert!(!FieldRules::expiry_required(None));
    }

    #[test]
    fn test_title_labels() {
        assert_eq!(title_label("course"), "Course Name");
        assert_eq!(title_label("appreciation"), "Reason for Appreciation");
        assert_eq!(title_label("internship"), "Internship Title");
        assert_eq!(title_label("workshop"), "Workshop Title");
        assert_eq!(title_label("bootcamp"), "Certificate Title");
        assert_eq!(title_label(""), "Certificate Title");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label("course"), "Course");
        assert_eq!(type_label("bootcamp"), "Bootcamp");
        assert_eq!(type_label("  "), "Unknown");
    }

    #[test]
    fn test_display_heading() {
        assert_eq!(display_title_heading(CertificateType::Course), "Course");
        assert_eq!(display_title_heading(CertificateType::Workshop), "Program");
    }

    proptest! {
        #[test]
        fn prop_raw_rules_match_typed_rules(idx in 0usize..4, pad in "[ ]{0,3}") {
            let t = CertificateType::ALL[idx];
            let raw = format!("{pad}{}{pad}", t.as_str());
            prop_assert_eq!(FieldRules::for_raw(&raw), FieldRules::for_type(t));
        }

        #[test]
        fn prop_unknown_strings_never_hide_fields(raw in "[a-z]{1,12}") {
            prop_assume!(raw.parse::<CertificateType>().is_err());
            prop_assert_eq!(FieldRules::for_raw(&raw), FieldRules::PERMISSIVE);
            prop_assert_eq!(title_label(&raw), DEFAULT_TITLE_LABEL);
        }
    }
}
