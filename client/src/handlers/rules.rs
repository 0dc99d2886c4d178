//! Field rules lookup

use serde::Serialize;
use shared::{title_label, type_label, FieldRules};

use super::Reply;
use crate::error::ClientResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesResponse {
    pub certificate_type: String,
    pub type_label: String,
    pub title_label: &'static str,
    pub rules: FieldRules,
}

/// Which form fields apply to a type; unknown types get the permissive set
pub fn rules(certificate_type: &str) -> ClientResult<Reply> {
    let rules = FieldRules::for_raw(certificate_type);
    let response = RulesResponse {
        certificate_type: certificate_type.trim().to_string(),
        type_label: type_label(certificate_type),
        title_label: title_label(certificate_type),
        rules,
    };

    let flag = |shown: bool| if shown { "shown" } else { "hidden" };
    let status = if rules.status_editable {
        "editable"
    } else {
        "implicit"
    };
    let text = [
        format!("Type:            {}", response.type_label),
        format!("Title field:     {}", response.title_label),
        format!("Instructor:      {}", flag(rules.instructor_name)),
        format!("Grade:           {}", flag(rules.grade)),
        format!("Duration:        {}", flag(rules.duration)),
        format!("Skills:          {}", flag(rules.skills)),
        format!("Expiry date:     {}", flag(rules.expiry_date)),
        format!("Status:          {}", status),
    ]
    .join("\n");

    Reply::new(&response, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_rules() {
        let reply = rules("course").unwrap();
        assert_eq!(reply.value()["titleLabel"], "Course Name");
        assert_eq!(reply.value()["rules"]["expiryDate"], true);
        assert_eq!(reply.value()["rules"]["statusEditable"], false);
        assert!(reply.text().contains("Status:          implicit"));
    }

    #[test]
    fn test_unknown_type_is_permissive() {
        let reply = rules("diploma").unwrap();
        assert_eq!(reply.value()["typeLabel"], "Diploma");
        assert_eq!(reply.value()["titleLabel"], "Certificate Title");
        assert_eq!(reply.value()["rules"]["grade"], true);
        assert!(!reply.text().contains("hidden"));
    }
}
