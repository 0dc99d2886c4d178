//! WebAssembly module for the Certificate Verification Platform
//!
//! Gives browser forms the same rules the client enforces:
//! - Field visibility per certificate type
//! - Field labels
//! - Skill list parsing
//! - Form validation and normalisation

use wasm_bindgen::prelude::*;

use shared::{parse_skills, validate_certificate, CertificateForm, FieldRules};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

fn parse_form(form_json: &str) -> Result<CertificateForm, JsValue> {
    serde_json::from_str(form_json).map_err(|e| js_error(format!("Invalid form JSON: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error(format!("Serialization failed: {}", e)))
}

/// Visible fields for a certificate type, as JSON
#[wasm_bindgen]
pub fn certificate_field_rules(certificate_type: &str) -> Result<String, JsValue> {
    to_json(&FieldRules::for_raw(certificate_type))
}

/// Label for the title input
#[wasm_bindgen]
pub fn certificate_title_label(certificate_type: &str) -> String {
    shared::title_label(certificate_type).to_string()
}

/// Display name of a certificate type
#[wasm_bindgen]
pub fn certificate_type_label(certificate_type: &str) -> String {
    shared::type_label(certificate_type)
}

/// Comma-separated skills as a JSON array
#[wasm_bindgen]
pub fn parse_skill_list(input: &str) -> Result<String, JsValue> {
    to_json(&parse_skills(input))
}

/// Field errors for a form, as a JSON array; empty when the form is valid
#[wasm_bindgen]
pub fn validate_certificate_form(form_json: &str) -> Result<String, JsValue> {
    let form = parse_form(form_json)?;
    to_json(&validate_certificate(&form))
}

/// The request body a valid form produces
#[wasm_bindgen]
pub fn normalize_certificate_form(form_json: &str) -> Result<String, JsValue> {
    let form = parse_form(form_json)?;
    let draft = form
        .into_draft()
        .map_err(|e| js_error(e.to_string()))?;
    to_json(&draft)
}
