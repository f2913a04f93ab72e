use serde::Serialize;

use super::domain::ApplicationDraft;
use super::visibility::FieldVisibility;

/// One failed field check, addressed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check every active field of the draft. Groups hidden by the current
/// toggles are skipped entirely; their values are never required.
pub fn validate(draft: &ApplicationDraft) -> Result<(), Vec<FieldError>> {
    let visibility = FieldVisibility::derive(draft.area, draft.bpl, draft.fees_receive);
    let mut errors = Vec::new();

    require_non_empty(&mut errors, "applicant_name", &draft.applicant_name, "Applicant name is required");
    require_non_empty(&mut errors, "father_name", &draft.father_name, "Father's name is required");

    if !is_exact_digits(&draft.mobile_no, 10) {
        errors.push(FieldError::new(
            "mobile_no",
            "Mobile number must be 10 digits",
        ));
    }

    if !is_well_formed_email(&draft.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    require_non_empty(&mut errors, "address", &draft.address, "Address is required");
    require_non_empty(&mut errors, "state_id", &draft.state_id, "State is required");
    require_non_empty(&mut errors, "district_id", &draft.district_id, "District is required");

    if !is_exact_digits(&draft.pincode, 6) {
        errors.push(FieldError::new("pincode", "PIN code must be 6 digits"));
    }

    for (index, entry) in draft.applicant_query.iter().enumerate() {
        if entry.query.trim().is_empty() {
            errors.push(FieldError::new(
                format!("applicant_query.{index}.query"),
                "Question is required",
            ));
        }
        if entry.pollution_id.is_empty() {
            errors.push(FieldError::new(
                format!("applicant_query.{index}.pollution_id"),
                "Category is required",
            ));
        }
    }

    if visibility.bpl_certificate {
        match &draft.bpl_file {
            None => errors.push(FieldError::new("bpl_file", "BPL certificate is required")),
            Some(file) if !is_accepted_certificate_type(&file.content_type) => {
                errors.push(FieldError::new(
                    "bpl_file",
                    "BPL certificate must be a PDF, JPG, or PNG file",
                ));
            }
            Some(_) => {}
        }
    }

    if visibility.fee_amount_fields {
        require_non_empty(&mut errors, "fees_type_id", &draft.fees_type_id, "Fees type is required");
        match draft.total_fees {
            Some(amount) if amount.is_finite() && amount > 0.0 => {}
            _ => errors.push(FieldError::new(
                "total_fees",
                "Total fees must be a positive amount",
            )),
        }
    }

    if visibility.non_receipt_reason && draft.fees_not_receive_reason.trim().is_empty() {
        errors.push(FieldError::new(
            "fees_not_receive_reason",
            "Reason for not receiving fees is required",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn require_non_empty(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn is_exact_digits(value: &str, length: usize) -> bool {
    value.len() == length && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_accepted_certificate_type(content_type: &str) -> bool {
    let parsed: mime::Mime = match content_type.parse() {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    (parsed.type_() == mime::APPLICATION && parsed.subtype() == mime::PDF)
        || (parsed.type_() == mime::IMAGE
            && (parsed.subtype() == mime::JPEG || parsed.subtype() == mime::PNG))
}

/// Shape check only: one `@`, a non-empty local part, and a dotted domain.
fn is_well_formed_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(domain) => domain,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    domain.contains('.') && labels.all(|label| !label.is_empty())
}
