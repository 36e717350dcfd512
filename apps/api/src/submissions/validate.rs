//! Intake payload validation: email shape, phone format, name length,
//! resume and service size limits.

use crate::submissions::handlers::CreateSubmissionRequest;

const MAX_RESUME_CHARS: usize = 8000;
const MAX_SERVICE_CHARS: usize = 20;
const MIN_NAME_CHARS: usize = 2;

pub fn validate_submission(req: &CreateSubmissionRequest) -> Result<(), String> {
    if req.first_name.chars().count() < MIN_NAME_CHARS
        || req.last_name.chars().count() < MIN_NAME_CHARS
    {
        return Err("First name and last name must be at least 2 characters long.".to_string());
    }
    validate_email(&req.email)?;
    validate_phone_number(&req.phone_number)?;
    if req.resume.trim().is_empty() {
        return Err("Resume must not be empty.".to_string());
    }
    if req.resume.chars().count() > MAX_RESUME_CHARS {
        return Err("Resume must be at most 8000 characters long.".to_string());
    }
    if req.service.is_empty() || req.service.chars().count() > MAX_SERVICE_CHARS {
        return Err("Service must be between 1 and 20 characters long.".to_string());
    }
    Ok(())
}

/// Structural email check: exactly one `@`, non-empty local part, dotted
/// domain with no empty labels, no whitespace.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || "Enter a valid email address.".to_string();

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    if domain.split('.').any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// Mirrors the pattern `^\+?1?\d{9,15}$`: an optional `+`, an optional
/// leading `1` country code, then 9 to 15 digits.
pub fn validate_phone_number(phone: &str) -> Result<(), String> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let plain = digits_in_range(rest);
    let with_country_code = rest
        .strip_prefix('1')
        .map(digits_in_range)
        .unwrap_or(false);

    if plain || with_country_code {
        Ok(())
    } else {
        Err(
            "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed."
                .to_string(),
        )
    }
}

fn digits_in_range(s: &str) -> bool {
    (9..=15).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}
