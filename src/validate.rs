//! Field validators shared by the hire wizards and the plain CRUD forms.
//!
//! Each validator returns `None` when the value is acceptable, or the error
//! string to show next to the field.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static IFSC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap());
static HHMM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 || !EMAIL_RE.is_match(trimmed) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

/// Exactly `count` ASCII digits (phone = 10, Aadhar = 12, pincode = 6).
pub fn validate_digits(value: &str, field_name: &str, count: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.len() != count || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("{field_name} must be exactly {count} digits"));
    }
    None
}

/// PAN: five letters, four digits, one letter. Case-insensitive on input.
pub fn validate_pan(value: &str) -> Option<String> {
    if !PAN_RE.is_match(&value.trim().to_uppercase()) {
        return Some("PAN must look like ABCDE1234F".to_string());
    }
    None
}

pub fn validate_ifsc(value: &str) -> Option<String> {
    if !IFSC_RE.is_match(&value.trim().to_uppercase()) {
        return Some("IFSC must look like SBIN0001234".to_string());
    }
    None
}

pub fn validate_positive_number(value: &str, field_name: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => None,
        _ => Some(format!("{field_name} must be greater than 0")),
    }
}

pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} must be a date (YYYY-MM-DD)"));
    }
    None
}

/// Zero-padded 24-hour `HH:MM`.
pub fn validate_time(value: &str, field_name: &str) -> Option<String> {
    if !HHMM_RE.is_match(value.trim()) {
        return Some(format!("{field_name} must be a time (HH:MM)"));
    }
    None
}

pub fn validate_url(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) || trimmed.contains(' ') {
        return Some(format!("{field_name} must be a valid link"));
    }
    None
}
