//! Helper functions and utilities
//! 
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use crate::utils::errors::{EventDeskError, Result};

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Business identifiers must be non-empty, unpadded and free of control characters
pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EventDeskError::Validation(format!("{} is required", field)));
    }

    if value.trim() != value {
        return Err(EventDeskError::Validation(format!(
            "{} must not have leading or trailing whitespace",
            field
        )));
    }

    if value.chars().any(char::is_control) {
        return Err(EventDeskError::Validation(format!("{} contains control characters", field)));
    }

    Ok(())
}

/// Single-line text such as a name: non-blank, no control characters
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EventDeskError::Validation(format!("{} is required", field)));
    }

    if value.chars().any(char::is_control) {
        return Err(EventDeskError::Validation(format!("{} contains control characters", field)));
    }

    Ok(())
}

/// Free text may span lines but carries no other control characters
pub fn validate_free_text(field: &str, value: &str) -> Result<()> {
    if value.chars().any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t')) {
        return Err(EventDeskError::Validation(format!("{} contains control characters", field)));
    }

    Ok(())
}

/// Check that a link is an absolute http(s) URL
pub fn is_valid_http_url(link: &str) -> bool {
    match url::Url::parse(link) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_flexible_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Collapse a list of identifiers into a sorted, duplicate-free set
pub fn dedup_ids<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();
    
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
