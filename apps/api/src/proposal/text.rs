//! Sentence and number formatting shared by the PDF and the preview.

use lazy_static::lazy_static;
use regex::Regex;

use crate::proposal::models::{LineItem, ServiceType};

lazy_static! {
    /// "ST" or "ST 12345[-6789]"
    static ref STATE_ZIP: Regex = Regex::new(r"^[A-Z]{2}(\s+\d{5}(-\d{4})?)?$").unwrap();
}

pub const FALLBACK_SERVICES_TEXT: &str = "building envelope consulting services";

/// "City, ST" from a comma-separated address.
///
/// When the last part is `ST` or `ST ZIP` the city is the part before it.
/// Otherwise, with three or more parts, a trailing country is assumed: the city
/// is third from the end and the state leads the part before the last. Anything
/// else is returned unchanged.
pub fn extract_city_state(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    let first_word = |s: &str| s.split(' ').next().unwrap_or("").to_string();

    match parts.len() {
        n if n >= 2 && STATE_ZIP.is_match(parts[n - 1]) => {
            format!("{}, {}", parts[n - 2], first_word(parts[n - 1]))
        }
        n if n >= 3 => format!("{}, {}", parts[n - 3], first_word(parts[n - 2])),
        2 => format!("{}, {}", parts[0], first_word(parts[1])),
        _ => address.to_string(),
    }
}

/// Lowercased basic-service names joined as an English list.
pub fn selected_services_text(items: &[LineItem]) -> String {
    let names: Vec<String> = items
        .iter()
        .filter(|i| i.service_type == ServiceType::Basic)
        .map(|i| i.name.to_lowercase())
        .collect();

    match names.as_slice() {
        [] => FALLBACK_SERVICES_TEXT.to_string(),
        [only] => only.clone(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Thousands-separated amount with at most two decimals, trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}

/// Whole-dollar rendering used in the reimbursable breakdown. Halves round up.
pub fn format_whole_dollars(value: f64) -> String {
    format!("{:.0}", value.round())
}

/// Formats up to ten digits as `(205) 663-2220`, ignoring other characters.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(10).collect();
    match digits.len() {
        0 => String::new(),
        1..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
