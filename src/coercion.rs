// One fallback policy for every field read out of a participant record. Nothing in here fails:
// an absent or malformed value turns into the default.

use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

pub fn uint_field(record: &Record, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::String(s)) if is_digits(s) => s.parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

pub fn float_field(record: &Record, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::String(s)) if is_decimal(s) => s.parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().filter(|v| *v >= 0.0).unwrap_or(0.0),
        _ => 0.0,
    }
}

// Deltas and other fields that can legitimately go below zero
pub fn signed_float_field(record: &Record, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::String(s)) => {
            let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
            if is_decimal(unsigned) { s.parse().unwrap_or(0.0) } else { 0.0 }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn flag_field(record: &Record, key: &str) -> bool {
    match record.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes")
        }
        _ => false,
    }
}

pub fn win_field(record: &Record, key: &str) -> bool {
    match record.get(key) {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("win"),
        _ => false,
    }
}

// Strings verbatim, numbers in decimal so a side written as 100 equals "100"
pub fn text_field(record: &Record, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Digits with at most one decimal point, and at least one digit somewhere
fn is_decimal(s: &str) -> bool {
    let mut seen_point = false;
    let mut seen_digit = false;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}
