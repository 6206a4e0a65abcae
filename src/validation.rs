use chrono::{Datelike, NaiveDate};

use crate::{
    error::ValidationError,
    models::{DATE_FORMAT, Field},
};

/// Oldest accepted birth year, counted back from the current year
pub const MAX_AGE_YEARS: i32 = 120;

const FORBIDDEN: [&str; 4] = ["\"", "'", ";", "--"];

/// Strips quotes, semicolons and `--` from free text and trims it.
/// Blank input is returned as-is.
pub fn sanitize(input: &str) -> String {
    if input.trim().is_empty() {
        return input.to_string();
    }

    let mut cleaned = input.trim().to_string();
    for pattern in FORBIDDEN {
        cleaned = cleaned.replace(pattern, "");
    }

    // Removals can expose inner whitespace at the edges
    cleaned.trim().to_string()
}

/// Sanitizes a required text field and returns the cleaned value
pub fn validate_required_field(
    field: Field,
    input: &str,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value = sanitize(input);
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }

    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::FieldTooLong {
            field,
            len,
            max: max_len,
        });
    }

    Ok(value)
}

/// Parses a `dd-MM-yyyy` birth date and checks it against `today`
pub fn validate_birth_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = parse_date(input).ok_or_else(|| ValidationError::InvalidDateFormat {
        value: input.trim().to_string(),
    })?;

    if date > today {
        return Err(ValidationError::FutureDate { date });
    }

    // Whole years only: any day in the boundary year is accepted
    let min_year = today.year() - MAX_AGE_YEARS;
    if date.year() < min_year {
        return Err(ValidationError::DateTooOld { date, min_year });
    }

    Ok(date)
}

/// Exact `dd-MM-yyyy`: two-digit day and month, four-digit year
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Shortens text for table display, ending it with `...` when cut
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let mut shortened: String = text.chars().take(max_len.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}
