use chrono::NaiveDate;
use thiserror::Error;

use std::path::PathBuf;

use crate::models::Field;

/// Rejections of a single field value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: Field },

    #[error("{field} is {len} characters long, at most {max} allowed")]
    FieldTooLong { field: Field, len: usize, max: usize },

    #[error("'{value}' is not a date in dd-MM-yyyy format")]
    InvalidDateFormat { value: String },

    #[error("birth date {date} lies in the future")]
    FutureDate { date: NaiveDate },

    #[error("birth date {date} is before the year {min_year}")]
    DateTooOld { date: NaiveDate, min_year: i32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Person with ID {id} not found")]
    NotFound { id: u32 },

    #[error("No person IDs left to assign")]
    IdsExhausted,
}

/// Failures while reading or writing the data file
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Could not access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Person {id} has malformed birth date '{value}'")]
    MalformedDate { id: u32, value: String },

    #[error("Person ID {id} is out of range (1 to {})", u32::MAX - 1)]
    InvalidId { id: u32 },

    #[error("Person ID {id} appears more than once")]
    DuplicateId { id: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{value}' is not a valid ID")]
    InvalidIdFormat { value: String },
}
