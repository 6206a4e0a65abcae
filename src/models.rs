use chrono::NaiveDate;

use std::fmt;

/// Maximum length of a text field after sanitization
pub const MAX_FIELD_LEN: usize = 50;

/// Day-month-year layout used for input, display and the data file
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub department: String,
    pub company: String,
}

impl Person {
    pub fn new(
        id: u32,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
        department: &str,
        company: &str,
    ) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            department: department.to_string(),
            company: company.to_string(),
        }
    }
}

/// Names the editable fields of a person, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    BirthDate,
    Department,
    Company,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::BirthDate => "birth date",
            Field::Department => "department",
            Field::Company => "company",
        };
        f.write_str(name)
    }
}
