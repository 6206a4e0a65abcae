//! JSON data file: `{ "people": [...], "nextId": n }`
//!
//! Birth dates are stored as `dd-MM-yyyy` strings. The in-memory [`Person`]
//! carries a `NaiveDate`, so every record passes through an explicit
//! encode/decode pair on its way to and from disk.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::CodecError,
    models::Person,
    store::PersonStore,
    validation::{format_date, parse_date},
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonRecord {
    #[serde(alias = "Id")]
    id: u32,
    #[serde(alias = "FirstName")]
    first_name: String,
    #[serde(alias = "LastName")]
    last_name: String,
    #[serde(alias = "BirthDate")]
    birth_date: String,
    #[serde(alias = "Department")]
    department: String,
    #[serde(alias = "Company")]
    company: String,
}

/// `null` and a missing key mean the same thing on load
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(default)]
    people: Option<Vec<PersonRecord>>,
    #[serde(default, alias = "NextId")]
    next_id: Option<u32>,
}

const DEFAULT_NEXT_ID: u32 = 1;

fn encode_person(person: &Person) -> PersonRecord {
    PersonRecord {
        id: person.id,
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        birth_date: format_date(person.birth_date),
        department: person.department.clone(),
        company: person.company.clone(),
    }
}

fn decode_person(record: PersonRecord) -> Result<Person, CodecError> {
    let birth_date = parse_date(&record.birth_date).ok_or(CodecError::MalformedDate {
        id: record.id,
        value: record.birth_date.clone(),
    })?;

    Ok(Person {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        birth_date,
        department: record.department,
        company: record.company,
    })
}

/// Reads the data file. A missing file is an empty store with `nextId` 1.
/// A bare top-level array of people is accepted as well.
pub fn load(path: &Path) -> Result<(Vec<Person>, u32), CodecError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No data file at {}, starting empty", path.display());
            return Ok((Vec::new(), DEFAULT_NEXT_ID));
        }
        Err(source) => {
            return Err(CodecError::FileAccess {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let json_error = |source| CodecError::Json {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_json::from_str(&contents).map_err(json_error)?;
    let document = match value {
        Value::Null => StoreDocument {
            people: None,
            next_id: None,
        },
        Value::Array(_) => StoreDocument {
            people: serde_json::from_value(value).map_err(json_error)?,
            next_id: None,
        },
        _ => serde_json::from_value(value).map_err(json_error)?,
    };
    let records = document.people.unwrap_or_default();
    let next_id = document.next_id.unwrap_or(DEFAULT_NEXT_ID);

    let mut seen = HashSet::new();
    let mut people = Vec::with_capacity(records.len());
    for record in records {
        // u32::MAX is reserved so the counter can always sit above every id
        if record.id == 0 || record.id == u32::MAX {
            return Err(CodecError::InvalidId { id: record.id });
        }
        if !seen.insert(record.id) {
            return Err(CodecError::DuplicateId { id: record.id });
        }
        people.push(decode_person(record)?);
    }

    tracing::info!("Loaded {} people from {}", people.len(), path.display());

    Ok((people, next_id))
}

/// [`load`] straight into a [`PersonStore`]
pub fn load_store(path: &Path) -> Result<PersonStore, CodecError> {
    let (people, next_id) = load(path)?;
    Ok(PersonStore::from_parts(people, next_id))
}

/// Replaces the whole data file. The document is written next to the
/// target first and then renamed over it.
pub fn save(path: &Path, people: &[Person], next_id: u32) -> Result<(), CodecError> {
    let document = StoreDocument {
        people: Some(people.iter().map(encode_person).collect()),
        next_id: Some(next_id),
    };
    let json = serde_json::to_string_pretty(&document).map_err(|source| CodecError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let file_access = |source| CodecError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_access)?;
    }

    let tmp_path = temp_path(path);
    fs::write(&tmp_path, json).map_err(file_access)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(file_access(e));
    }

    tracing::info!("Saved {} people to {}", people.len(), path.display());

    Ok(())
}

/// [`save`] for a whole store
pub fn save_store(path: &Path, store: &PersonStore) -> Result<(), CodecError> {
    save(path, store.list(), store.next_id())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
