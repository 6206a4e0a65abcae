use chrono::{Local, NaiveDate};

use crate::{
    error::{StoreError, ValidationError},
    models::{Field, MAX_FIELD_LEN, Person},
    validation::{validate_birth_date, validate_required_field},
};

/// Raw field input for a new person, validated by [`PersonStore::create`]
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub department: String,
    pub company: String,
}

/// Optional replacement values; `None` and blank values leave a field as it is
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub department: Option<String>,
    pub company: Option<String>,
}

/// What an update changed and which supplied values were rejected
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub applied: Vec<Field>,
    pub rejected: Vec<ValidationError>,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Person),
    Canceled,
}

/// Token that must accompany a delete, compared case-insensitively
pub const DELETE_CONFIRMATION: &str = "yes";

/// In-memory people collection in insertion order, plus the id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonStore {
    people: Vec<Person>,
    next_id: u32,
}

impl Default for PersonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStore {
    pub fn new() -> Self {
        Self {
            people: Vec::new(),
            next_id: 1,
        }
    }

    /// Seeds a store from persisted data. The counter is raised past the
    /// highest id present so ids are never handed out twice.
    pub fn from_parts(people: Vec<Person>, next_id: u32) -> Self {
        let after_max = people
            .iter()
            .map(|p| p.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            people,
            next_id: next_id.max(after_max),
        }
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn list(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn find(&self, id: u32) -> Result<&Person, StoreError> {
        self.people
            .iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    pub fn create(&mut self, fields: NewPerson) -> Result<&Person, StoreError> {
        self.create_on(fields, Local::now().date_naive())
    }

    /// Validates fields in display order and stops at the first failure,
    /// leaving the store untouched.
    pub fn create_on(&mut self, fields: NewPerson, today: NaiveDate) -> Result<&Person, StoreError> {
        let first_name =
            validate_required_field(Field::FirstName, &fields.first_name, MAX_FIELD_LEN)?;
        let last_name = validate_required_field(Field::LastName, &fields.last_name, MAX_FIELD_LEN)?;
        let birth_date = validate_birth_date(&fields.birth_date, today)?;
        let department =
            validate_required_field(Field::Department, &fields.department, MAX_FIELD_LEN)?;
        let company = validate_required_field(Field::Company, &fields.company, MAX_FIELD_LEN)?;

        // The counter must stay above the id being handed out
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;

        let person = Person::new(
            self.next_id,
            &first_name,
            &last_name,
            birth_date,
            &department,
            &company,
        );
        self.next_id = next_id;

        tracing::debug!("Created person {}", person.id);
        self.people.push(person);

        let created = self.people.len() - 1;
        Ok(&self.people[created])
    }

    pub fn update(&mut self, id: u32, changes: PersonUpdate) -> Result<UpdateReport, StoreError> {
        self.update_on(id, changes, Local::now().date_naive())
    }

    /// Applies each supplied field on its own: a rejected value does not
    /// stop the others from being applied.
    pub fn update_on(
        &mut self,
        id: u32,
        changes: PersonUpdate,
        today: NaiveDate,
    ) -> Result<UpdateReport, StoreError> {
        let person = self
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })?;

        let mut report = UpdateReport::default();

        let text_fields = [
            (Field::FirstName, changes.first_name, &mut person.first_name),
            (Field::LastName, changes.last_name, &mut person.last_name),
            (Field::Department, changes.department, &mut person.department),
            (Field::Company, changes.company, &mut person.company),
        ];
        for (field, input, target) in text_fields {
            let Some(input) = supplied(input) else {
                continue;
            };
            match validate_required_field(field, &input, MAX_FIELD_LEN) {
                Ok(value) => {
                    *target = value;
                    report.applied.push(field);
                }
                Err(e) => report.rejected.push(e),
            }
        }

        if let Some(input) = supplied(changes.birth_date) {
            match validate_birth_date(&input, today) {
                Ok(date) => {
                    person.birth_date = date;
                    report.applied.push(Field::BirthDate);
                }
                Err(e) => report.rejected.push(e),
            }
        }

        tracing::debug!(
            "Updated person {}: {} applied, {} rejected",
            id,
            report.applied.len(),
            report.rejected.len()
        );

        Ok(report)
    }

    /// Removes a person only when `confirmation` is the word "yes"
    pub fn delete(&mut self, id: u32, confirmation: &str) -> Result<DeleteOutcome, StoreError> {
        let index = self
            .people
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })?;

        if !confirmation.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Canceled);
        }

        tracing::debug!("Deleted person {}", id);
        Ok(DeleteOutcome::Deleted(self.people.remove(index)))
    }
}

fn supplied(input: Option<String>) -> Option<String> {
    input.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn jane() -> NewPerson {
        NewPerson {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            birth_date: "15-06-1990".to_string(),
            department: "Engineering".to_string(),
            company: "Acme".to_string(),
        }
    }

    fn store_with_jane() -> PersonStore {
        let mut store = PersonStore::new();
        store.create_on(jane(), today()).unwrap();
        store
    }

    #[test]
    fn create_assigns_first_id() {
        let mut store = PersonStore::new();
        let person = store.create_on(jane(), today()).unwrap().clone();

        assert_eq!(person.id, 1);
        assert_eq!(person.first_name, "Jane");
        assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn create_twice_keeps_order() {
        let mut store = PersonStore::new();
        store.create_on(jane(), today()).unwrap();
        let other = NewPerson {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            ..jane()
        };
        store.create_on(other, today()).unwrap();

        let ids: Vec<u32> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.list()[1].first_name, "John");
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn create_sanitizes_fields() {
        let mut store = PersonStore::new();
        let input = NewPerson {
            last_name: " O' Sullivan; ".to_string(),
            ..jane()
        };
        let person = store.create_on(input, today()).unwrap();
        assert_eq!(person.last_name, "O Sullivan");
    }

    #[test]
    fn create_birth_date_limits() {
        let mut store = PersonStore::new();

        let tomorrow = NewPerson {
            birth_date: "16-06-2024".to_string(),
            ..jane()
        };
        assert!(matches!(
            store.create_on(tomorrow, today()),
            Err(StoreError::Validation(ValidationError::FutureDate { .. }))
        ));

        let too_old = NewPerson {
            birth_date: "15-06-1903".to_string(),
            ..jane()
        };
        assert!(matches!(
            store.create_on(too_old, today()),
            Err(StoreError::Validation(ValidationError::DateTooOld { .. }))
        ));

        let oldest = NewPerson {
            birth_date: "15-06-1904".to_string(),
            ..jane()
        };
        assert!(store.create_on(oldest, today()).is_ok());
    }

    #[test]
    fn create_reports_first_error_without_mutating() {
        let mut store = PersonStore::new();
        let input = NewPerson {
            first_name: " ".to_string(),
            birth_date: "garbage".to_string(),
            ..jane()
        };

        assert_eq!(
            store.create_on(input, today()),
            Err(StoreError::Validation(ValidationError::EmptyField {
                field: Field::FirstName
            }))
        );
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn find_reports_missing_id() {
        let store = store_with_jane();
        assert_eq!(store.find(1).unwrap().last_name, "Doe");
        assert_eq!(store.find(7), Err(StoreError::NotFound { id: 7 }));
    }

    #[test]
    fn update_blank_value_is_skipped() {
        let mut store = store_with_jane();
        let report = store
            .update_on(
                1,
                PersonUpdate {
                    first_name: Some(String::new()),
                    ..Default::default()
                },
                today(),
            )
            .unwrap();

        assert_eq!(report, UpdateReport::default());
        assert_eq!(store.find(1).unwrap().first_name, "Jane");
    }

    #[test]
    fn update_applies_fields_independently() {
        let mut store = store_with_jane();
        let report = store
            .update_on(
                1,
                PersonUpdate {
                    first_name: Some("Janet".to_string()),
                    last_name: Some("z".repeat(MAX_FIELD_LEN + 1)),
                    birth_date: Some("01-01-2030".to_string()),
                    company: Some(" Globex ".to_string()),
                    ..Default::default()
                },
                today(),
            )
            .unwrap();

        assert_eq!(report.applied, vec![Field::FirstName, Field::Company]);
        assert_eq!(report.rejected.len(), 2);

        let person = store.find(1).unwrap();
        assert_eq!(person.first_name, "Janet");
        assert_eq!(person.last_name, "Doe");
        assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert_eq!(person.company, "Globex");
    }

    #[test]
    fn update_birth_date() {
        let mut store = store_with_jane();
        let report = store
            .update_on(
                1,
                PersonUpdate {
                    birth_date: Some("01-02-1985".to_string()),
                    ..Default::default()
                },
                today(),
            )
            .unwrap();

        assert!(report.changed());
        assert_eq!(
            store.find(1).unwrap().birth_date,
            NaiveDate::from_ymd_opt(1985, 2, 1).unwrap()
        );
    }

    #[test]
    fn update_missing_id() {
        let mut store = store_with_jane();
        assert_eq!(
            store.update_on(9, PersonUpdate::default(), today()),
            Err(StoreError::NotFound { id: 9 })
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut store = store_with_jane();

        assert_eq!(store.delete(1, "no"), Ok(DeleteOutcome::Canceled));
        assert_eq!(store.len(), 1);

        assert!(matches!(
            store.delete(1, " YES "),
            Ok(DeleteOutcome::Deleted(Person { id: 1, .. }))
        ));
        assert!(store.is_empty());

        assert_eq!(store.delete(1, "yes"), Err(StoreError::NotFound { id: 1 }));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = store_with_jane();
        store.delete(1, "yes").unwrap();
        let person = store.create_on(jane(), today()).unwrap();
        assert_eq!(person.id, 2);
    }

    #[test]
    fn create_refuses_when_ids_run_out() {
        let mut store = PersonStore::from_parts(Vec::new(), u32::MAX);

        assert_eq!(store.create_on(jane(), today()), Err(StoreError::IdsExhausted));
        assert!(store.is_empty());
        assert_eq!(store.next_id(), u32::MAX);
    }

    #[test]
    fn last_id_below_max_can_be_handed_out() {
        let mut store = PersonStore::from_parts(Vec::new(), u32::MAX - 1);

        let person = store.create_on(jane(), today()).unwrap();
        assert_eq!(person.id, u32::MAX - 1);
        assert_eq!(store.next_id(), u32::MAX);
        assert_eq!(store.create_on(jane(), today()), Err(StoreError::IdsExhausted));
    }

    #[test]
    fn from_parts_does_not_overflow_on_largest_id() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let people = vec![Person::new(u32::MAX, "A", "B", date, "C", "D")];

        assert_eq!(PersonStore::from_parts(people, 2).next_id(), u32::MAX);
    }

    #[test]
    fn from_parts_raises_counter_past_existing_ids() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let people = vec![
            Person::new(3, "A", "B", date, "C", "D"),
            Person::new(8, "E", "F", date, "G", "H"),
        ];

        assert_eq!(PersonStore::from_parts(people.clone(), 1).next_id(), 9);
        assert_eq!(PersonStore::from_parts(people, 12).next_id(), 12);
        assert_eq!(PersonStore::from_parts(Vec::new(), 1).next_id(), 1);
    }
}
