use chrono::{Local, Months, NaiveDate, TimeDelta};
use rand::Rng;

use crate::{
    error::StoreError,
    store::{NewPerson, PersonStore},
    validation::format_date,
};

const FIRST_NAMES: [&str; 10] = [
    "Tom", "Johnny", "Jim", "Eric", "Amanda", "Grace", "Judy", "Frank", "Sally", "Will",
];
const LAST_NAMES: [&str; 10] = [
    "Connor",
    "Henderson",
    "Farley",
    "Henson",
    "Jeffries",
    "Carlin",
    "Anderson",
    "O' Sullivan",
    "Dorothy",
    "McDougal",
];
const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Sales",
    "Marketing",
    "Finance",
    "Human Resources",
    "Research and Development",
];
const COMPANIES: [&str; 5] = ["Acme", "Globex", "Initech", "Umbrella", "Hooli"];

/// Adds `count` random people through the regular create path
pub fn seed(store: &mut PersonStore, count: u32) -> Result<Vec<u32>, StoreError> {
    let mut rng = rand::rng();
    seed_on(store, count, &mut rng, Local::now().date_naive())
}

pub fn seed_on<R: Rng>(
    store: &mut PersonStore,
    count: u32,
    rng: &mut R,
    today: NaiveDate,
) -> Result<Vec<u32>, StoreError> {
    tracing::info!("Seeding {} people", count);

    let start = std::time::Instant::now();
    let mut ids = Vec::new();

    for _ in 0..count {
        let age = rng.random_range(18..=65);
        let birthday = today.checked_sub_months(Months::new(age * 12)).unwrap_or(today);
        let birth_date = birthday - TimeDelta::days(rng.random_range(0..365));

        let fields = NewPerson {
            first_name: FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())].to_string(),
            last_name: LAST_NAMES[rng.random_range(0..LAST_NAMES.len())].to_string(),
            birth_date: format_date(birth_date),
            department: DEPARTMENTS[rng.random_range(0..DEPARTMENTS.len())].to_string(),
            company: COMPANIES[rng.random_range(0..COMPANIES.len())].to_string(),
        };

        ids.push(store.create_on(fields, today)?.id);
    }

    tracing::info!("Seeded {} people in {:?}", ids.len(), start.elapsed());

    Ok(ids)
}
