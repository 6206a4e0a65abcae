//! Interactive menu on top of [`PersonStore`] and the data file.
//!
//! The shell only collects raw text and shows outcomes. Ids are parsed
//! here; every other rule is enforced by the store.

use anyhow::{Context, Result};

use std::{
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    codec,
    config::{Config, SavePolicy},
    error::{CodecError, InputError},
    models::Person,
    store::{DeleteOutcome, NewPerson, PersonStore, PersonUpdate, UpdateReport},
    validation::{format_date, truncate},
};

const COLUMN_WIDTH: usize = 15;

pub fn parse_id(input: &str) -> Result<u32, InputError> {
    input
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidIdFormat {
            value: input.trim().to_string(),
        })
}

/// Loads the data file for a session. An unreadable file degrades to an
/// empty store; a file that reads but does not decode is an error, so it
/// is never overwritten.
pub fn open_store(path: &Path) -> Result<PersonStore> {
    match codec::load_store(path) {
        Ok(store) => Ok(store),
        Err(e @ CodecError::FileAccess { .. }) => {
            tracing::warn!("{}, starting with an empty store", e);
            Ok(PersonStore::new())
        }
        Err(e) => Err(e).with_context(|| format!("Could not load {}", path.display())),
    }
}

pub fn format_table(people: &[Person]) -> String {
    if people.is_empty() {
        return "No people.\n".to_string();
    }

    let mut table = format!(
        "{:<5} {:<15} {:<15} {:<12} {:<15} {:<15}\n",
        "ID", "First Name", "Last Name", "Birth Date", "Department", "Company"
    );
    for person in people {
        table.push_str(&format!(
            "{:<5} {:<15} {:<15} {:<12} {:<15} {:<15}\n",
            person.id,
            truncate(&person.first_name, COLUMN_WIDTH),
            truncate(&person.last_name, COLUMN_WIDTH),
            format_date(person.birth_date),
            truncate(&person.department, COLUMN_WIDTH),
            truncate(&person.company, COLUMN_WIDTH),
        ));
    }
    table
}

pub fn format_details(person: &Person) -> String {
    format!(
        "ID: {}\nFirst Name: {}\nLast Name: {}\nBirth Date: {}\nDepartment: {}\nCompany: {}\n",
        person.id,
        person.first_name,
        person.last_name,
        format_date(person.birth_date),
        person.department,
        person.company
    )
}

pub fn format_update_report(id: u32, report: &UpdateReport) -> String {
    let mut text = if report.changed() {
        format!("Person with ID {} updated!\n", id)
    } else {
        format!("No changes made to person with ID {}.\n", id)
    };
    for rejected in &report.rejected {
        text.push_str(&format!("Skipped: {}\n", rejected));
    }
    text
}

pub struct Shell<R, W> {
    store: PersonStore,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: PersonStore, config: Config, input: R, output: W) -> Self {
        Self {
            store,
            config,
            input,
            output,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &PersonStore {
        &self.store
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs the menu until the user exits or input ends. End of input
    /// saves like "Save and exit".
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n=== Person Management System ===")?;
            writeln!(self.output, "1. Create new person")?;
            writeln!(self.output, "2. Read person")?;
            writeln!(self.output, "3. Update person")?;
            writeln!(self.output, "4. Delete person")?;
            writeln!(self.output, "5. Save")?;
            writeln!(self.output, "6. Save and exit")?;
            writeln!(self.output, "7. Exit without saving")?;

            let Some(choice) = self.prompt("Select an option: ")? else {
                self.save()?;
                return Ok(());
            };

            match choice.trim() {
                "1" => self.create()?,
                "2" => self.read()?,
                "3" => self.update()?,
                "4" => self.delete()?,
                "5" => {
                    self.save()?;
                }
                "6" => {
                    if self.save()? {
                        return Ok(());
                    }
                }
                "7" => {
                    writeln!(self.output, "Exiting without saving.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, please try again.")?,
            }
        }
    }

    /// `None` once input is exhausted
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_id(&mut self) -> Result<Option<u32>> {
        let Some(input) = self.prompt("Enter person ID: ")? else {
            return Ok(None);
        };
        match parse_id(&input) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                Ok(None)
            }
        }
    }

    fn create(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Create New Person ===")?;

        let mut fields = NewPerson::default();
        let prompts = [
            ("First Name: ", &mut fields.first_name),
            ("Last Name: ", &mut fields.last_name),
            ("Birth Date (dd-MM-yyyy, max age 120): ", &mut fields.birth_date),
            ("Department: ", &mut fields.department),
            ("Company: ", &mut fields.company),
        ];
        for (label, target) in prompts {
            let Some(value) = self.prompt(label)? else {
                return Ok(());
            };
            *target = value;
        }

        match self.store.create(fields) {
            Ok(person) => {
                let id = person.id;
                writeln!(self.output, "Person with ID {} created!", id)?;
                self.changed()?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn read(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Read Person Data ===")?;
        writeln!(self.output, "1. View all people")?;
        writeln!(self.output, "2. View specific person by ID")?;

        let Some(option) = self.prompt("Select an option: ")? else {
            return Ok(());
        };

        match option.trim() {
            "1" => {
                let table = format_table(self.store.list());
                write!(self.output, "{}", table)?;
            }
            "2" => {
                let Some(id) = self.prompt_id()? else {
                    return Ok(());
                };
                let text = match self.store.find(id) {
                    Ok(person) => format_details(person),
                    Err(e) => format!("{}\n", e),
                };
                write!(self.output, "{}", text)?;
            }
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Update Person ===")?;

        let Some(id) = self.prompt_id()? else {
            return Ok(());
        };
        if let Err(e) = self.store.find(id) {
            writeln!(self.output, "{}", e)?;
            return Ok(());
        }

        let mut changes = PersonUpdate::default();
        let prompts = [
            ("New First Name (leave empty to skip): ", &mut changes.first_name),
            ("New Last Name (leave empty to skip): ", &mut changes.last_name),
            (
                "New Birth Date (dd-MM-yyyy, leave empty to skip): ",
                &mut changes.birth_date,
            ),
            ("New Department (leave empty to skip): ", &mut changes.department),
            ("New Company (leave empty to skip): ", &mut changes.company),
        ];
        for (label, target) in prompts {
            let Some(value) = self.prompt(label)? else {
                return Ok(());
            };
            *target = Some(value);
        }

        match self.store.update(id, changes) {
            Ok(report) => {
                write!(self.output, "{}", format_update_report(id, &report))?;
                if report.changed() {
                    self.changed()?;
                }
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Delete Person ===")?;

        let Some(id) = self.prompt_id()? else {
            return Ok(());
        };
        if let Err(e) = self.store.find(id) {
            writeln!(self.output, "{}", e)?;
            return Ok(());
        }

        let Some(confirmation) = self.prompt(&format!("Delete person with ID {}? (yes/no): ", id))?
        else {
            return Ok(());
        };

        match self.store.delete(id, &confirmation) {
            Ok(DeleteOutcome::Deleted(_)) => {
                writeln!(self.output, "Person with ID {} deleted!", id)?;
                self.changed()?;
            }
            Ok(DeleteOutcome::Canceled) => writeln!(self.output, "Deletion canceled.")?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn changed(&mut self) -> Result<()> {
        if self.config.save_policy == SavePolicy::AfterEachChange {
            self.save()?;
        }
        Ok(())
    }

    /// Returns whether the file was written. A failed save leaves the
    /// in-memory store as it was so the user can retry.
    fn save(&mut self) -> Result<bool> {
        match codec::save_store(&self.config.data_file, &self.store) {
            Ok(()) => {
                writeln!(
                    self.output,
                    "Saved {} people to {}.",
                    self.store.len(),
                    self.config.data_file.display()
                )?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                writeln!(self.output, "Error: {}", e)?;
                Ok(false)
            }
        }
    }
}
