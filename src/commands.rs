use clap::{Parser, Subcommand, command};

use std::path::PathBuf;

/// Upper bound for a single `seed` run
pub const MAX_SEED_COUNT: u32 = 100_000;

#[derive(Parser)]
#[command(about = "Keep a small register of people in a JSON file")]
pub struct Args {
    /// Data file (overrides PEOPLE_FILE, default people.json)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Save after every change instead of only on exit
    #[arg(long, global = true)]
    pub autosave: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default)
    Interactive,
    /// List all people
    List,
    /// Show one person
    Show {
        /// The person's ID
        id: u32,
    },
    /// Add a person
    Create {
        first_name: String,
        last_name: String,
        /// Birth date as dd-MM-yyyy
        birth_date: String,
        department: String,
        company: String,
    },
    /// Change some fields of a person
    Update {
        /// The person's ID
        id: u32,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Birth date as dd-MM-yyyy
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Remove a person
    Delete {
        /// The person's ID
        id: u32,
        /// Must be "yes" for the delete to happen
        #[arg(long)]
        confirm: String,
    },
    /// Add randomly generated people
    Seed {
        /// The number of people to add
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_SEED_COUNT as i64))]
        count: u32,
    },
}
