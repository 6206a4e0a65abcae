use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{self, Write};

mod codec;
mod commands;
mod config;
mod error;
mod models;
mod seed;
mod shell;
mod store;
mod validation;

use commands::{Args, Commands};
use config::Config;
use shell::{Shell, format_details, format_table, format_update_report, open_store};
use store::{DeleteOutcome, NewPerson, PersonUpdate};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_interactive(config: Config) -> Result<()> {
    let store = open_store(&config.data_file)?;

    let stdin = io::stdin();
    let mut shell = Shell::new(store, config, stdin.lock(), io::stdout());
    shell.run()
}

/// Runs one operation against the data file, saving only if it changed
/// something.
fn run_command<W: Write>(config: &Config, command: Commands, out: &mut W) -> Result<()> {
    if let Commands::Interactive = command {
        return run_interactive(config.clone());
    }

    let mut store = open_store(&config.data_file)?;

    let changed = match command {
        Commands::Interactive => false,
        Commands::List => {
            write!(out, "{}", format_table(store.list()))?;
            false
        }
        Commands::Show { id } => {
            write!(out, "{}", format_details(store.find(id)?))?;
            false
        }
        Commands::Create {
            first_name,
            last_name,
            birth_date,
            department,
            company,
        } => {
            let person = store.create(NewPerson {
                first_name,
                last_name,
                birth_date,
                department,
                company,
            })?;
            writeln!(out, "Person with ID {} created!", person.id)?;
            true
        }
        Commands::Update {
            id,
            first_name,
            last_name,
            birth_date,
            department,
            company,
        } => {
            let report = store.update(
                id,
                PersonUpdate {
                    first_name,
                    last_name,
                    birth_date,
                    department,
                    company,
                },
            )?;
            write!(out, "{}", format_update_report(id, &report))?;
            report.changed()
        }
        Commands::Delete { id, confirm } => match store.delete(id, &confirm)? {
            DeleteOutcome::Deleted(_) => {
                writeln!(out, "Person with ID {} deleted!", id)?;
                true
            }
            DeleteOutcome::Canceled => {
                writeln!(out, "Deletion canceled.")?;
                false
            }
        },
        Commands::Seed { count } => {
            let ids = seed::seed(&mut store, count)?;
            writeln!(out, "Created {} people.", ids.len())?;
            !ids.is_empty()
        }
    };

    if changed {
        codec::save_store(&config.data_file, &store)
            .with_context(|| format!("Could not save {}", config.data_file.display()))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Args::parse();
    let config = Config::load(cli.file, cli.autosave);
    tracing::debug!("Using data file {}", config.data_file.display());

    match cli.command {
        None => run_interactive(config)?,
        Some(command) => run_command(&config, command, &mut io::stdout())?,
    }

    Ok(())
}
