use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "people.json";

/// When the shell writes the store back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePolicy {
    /// Only on explicit save and on exit
    OnExit,
    /// After every successful create, update or delete
    AfterEachChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub save_policy: SavePolicy,
}

impl Config {
    /// Reads `PEOPLE_FILE` and `PEOPLE_AUTOSAVE` (an optional `.env` is
    /// loaded first), then applies command-line overrides.
    pub fn load(file_override: Option<PathBuf>, autosave_flag: bool) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }

        Self::resolve(
            std::env::var("PEOPLE_FILE").ok(),
            std::env::var("PEOPLE_AUTOSAVE").ok(),
            file_override,
            autosave_flag,
        )
    }

    fn resolve(
        env_file: Option<String>,
        env_autosave: Option<String>,
        file_override: Option<PathBuf>,
        autosave_flag: bool,
    ) -> Self {
        let data_file = file_override
            .or_else(|| env_file.filter(|f| !f.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let autosave = autosave_flag || env_autosave.as_deref().is_some_and(is_truthy);
        let save_policy = if autosave {
            SavePolicy::AfterEachChange
        } else {
            SavePolicy::OnExit
        };

        Self {
            data_file,
            save_policy,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
