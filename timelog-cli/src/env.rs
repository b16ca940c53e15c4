//! `.env` loading
//!
//! Priority order (highest to lowest):
//! 1. Variables already set in the process environment
//! 2. Current directory .env
//! 3. ~/.timelog/.env
//!
//! dotenvy never overwrites a variable that is already set, so loading the
//! local file first gives it priority over the home directory file.

use std::path::PathBuf;

use tracing::debug;

/// Get the timelog config directory path (~/.timelog)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".timelog"))
}

/// Load `.env` files, returning where variables came from.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded .env from current directory: {}", path.display());
            loaded_from.push(path);
        }
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Failed to load ./.env: {}", e),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.timelog: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    loaded_from
}
