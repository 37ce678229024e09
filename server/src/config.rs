use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_DIR: &str = ".config/roster/data";
const DEV_DATA_DIR: &str = "./data";
const DATABASE_FILE: &str = "roster.db";

/// Get the data directory for persistence.
///
/// Priority:
/// 1. ROSTER_DATA_DIR env variable if set
/// 2. $HOME/.config/roster/data if HOME is set
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ROSTER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// SQLite database file inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_fallback() {
        // Either ROSTER_DATA_DIR, ~/.config/roster/data, or ./data
        let dir = get_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/srv/roster"));
        assert_eq!(path, PathBuf::from("/srv/roster/roster.db"));
    }
}
