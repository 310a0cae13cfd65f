use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The designated Home path; a Home tab is never duplicated.
    pub home_href: String,
    /// Where the "new tab" control points (the default landing path).
    pub new_tab_href: String,
    /// Label given to freshly created tabs.
    pub new_tab_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_href: "/".to_string(),
            new_tab_href: "/".to_string(),
            new_tab_label: "New tab".to_string(),
        }
    }
}

impl Settings {
    pub fn get_path(data_dir: &Path) -> PathBuf {
        data_dir.join("settings.json")
    }

    pub fn load(data_dir: &Path) -> Self {
        let path = Self::get_path(data_dir);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), String> {
        let path = Self::get_path(data_dir);

        fs::create_dir_all(data_dir).map_err(|e| e.to_string())?;

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        // Atomic Write Strategy: Write to tmp, then rename.
        // This ensures we never have a half-written file if the host crashes.
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.home_href, "/");
        assert_eq!(settings.new_tab_href, "/");
        assert_eq!(settings.new_tab_label, "New tab");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.new_tab_href = "/dashboard".to_string();
        settings.save(dir.path()).unwrap();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.new_tab_href, "/dashboard");
        assert_eq!(loaded.home_href, "/");
    }

    #[test]
    fn test_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(Settings::get_path(dir.path()), "{not json").unwrap();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.new_tab_label, "New tab");
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.home_href, "/");
    }
}
