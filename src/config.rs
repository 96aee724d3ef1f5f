use anyhow::Result;

// --- Studio Settings ---

pub const DEFAULT_DATABASE_URL: &str = "sqlite://ideas-studio.sqlite?mode=rwc";
/// Fixed key of the persisted record.
pub const DEFAULT_STORAGE_KEY: &str = "runwell.ideas.studio.v3";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "runwell-ideas-studio.json";

const DATABASE_URL_VAR: &str = "IDEAS_STUDIO_DATABASE_URL";
const STORAGE_KEY_VAR: &str = "IDEAS_STUDIO_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub database_url: String,
    pub storage_key: String,
    pub export_file_name: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl StudioConfig {
    /// Reads overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            log::debug!("Using database url from environment variable: {}", DATABASE_URL_VAR);
            config.database_url = url;
        }
        if let Some(key) = lookup(STORAGE_KEY_VAR) {
            let key = key.trim().to_string();
            if key.is_empty() {
                return Err(anyhow::anyhow!("{} is set but empty", STORAGE_KEY_VAR));
            }
            config.storage_key = key;
        }
        if !config.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Unsupported database url '{}' in {}: expected a sqlite: url",
                config.database_url,
                DATABASE_URL_VAR
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = StudioConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.storage_key, "runwell.ideas.studio.v3");
    }

    #[test]
    fn test_overrides() {
        let config = StudioConfig::from_lookup(lookup_from(&[
            ("IDEAS_STUDIO_DATABASE_URL", "sqlite::memory:"),
            ("IDEAS_STUDIO_STORAGE_KEY", " other.key "),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.storage_key, "other.key");
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let result = StudioConfig::from_lookup(lookup_from(&[(
            "IDEAS_STUDIO_DATABASE_URL",
            "postgres://localhost/db",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_blank_storage_key() {
        let result = StudioConfig::from_lookup(lookup_from(&[("IDEAS_STUDIO_STORAGE_KEY", "  ")]));
        assert!(result.is_err());
    }
}
