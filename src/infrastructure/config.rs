use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TOKEN_FILE: &str = ".dashboard/session.json";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub reports: ReportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Empty means the session only lives in memory.
    #[serde(default)]
    pub token_file: String,
}

impl StorageSettings {
    pub fn token_file(&self) -> Option<&str> {
        let path = self.token_file.trim();
        (!path.is_empty()).then_some(path)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub download_dir: String,
}

/// Defaults, then `config/client.*` (or `path`), then `DASHBOARD__*` env vars.
pub fn load_client_config(path: Option<&str>) -> anyhow::Result<ClientConfig> {
    let file = match path {
        Some(path) => config::File::with_name(path).required(true),
        None => config::File::with_name("config/client").required(false),
    };

    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE)?
        .set_default("storage.token_file", DEFAULT_TOKEN_FILE)?
        .set_default("reports.download_dir", ".")?
        .add_source(file)
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"https://plant.example.com/api\"\n\n[storage]\ntoken_file = \"\"\n",
        )
        .unwrap();

        let config = load_client_config(Some(path.to_str().unwrap())).unwrap();

        assert_eq!(config.api.base_url, "https://plant.example.com/api");
        assert_eq!(config.storage.token_file(), None);
        assert_eq!(config.reports.download_dir, ".");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(load_client_config(Some(path.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_token_file_selection() {
        let storage = StorageSettings {
            token_file: DEFAULT_TOKEN_FILE.to_string(),
        };
        assert_eq!(storage.token_file(), Some(DEFAULT_TOKEN_FILE));

        let storage = StorageSettings {
            token_file: "  ".to_string(),
        };
        assert_eq!(storage.token_file(), None);
    }
}
