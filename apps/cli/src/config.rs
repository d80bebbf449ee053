use std::path::PathBuf;

use finfolio_connect::DEFAULT_API_URL;

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = std::env::var("FINFOLIO_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = std::env::var("FINFOLIO_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self { api_url, data_dir }
    }

    /// Where the persisted credential lives.
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("credentials.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".finfolio"))
        .unwrap_or_else(|| PathBuf::from(".finfolio"))
}
