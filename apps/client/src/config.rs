use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/";

/// Client configuration loaded from environment variables (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub download_dir: PathBuf,
    pub preview_path: PathBuf,
    /// JSON file of form values keyed by field id.
    pub form_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            server_url: env_or("RESUME_SERVER_URL", DEFAULT_SERVER_URL),
            download_dir: PathBuf::from(env_or("DOWNLOAD_DIR", ".")),
            preview_path: PathBuf::from(env_or("PREVIEW_PATH", "preview.html")),
            form_path: std::env::var("RESUME_FORM").ok().map(PathBuf::from),
            rust_log: env_or("RUST_LOG", "info"),
        };

        if !config.download_dir.is_dir() {
            anyhow::bail!(
                "DOWNLOAD_DIR '{}' is not a directory",
                config.download_dir.display()
            );
        }
        Ok(config)
    }

    /// Reads the form values file named by `RESUME_FORM`, if any.
    pub fn load_form_values(&self) -> Result<Option<serde_json::Value>> {
        let Some(path) = &self.form_path else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form values from '{}'", path.display()))?;
        let values = serde_json::from_str(&raw)
            .with_context(|| format!("'{}' is not valid JSON", path.display()))?;
        Ok(Some(values))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_form(form_path: Option<PathBuf>) -> Config {
        Config {
            server_url: DEFAULT_SERVER_URL.to_string(),
            download_dir: PathBuf::from("."),
            preview_path: PathBuf::from("preview.html"),
            form_path,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_no_form_file_is_none() {
        assert!(config_with_form(None).load_form_values().unwrap().is_none());
    }

    #[test]
    fn test_form_file_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"name": "Ada"}"#).unwrap();

        let values = config_with_form(Some(path)).load_form_values().unwrap().unwrap();
        assert_eq!(values["name"], "Ada");
    }

    #[test]
    fn test_invalid_form_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "not json").unwrap();

        let err = config_with_form(Some(path)).load_form_values().unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }
}
