use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base url '{url}' must use http or https")]
    UnsupportedScheme { url: String },
    #[error("invalid request timeout '{value}': expected whole seconds")]
    InvalidTimeout { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    /// Transport timeout; unset means the HTTP client never times out.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Checks the base url and strips trailing slashes from it.
    pub fn validated(mut self) -> Result<Self, SettingsError> {
        let raw = self.api_base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&raw).map_err(|source| SettingsError::InvalidBaseUrl {
            url: raw.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme { url: raw });
        }
        self.api_base_url = raw;
        Ok(self)
    }
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let settings = match fs::read_to_string(path) {
        Ok(raw) => parse_settings(path, &raw)?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    apply_env(settings, |key| std::env::var(key).ok())
}

fn parse_settings(path: &Path, raw: &str) -> Result<Settings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    if let Some(v) = lookup("PANEL_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        let parsed = v
            .trim()
            .parse::<u64>()
            .map_err(|_| SettingsError::InvalidTimeout { value: v.clone() })?;
        settings.request_timeout_secs = Some(parsed);
    }

    Ok(settings)
}
