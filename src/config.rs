use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::auth::Token;
use crate::error::{MigratorError, Result};

/// What to do when a single group or project cannot be migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, record it in the report and carry on with siblings
    #[default]
    Skip,
    /// Stop the whole run on the first failure
    Abort,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// Migration settings, resolved and validated.
///
/// Target URL and token fall back to the source values when left empty, so a
/// migration inside a single instance only needs the source side filled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_gitlab_url: String,
    pub target_gitlab_url: String,
    pub source_access_token: Token,
    pub target_access_token: Token,
    pub source_group: String,
    pub target_group: String,
    /// Project paths relative to `source_group`; non-empty selects the named-project mode
    pub specific_projects: Vec<String>,
    pub on_error: ErrorPolicy,
    pub request_timeout_secs: Option<u64>,
}

/// On-disk shape. Every key is optional here so that missing values surface as
/// validation errors with the key name instead of a parser error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    source_gitlab_url: Option<String>,
    target_gitlab_url: Option<String>,
    source_access_token: Option<Token>,
    target_access_token: Option<Token>,
    source_group: Option<String>,
    target_group: Option<String>,
    specific_projects: Option<Vec<String>>,
    #[serde(alias = "on_subgroup_error")]
    on_error: Option<ErrorPolicy>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// The format follows the extension: `.yaml`/`.yml`, `.toml` or `.json`.
    /// Files with any other extension are tried as YAML, then TOML, then JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MigratorError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let raw = parse(&contents, extension).map_err(|e| {
            MigratorError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        Self::resolve(raw)
    }

    fn resolve(raw: RawConfig) -> Result<Self> {
        let source_gitlab_url = normalize_url(raw.source_gitlab_url);
        let target_gitlab_url = match normalize_url(raw.target_gitlab_url) {
            url if url.is_empty() => source_gitlab_url.clone(),
            url => url,
        };

        let source_access_token = raw.source_access_token.unwrap_or_default();
        let target_access_token = match raw.target_access_token {
            Some(token) if !token.is_empty() => token,
            _ => source_access_token.clone(),
        };

        let config = Self {
            source_gitlab_url,
            target_gitlab_url,
            source_access_token,
            target_access_token,
            source_group: normalize_path(raw.source_group.unwrap_or_default()),
            target_group: normalize_path(raw.target_group.unwrap_or_default()),
            specific_projects: raw
                .specific_projects
                .unwrap_or_default()
                .into_iter()
                .map(normalize_path)
                .filter(|p| !p.is_empty())
                .collect(),
            on_error: raw.on_error.unwrap_or_default(),
            request_timeout_secs: raw.request_timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("source_gitlab_url", self.source_gitlab_url.is_empty()),
            ("source_access_token", self.source_access_token.is_empty()),
            ("source_group", self.source_group.is_empty()),
            ("target_group", self.target_group.is_empty()),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, empty)| *empty)
            .map(|(key, _)| *key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MigratorError::Config(format!(
                "Missing required setting(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Per-request timeout, `None` keeps the HTTP client default.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse(contents: &str, extension: &str) -> std::result::Result<RawConfig, String> {
    match extension {
        "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        "toml" => toml::from_str(contents).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(contents).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(contents)
            .or_else(|_| toml::from_str(contents))
            .or_else(|_| serde_json::from_str(contents))
            .map_err(|e: serde_json::Error| e.to_string()),
    }
}

fn normalize_url(url: Option<String>) -> String {
    url.unwrap_or_default()
        .trim()
        .trim_end_matches('/')
        .to_string()
}

fn normalize_path(path: String) -> String {
    path.trim().trim_matches('/').to_string()
}
