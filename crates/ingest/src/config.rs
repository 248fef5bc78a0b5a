use crate::error::{IngestError, IngestResult};

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Ingest configuration loaded from environment variables.
///
/// All fields have defaults matching the SOCIB HF-radar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Initial owner recorded on every new asset (default: `SOCIB`).
    pub owner: String,
    /// Version of the processing software (default: `1`).
    pub software_version: i64,
    /// Value stored in `Links` (default: empty).
    pub links: String,
    /// Log format (default: `text`).
    pub log_format: LogFormat,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            owner: "SOCIB".to_string(),
            software_version: 1,
            links: String::new(),
            log_format: LogFormat::Text,
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `ASSET_OWNER`      | `SOCIB` |
    /// | `SOFTWARE_VERSION` | `1`     |
    /// | `ASSET_LINKS`      | empty   |
    /// | `LOG_FORMAT`       | `text`  |
    pub fn from_env() -> IngestResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> IngestResult<Self> {
        let defaults = Self::default();

        let owner = lookup("ASSET_OWNER").unwrap_or(defaults.owner);
        if owner.trim().is_empty() {
            return Err(IngestError::Config("ASSET_OWNER must not be empty".into()));
        }

        let software_version = match lookup("SOFTWARE_VERSION") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                IngestError::Config(format!("SOFTWARE_VERSION must be an integer (got '{raw}')"))
            })?,
            None => defaults.software_version,
        };

        let links = lookup("ASSET_LINKS").unwrap_or(defaults.links);

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(IngestError::Config(format!(
                    "LOG_FORMAT must be 'text' or 'json' (got '{other}')"
                )))
            }
        };

        Ok(Self {
            owner,
            software_version,
            links,
            log_format,
        })
    }
}
