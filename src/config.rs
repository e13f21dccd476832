use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Site configuration, loaded once from a JSON file and read-only afterwards.
///
/// Only three keys are interpreted by the pipeline itself. Every other key in
/// the file lands in `extra` and is passed through to templates under
/// `config.<key>`, so themes can define their own settings (base URL, site
/// name, analytics snippets) without the core knowing about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the podcast RSS feed
    #[serde(rename = "feed_URL")]
    pub feed_url: String,

    /// Directory the site is written into
    pub output_dir: PathBuf,

    /// Directory containing the theme templates (frontpage.html, episode.html)
    pub theme_dir: PathBuf,

    /// Unrecognized keys, preserved for the template context
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Load the configuration from a JSON file.
///
/// Missing recognized keys are a parse error here, not a failure at first
/// use later in the run.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
