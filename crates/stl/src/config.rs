//! Engine configuration, loadable from TOML.

use std::fs;
use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};
use stl_semantics::{DEFAULT_DATE_FORMAT, DEFAULT_ELLIPSIS};

use crate::interpreter::ConfigError;

/// Site-wide defaults consulted by the evaluators.
///
/// Every key is optional in the TOML form:
///
/// ```toml
/// max_entity_depth = 10
/// site_url = "https://example.com"
/// date_format = "yyyy/MM/dd"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum nesting of entity markers inside attribute values.
    #[builder(default = 10)]
    pub max_entity_depth: usize,
    #[builder(default = DEFAULT_ELLIPSIS.to_string())]
    pub ellipsis: String,
    #[builder(default = DEFAULT_DATE_FORMAT.to_string())]
    pub date_format: String,
    /// Expansion of `@/` and `~/` in site-relative URLs.
    #[builder(default)]
    pub site_url: String,
    #[builder(default = "100%".to_string())]
    pub flash_width: String,
    #[builder(default = "180".to_string())]
    pub flash_height: String,
    #[builder(default = "450".to_string())]
    pub player_width: String,
    #[builder(default = "350".to_string())]
    pub player_height: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::builder().build()
    }
}

impl RenderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "configuration")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    /// Expand a leading `@/` or `~/` to [`site_url`](Self::site_url).
    pub fn expand_site_url(&self, url: &str) -> String {
        match url.strip_prefix("@/").or_else(|| url.strip_prefix("~/")) {
            Some(rest) => format!("{}/{rest}", self.site_url.trim_end_matches('/')),
            None => url.to_string(),
        }
    }
}
