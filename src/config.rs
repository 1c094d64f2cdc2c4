use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded built-in limits.
const DEFAULT_CONFIG: &str = include_str!("../limits.default.json");

/// Name of the per-project limits file, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".token-limits.json";

static BUILTIN: LazyLock<LimitsConfig> = LazyLock::new(|| {
    LimitsConfig::from_json(DEFAULT_CONFIG).expect("embedded default limits must parse")
});

/// Token limits: glob-pattern defaults plus exact-path overrides.
///
/// Both maps are ordered by key. Resolution order is computed from pattern
/// specificity, so declaration order in the file does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Free-form note; ignored by resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pattern → limit.
    pub defaults: BTreeMap<String, NonZeroUsize>,
    /// Path → limit. Checked before any pattern.
    #[serde(default)]
    pub overrides: BTreeMap<String, NonZeroUsize>,
}

impl LimitsConfig {
    /// The built-in limits, parsed once per process.
    pub fn builtin() -> &'static LimitsConfig {
        &BUILTIN
    }

    /// Parse limits from JSON.
    ///
    /// `defaults` must be present and be an object; every limit must be a
    /// positive integer.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        match value.get("defaults") {
            Some(serde_json::Value::Object(_)) => {}
            Some(_) => return Err(Error::InvalidConfig("\"defaults\" must be an object".into())),
            None => return Err(Error::InvalidConfig("missing \"defaults\" field".into())),
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load `<root>/.token-limits.json`, falling back to the built-in limits.
    pub fn load(root: &Path) -> Self {
        Self::load_from(&root.join(CONFIG_FILE_NAME))
    }

    /// Load limits from `path`, falling back to the built-in limits.
    ///
    /// A missing file is silent; an unreadable or invalid one is logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("{} not found, using built-in limits", path.display());
            return Self::builtin().clone();
        }
        match std::fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|content| Self::from_json(&content))
        {
            Ok(config) => {
                log::debug!(
                    "loaded {} ({} defaults, {} overrides)",
                    path.display(),
                    config.defaults.len(),
                    config.overrides.len()
                );
                config
            }
            Err(e) => {
                log::warn!("invalid {} ({e}), using built-in limits", path.display());
                Self::builtin().clone()
            }
        }
    }
}
