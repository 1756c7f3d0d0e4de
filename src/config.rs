use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dataset::UNAFFILIATED;

/// Ingestion settings.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "unaffiliatedAliases": ["generic", "none"],
///   "unaffiliatedLabel": "Unaffiliated"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Legacy spellings of the unaffiliated key, folded into `unaffiliated`.
    pub unaffiliated_aliases: Vec<String>,
    pub unaffiliated_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unaffiliated_aliases: vec!["generic".to_string()],
            unaffiliated_label: "Unaffiliated".to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config '{path}'"))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid engine config '{path}'"))
    }

    /// Maps a parade key onto its canonical spelling.
    pub fn canonical_key<'a>(&self, key: &'a str) -> &'a str {
        fold_alias(&self.unaffiliated_aliases, key)
    }
}

pub(crate) fn fold_alias<'a>(aliases: &[String], key: &'a str) -> &'a str {
    if aliases.iter().any(|alias| alias == key) {
        UNAFFILIATED
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_default_folds_generic() {
        let config = EngineConfig::default();
        assert_eq!(config.canonical_key("generic"), UNAFFILIATED);
        assert_eq!(config.canonical_key("unaffiliated"), UNAFFILIATED);
        assert_eq!(config.canonical_key("endymion"), "endymion");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = temp_path("parade_throws_test_config.json");
        fs::write(&path, r#"{"unaffiliatedAliases": ["street"]}"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.canonical_key("street"), UNAFFILIATED);
        assert_eq!(config.canonical_key("generic"), "generic");
        assert_eq!(config.unaffiliated_label, "Unaffiliated");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(&temp_path("parade_throws_no_such_config.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read engine config"));
    }
}
