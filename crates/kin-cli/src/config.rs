//! Configuration for ingestion, selection, and export.
//!
//! Load order: `.kinship/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".kinship";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KinConfig {
    pub ingest: IngestConfig,
    pub selection: SelectionConfig,
    pub export: ExportConfig,
}

/// Record filtering applied before the graph is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Relationship types dropped on load (placeholder rows in spreadsheets).
    pub skip_relationship_types: Vec<String>,
    /// Also drop persons that are the target of a skipped relationship.
    pub drop_skipped_targets: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// How many persons may be selected at once. Must be at least 2.
    pub max_selected: usize,
}

/// DOT export styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Graphviz `rankdir`: TB, BT, LR or RL.
    pub rankdir: String,
    pub highlight_color: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            skip_relationship_types: vec!["Filler".to_string()],
            drop_skipped_targets: false,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { max_selected: 2 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
            highlight_color: "red".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

/// Path of the config file under a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl KinConfig {
    /// Load config from `.kinship/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = config_path(project_root);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("KIN_MAX_SELECTED", &mut config.selection.max_selected);
        env_override("KIN_EXPORT_RANKDIR", &mut config.export.rankdir);

        config.export.rankdir = config.export.rankdir.to_uppercase();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection.max_selected < 2 {
            anyhow::bail!(
                "selection.max_selected ({}) must be at least 2",
                self.selection.max_selected
            );
        }
        if !matches!(self.export.rankdir.as_str(), "TB" | "BT" | "LR" | "RL") {
            anyhow::bail!(
                "export.rankdir must be one of TB, BT, LR, RL (found {:?})",
                self.export.rankdir
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KinConfig::default();
        assert_eq!(config.ingest.skip_relationship_types, vec!["Filler"]);
        assert!(!config.ingest.drop_skipped_targets);
        assert_eq!(config.selection.max_selected, 2);
        assert_eq!(config.export.rankdir, "TB");
        assert_eq!(config.export.highlight_color, "red");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[ingest]
skip_relationship_types = ["Filler", "Placeholder"]
drop_skipped_targets = true

[export]
rankdir = "LR"
"#;
        let config: KinConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ingest.skip_relationship_types.len(), 2);
        assert!(config.ingest.drop_skipped_targets);
        assert_eq!(config.export.rankdir, "LR");
        // Defaults for unspecified fields
        assert_eq!(config.export.highlight_color, "red");
        assert_eq!(config.selection.max_selected, 2);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = KinConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.selection.max_selected, 2);
    }

    #[test]
    fn test_load_rejects_single_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "[selection]\nmax_selected = 1\n").unwrap();

        let err = KinConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_load_normalizes_rankdir_case() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "[export]\nrankdir = \"lr\"\n").unwrap();

        let config = KinConfig::load(tmp.path()).unwrap();
        assert_eq!(config.export.rankdir, "LR");
    }
}
