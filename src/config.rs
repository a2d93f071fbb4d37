use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use which::which;

use crate::tfvc::{CliVariant, MessageCatalog, MessageKey, OverrideCatalog};

const PROJECT_CONFIG_NAMES: [&str; 2] = [".tfwork.yaml", ".tfwork.yml"];

/// Executable names tried on PATH when `tf_path` is not configured
const TF_EXECUTABLES: [&str; 2] = ["tf", "tf.exe"];

/// Configuration for tfwork, read from `~/.config/tfwork/config.yaml`
/// and the nearest `.tfwork.yaml`
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Path to the TF executable (defaults to `tf` or `tf.exe` on PATH)
    #[serde(default)]
    pub tf_path: Option<PathBuf>,

    /// Output format of the executable (inferred from `tf_path` if not set)
    #[serde(default)]
    pub variant: Option<CliVariant>,

    /// Pick the default team project from the mapping matching the local path
    #[serde(default)]
    pub restrict_workspace: Option<bool>,

    /// Localized replacements for user-facing messages, keyed by identifier
    #[serde(default)]
    pub messages: HashMap<MessageKey, String>,
}

impl Config {
    /// Load and merge global and project configurations.
    pub fn load(start_dir: &Path) -> anyhow::Result<Self> {
        debug!("config:loading");
        let global_config = Self::load_global()?.unwrap_or_default();
        let project_config = match find_project_config(start_dir) {
            Some(path) => Self::load_from_path(&path)?.unwrap_or_default(),
            None => Self::default(),
        };

        let config = global_config.merge(project_config);
        debug!(
            tf_path = ?config.tf_path,
            variant = ?config.variant,
            messages = config.messages.len(),
            "config:loaded"
        );
        Ok(config)
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "config:reading file");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config at {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    /// Load the global configuration file from the XDG config directory.
    fn load_global() -> anyhow::Result<Option<Self>> {
        if let Some(home_dir) = home::home_dir() {
            for name in ["config.yaml", "config.yml"] {
                let path = home_dir.join(".config/tfwork").join(name);
                if path.exists() {
                    return Self::load_from_path(&path);
                }
            }
        }
        Ok(None)
    }

    /// Merge a project config into a global config.
    /// Project values take precedence; message tables merge per key.
    fn merge(self, project: Self) -> Self {
        let mut messages = self.messages;
        messages.extend(project.messages);
        Self {
            tf_path: project.tf_path.or(self.tf_path),
            variant: project.variant.or(self.variant),
            restrict_workspace: project.restrict_workspace.or(self.restrict_workspace),
            messages,
        }
    }

    pub fn restrict_workspace(&self) -> bool {
        self.restrict_workspace.unwrap_or(false)
    }

    /// Resolve the TF executable: explicit override, then config, then PATH lookup.
    pub fn tf_path(&self, cli_override: Option<&Path>) -> anyhow::Result<PathBuf> {
        if let Some(path) = cli_override.or(self.tf_path.as_deref()) {
            return Ok(path.to_path_buf());
        }
        TF_EXECUTABLES
            .iter()
            .find_map(|name| which(name).ok())
            .ok_or_else(|| {
                anyhow!("Could not find the TF executable on PATH. Set tf_path in the tfwork config.")
            })
    }

    /// Resolve the CLI variant: explicit override, then config, then executable name.
    pub fn variant(&self, cli_override: Option<CliVariant>, tf_path: &Path) -> CliVariant {
        cli_override
            .or(self.variant)
            .unwrap_or_else(|| CliVariant::from_executable(tf_path))
    }

    pub fn catalog(&self) -> Arc<dyn MessageCatalog> {
        Arc::new(OverrideCatalog::new(self.messages.clone()))
    }
}

/// Find the nearest `.tfwork.yaml` by walking up from start_dir.
pub fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    for dir in start.ancestors() {
        for name in PROJECT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "config:found project config");
                return Some(candidate);
            }
        }
    }
    None
}
