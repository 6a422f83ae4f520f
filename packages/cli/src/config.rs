use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tosc_lexml::DEFAULT_COLOR;

pub const DEFAULT_CONFIG_NAME: &str = "tosc.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory relative tool paths are resolved against
    #[serde(default = "default_project_root")]
    pub project_root: String,

    /// Color for controls added without one
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Config {
    /// Load `explicit` if given, else `tosc.config.json` from `cwd` when present
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let implicit = cwd.join(DEFAULT_CONFIG_NAME);
                if !implicit.exists() {
                    return Ok(Config::default());
                }
                implicit
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("cannot read config {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", config_path.display()))?;

        tracing::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Absolute project root
    pub fn get_project_root(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.project_root)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            default_color: default_color(),
        }
    }
}
