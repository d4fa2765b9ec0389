use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;
use log::debug;
use crate::model::Template;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub open_in_split_view: bool,
    #[serde(default)]
    pub use_selection_as_query: bool,
    #[serde(default)]
    pub history_enabled: bool,
    /// Command used instead of the system handler, e.g. "firefox --private-window".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    // Kept last so the tables serialize after the plain values.
    #[serde(default = "default_templates")]
    pub templates: Vec<Template>,
}

pub const PRESETS: [(&str, &str); 6] = [
    ("Google", "https://www.google.com/search?q=%s"),
    ("YouTube", "https://www.youtube.com/results?search_query=%s"),
    ("GoogleImages", "https://www.google.com/search?tbm=isch&q=%s"),
    ("Wikipedia", "https://en.wikipedia.org/wiki/%s"),
    ("OpenStreetMap", "https://www.openstreetmap.org/search?query=%s"),
    ("DuckDuckGo", "https://duckduckgo.com/?q=%s"),
];

fn default_templates() -> Vec<Template> {
    PRESETS.iter().map(|(name, url)| Template::new(name, url)).collect()
}

pub fn preset(name: &str) -> Option<Template> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(n, url)| Template::new(n, url))
}

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(n, _)| *n).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_in_split_view: false,
            use_selection_as_query: false,
            history_enabled: false,
            browser: None,
            templates: default_templates(),
        }
    }
}

/// Where the configuration lives between runs.
pub trait ConfigStore {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Config>>;
    fn save(&mut self, config: &Config) -> Result<()>;
}

pub struct TomlStore {
    path: PathBuf,
}

impl TomlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        let proj_dirs = ProjectDirs::from("org", "runner", "websearch-runner");
        let path = if let Some(dirs) = &proj_dirs {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("config.toml")
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlStore {
    fn load(&self) -> Result<Option<Config>> {
        if !self.path.exists() {
            debug!("No config at {:?}, using defaults", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(config))
    }

    fn save(&mut self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!("Saved config to {:?}", self.path);
        Ok(())
    }
}

pub fn load_config(store: &dyn ConfigStore) -> Result<Config> {
    Ok(store.load()?.unwrap_or_default())
}
