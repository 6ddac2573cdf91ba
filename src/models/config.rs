//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name searched in the working and home directories.
const CONFIG_NAME: &str = "plexbot";

/// Extensions tried for each search directory, in priority order.
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Default bound on a single hook command, in seconds.
const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 600;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plex library locations.
    pub plex: PlexConfig,
    /// Commands run before each file is moved.
    pub preprocess: Vec<String>,
    /// Commands run after each file is moved.
    pub postprocess: Vec<String>,
    /// Commands run once after every file has been processed.
    pub postprocessall: Vec<String>,
    /// Hook execution policy.
    pub hooks: HooksConfig,
    /// File the configuration was read from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Plex library configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexConfig {
    /// Root of the TV library.
    pub tvpath: Option<PathBuf>,
    /// Where files with unrecognised names are copied.
    pub errorpath: Option<PathBuf>,
}

/// Hook execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Seconds a hook may run before it is killed. `0` waits forever.
    pub timeout_secs: u64,
    /// Stop the remaining hooks of a file after the first failing one.
    pub abort_on_failure: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HOOK_TIMEOUT_SECS,
            abort_on_failure: false,
        }
    }
}

/// Pipeline stage a hook command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Preprocess,
    Postprocess,
    PostprocessAll,
}

impl HookStage {
    /// Configuration key holding the stage's commands.
    pub fn key(self) -> &'static str {
        match self {
            HookStage::Preprocess => "preprocess",
            HookStage::Postprocess => "postprocess",
            HookStage::PostprocessAll => "postprocessall",
        }
    }
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Config {
    /// Hook templates configured for a stage.
    pub fn hook_templates(&self, stage: HookStage) -> &[String] {
        match stage {
            HookStage::Preprocess => &self.preprocess,
            HookStage::Postprocess => &self.postprocess,
            HookStage::PostprocessAll => &self.postprocessall,
        }
    }

    /// Flat key lookup (`plex.tvpath`, `hooks.timeout_secs`, ...).
    ///
    /// List-valued keys are joined with newlines.
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "plex.tvpath" => self.plex.tvpath.as_ref().map(|p| p.display().to_string()),
            "plex.errorpath" => self.plex.errorpath.as_ref().map(|p| p.display().to_string()),
            "hooks.timeout_secs" => Some(self.hooks.timeout_secs.to_string()),
            "hooks.abort_on_failure" => Some(self.hooks.abort_on_failure.to_string()),
            "preprocess" | "postprocess" | "postprocessall" => {
                let stage = match key {
                    "preprocess" => HookStage::Preprocess,
                    "postprocess" => HookStage::Postprocess,
                    _ => HookStage::PostprocessAll,
                };
                let items = self.hook_templates(stage);
                (!items.is_empty()).then(|| items.join("\n"))
            }
            _ => None,
        }
    }

    /// Apply `PLEX_TVPATH` / `PLEX_ERRORPATH` style overrides.
    pub fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tvpath) = var("PLEX_TVPATH").filter(|v| !v.trim().is_empty()) {
            self.plex.tvpath = Some(PathBuf::from(tvpath));
        }
        if let Some(errorpath) = var("PLEX_ERRORPATH").filter(|v| !v.trim().is_empty()) {
            self.plex.errorpath = Some(PathBuf::from(errorpath));
        }
        self
    }
}

/// Candidate config files, in priority order.
fn search_paths() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::new()];
    if let Some(home) = dirs::home_dir() {
        roots.push(home);
    }

    let mut paths: Vec<PathBuf> = roots
        .iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}.{}", CONFIG_NAME, ext)))
        })
        .collect();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_NAME).join("config.toml"));
    }

    paths
}

/// Parse a config file, choosing the format from its extension.
///
/// `.json` is JSON, `.yaml`/`.yml` is YAML, anything else is TOML.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::InvalidConfig {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut config: Config = match ext.as_str() {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    config.source = Some(path.to_path_buf());

    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the search paths are tried and
/// defaults are used when none exists. Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => read_config_file(path)?,
        None => match search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => read_config_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    Ok(config.with_overrides(|name| std::env::var(name).ok()))
}

/// Sample TOML configuration printed by `plexbot defaults`.
pub const SAMPLE_TOML: &str = r#"# Save as plexbot.toml. plexbot.json and plexbot.yaml with the same keys also work.
[plex]
tvpath = "/media/tv"
errorpath = "/media/errors"

# Token replacement for preprocess, postprocess and postprocessall sections:
# {oldfilepath}       - full path of the file in the source directory
# {newfilepath}       - full path of the file in the TV library
# {showname}          - parsed show name
# {showseasonnumber}  - season number (or aired year)
# {showepisodenumber} - episode number (or aired year-month-day)
# {tvpath} {errorpath} {hash}
#
# Commands are split on whitespace; arguments containing spaces are not supported.
# postprocessall only sees {tvpath}, {errorpath} and {hash}.

# preprocess = ["somecommand {oldfilepath}"]
postprocess = ["qbittorrentremove -file {oldfilepath}"]
# postprocessall = ["someothercommand {tvpath}"]

[hooks]
# Seconds before a hook is killed (0 waits forever).
timeout_secs = 600
# Skip the remaining hooks of a file once one fails.
abort_on_failure = false
"#;

/// Sample configuration as a value, used for the JSON form of `plexbot defaults`.
pub fn sample_config() -> Config {
    Config {
        plex: PlexConfig {
            tvpath: Some(PathBuf::from("/media/tv")),
            errorpath: Some(PathBuf::from("/media/errors")),
        },
        postprocess: vec!["qbittorrentremove -file {oldfilepath}".to_string()],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_toml_parses() {
        let config: Config = toml::from_str(SAMPLE_TOML).unwrap();
        assert_eq!(config.plex.tvpath, Some(PathBuf::from("/media/tv")));
        assert_eq!(config.postprocess.len(), 1);
        assert!(config.preprocess.is_empty());
        assert_eq!(config.hooks.timeout_secs, 600);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.plex.tvpath.is_none());
        assert!(!config.hooks.abort_on_failure);
        assert_eq!(config.hooks.timeout_secs, DEFAULT_HOOK_TIMEOUT_SECS);
    }

    #[test]
    fn test_lookup_flat_keys() {
        let config = sample_config();
        assert_eq!(config.lookup("plex.tvpath").as_deref(), Some("/media/tv"));
        assert_eq!(
            config.lookup("postprocess").as_deref(),
            Some("qbittorrentremove -file {oldfilepath}")
        );
        assert_eq!(config.lookup("preprocess"), None);
        assert_eq!(config.lookup("unknown.key"), None);
    }

    #[test]
    fn test_search_paths_include_yaml() {
        let paths = search_paths();
        assert_eq!(paths[0], PathBuf::from("plexbot.toml"));
        assert!(paths.contains(&PathBuf::from("plexbot.yaml")));
        assert!(paths.contains(&PathBuf::from("plexbot.yml")));
    }

    #[test]
    fn test_overrides() {
        let config = sample_config().with_overrides(|name| match name {
            "PLEX_TVPATH" => Some("/mnt/tv".to_string()),
            "PLEX_ERRORPATH" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.plex.tvpath, Some(PathBuf::from("/mnt/tv")));
        assert_eq!(config.plex.errorpath, Some(PathBuf::from("/media/errors")));
    }
}
