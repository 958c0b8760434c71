use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Project configuration, read from `docpack.toml` in the project root.
///
/// Every section is optional; anything left out falls back to the layout of a
/// Typst package with a Rust plugin.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub plugin: PluginConfig,
    pub docs: DocsConfig,
}

/// Source and output locations. Relative paths are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub library_dir: PathBuf,
    pub plugin_dir: PathBuf,
    pub target_dir: PathBuf,
    pub license: PathBuf,
    pub changelog: PathBuf,
    /// File name of the README inside the library dir
    pub readme: String,
    /// File name of the exclude list inside the library dir
    pub exclude_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("src"),
            plugin_dir: PathBuf::from("plugin"),
            target_dir: PathBuf::from("target"),
            license: PathBuf::from("LICENSE"),
            changelog: PathBuf::from("CHANGELOG.md"),
            readme: "README.md".to_string(),
            exclude_file: ".exclude".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub enabled: bool,
    /// Target triple passed to `cargo build --target`
    pub target: String,
    /// File name cargo produces under `target/<triple>/release`
    pub artifact: String,
    /// File name the artifact is copied to in the output dir
    pub output: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: "wasm32-unknown-unknown".to_string(),
            artifact: "board_n_pieces_plugin.wasm".to_string(),
            output: "plugin.wasm".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub example_tag: String,
    pub rendered_tag: String,
    pub directive_marker: String,
    pub renderer_directive: String,
    /// Image path template, `{n}` is replaced with the 1-based example index
    pub image_template: String,
    pub preamble: Vec<String>,
    /// Renderer program and leading arguments
    pub renderer: Vec<String>,
    pub heading_shift: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            example_tag: "example".to_string(),
            rendered_tag: "typ".to_string(),
            directive_marker: "%".to_string(),
            renderer_directive: "#".to_string(),
            image_template: "examples/example-{n}.svg".to_string(),
            preamble: vec![
                r#"#import "lib.typ": *;"#.to_string(),
                "#set page(width: auto, height: auto, margin: 0cm);".to_string(),
            ],
            renderer: vec!["typst".to_string(), "compile".to_string()],
            heading_shift: 1,
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "docpack.toml";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.expand_paths();

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(Self::FILE_NAME)
    }

    // Expand shell variables and tilde in every configured path
    fn expand_paths(&mut self) {
        let paths = &mut self.paths;
        for path in [
            &mut paths.library_dir,
            &mut paths.plugin_dir,
            &mut paths.target_dir,
            &mut paths.license,
            &mut paths.changelog,
        ] {
            if let Some(expanded) = Self::expand_path(path) {
                *path = expanded;
            }
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
