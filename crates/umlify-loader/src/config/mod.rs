//! Tool configuration (`umlify.toml`)
//!
//! Lookup order: an explicit path, then `umlify.toml` in the working
//! directory, then built-in defaults. Every table and key is optional.

pub mod filter;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result, io_error};

pub use filter::PackageFilter;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "umlify.toml";
pub const DEFAULT_OUTPUT: &str = "file.puml";
pub const DEFAULT_SERVER_URL: &str = "https://www.plantuml.com/plantuml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub server: ServerConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where `render` writes the document.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub format: ImageFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            format: ImageFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Link that asks the diagram server to draw an encoded document.
    pub fn diagram_url(&self, compact: &str) -> String {
        format!("{}/{}/{}", self.url.trim_end_matches('/'), self.format, compact)
    }
}

/// Output requested from the diagram server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
    Txt,
    Uml,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
            ImageFormat::Txt => "txt",
            ImageFormat::Uml => "uml",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Glob patterns matched against package paths.
    pub exclude: Vec<String>,
}

impl FilterConfig {
    pub fn package_filter(&self) -> Result<PackageFilter> {
        PackageFilter::new(&self.exclude)
    }
}

impl Config {
    /// Resolve configuration using the lookup order above.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            tracing::info!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            tracing::info!(path = %local.display(), "loading configuration");
            return Self::from_file(local);
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(io_error(path))?;
        toml::from_str(&content).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}
