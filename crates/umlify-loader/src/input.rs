//! Declaration set files
//!
//! Each input file holds one declaration set, as JSON or YAML. A directory
//! stands for every supported file directly inside it, in file name order.

use std::fs;
use std::path::{Path, PathBuf};

use umlify_core::DeclarationSet;

use crate::error::{LoadError, Result, io_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Determine the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }

    pub fn parse(self, path: &Path, content: &str) -> Result<DeclarationSet> {
        match self {
            InputFormat::Json => serde_json::from_str(content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            }),
            InputFormat::Yaml => serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Read one declaration set file.
pub fn load_file(path: &Path) -> Result<DeclarationSet> {
    let format = InputFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    let set = format.parse(path, &content)?;
    tracing::debug!(
        path = %path.display(),
        package = %set.package,
        types = set.types.len(),
        constants = set.constants.len(),
        "loaded declaration set"
    );
    Ok(set)
}

/// Supported files directly inside `dir`, sorted by file name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && InputFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every input, expanding directories. Order follows the arguments,
/// then file names within a directory.
pub fn load_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<DeclarationSet>> {
    let mut sets = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            for file in discover(input)? {
                sets.push(load_file(&file)?);
            }
        } else {
            sets.push(load_file(input)?);
        }
    }
    tracing::info!(sets = sets.len(), "declaration sets loaded");
    Ok(sets)
}
