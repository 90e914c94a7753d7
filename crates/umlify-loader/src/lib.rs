//! Umlify Loader — declaration set files and tool configuration

pub mod config;
pub mod error;
pub mod input;


pub use config::{CONFIG_FILE, Config, FilterConfig, ImageFormat, OutputConfig, PackageFilter, ServerConfig};
pub use error::{LoadError, Result};
pub use input::{InputFormat, discover, load_file, load_inputs};
