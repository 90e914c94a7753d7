//! Errors raised while writing or encoding a document

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),

    #[error("document formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
