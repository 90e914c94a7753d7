//! Error types for model assembly

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A worker panicked while holding the accumulation lock.
    #[error("model accumulation lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, CoreError>;
