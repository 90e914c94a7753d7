//! Umlify Render — diagram document writer and compact encoder

pub mod buffer_pool;
pub mod compact;
pub mod error;
pub mod plantuml;


pub use buffer_pool::{BufferPool, PooledBuffer};
pub use compact::{CompactEncoder, Framing, encode, encode_symbols};
pub use error::{RenderError, Result};
pub use plantuml::{END_MARKER, START_MARKER, edge_line, kind_marker, render};
