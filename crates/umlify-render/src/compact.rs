//! Compact text encoding of a document
//!
//! A document is made transport-safe in three steps: tab characters are
//! removed, the remaining bytes are compressed at maximum level, and the
//! compressed stream is written out six bits at a time using the alphabet
//! `0-9`, `A-Z`, `a-z`, `-`, `_`.
//!
//! Every three bytes `b1 b2 b3` become four symbols:
//!
//! ```text
//! c1 = b1 >> 2
//! c2 = ((b1 & 0x3) << 4) | (b2 >> 4)
//! c3 = ((b2 & 0xF) << 2) | (b3 >> 6)
//! c4 = b3 & 0x3F
//! ```
//!
//! A trailing group of one or two bytes is completed with zero bytes, so the
//! output length is always a multiple of four. This is the base64 bit layout
//! with a different alphabet and zero symbols in place of `=` padding.

use std::io::Write;
use std::sync::OnceLock;

use base64::alphabet::Alphabet;
use base64::engine::general_purpose::NO_PAD;
use base64::engine::GeneralPurpose;
use base64::Engine;
use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;

use crate::buffer_pool::BufferPool;
use crate::error::Result;

/// Output symbols, indexed by six-bit value.
pub const SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

const ALPHABET: Alphabet = match Alphabet::new(SYMBOLS) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("symbol table must hold 64 distinct printable characters"),
};

pub(crate) const ENGINE: GeneralPurpose = GeneralPurpose::new(&ALPHABET, NO_PAD);

/// Symbol for the zero value, used to complete a short trailing group.
const ZERO_SYMBOL: char = '0';

/// Container around the compressed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Bare DEFLATE blocks.
    #[default]
    Raw,
    /// DEFLATE wrapped in a zlib header and Adler-32 trailer, as accepted by
    /// older diagram servers.
    Zlib,
}

/// Turns documents into compact strings, reusing scratch buffers across calls.
pub struct CompactEncoder {
    framing: Framing,
    pool: BufferPool,
}

impl CompactEncoder {
    pub fn new(framing: Framing) -> Self {
        Self {
            framing,
            pool: BufferPool::default(),
        }
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Encode one document. The same input always yields the same output.
    pub fn encode(&self, document: &str) -> Result<String> {
        let mut stripped = self.pool.acquire();
        stripped.extend(document.bytes().filter(|&b| b != b'\t'));

        let mut compressed = self.pool.acquire();
        match self.framing {
            Framing::Raw => {
                let mut encoder = DeflateEncoder::new(&mut *compressed, Compression::best());
                encoder.write_all(&stripped)?;
                encoder.finish()?;
            }
            Framing::Zlib => {
                let mut encoder = ZlibEncoder::new(&mut *compressed, Compression::best());
                encoder.write_all(&stripped)?;
                encoder.finish()?;
            }
        }

        let encoded = encode_symbols(&compressed);
        tracing::trace!(
            input = document.len(),
            compressed = compressed.len(),
            output = encoded.len(),
            "encoded document"
        );
        Ok(encoded)
    }
}

impl Default for CompactEncoder {
    fn default() -> Self {
        Self::new(Framing::default())
    }
}

/// Map raw bytes onto the symbol alphabet, four symbols per three bytes.
pub fn encode_symbols(bytes: &[u8]) -> String {
    let mut out = ENGINE.encode(bytes);
    while out.len() % 4 != 0 {
        out.push(ZERO_SYMBOL);
    }
    out
}

/// Encode with raw framing through a process-wide encoder.
pub fn encode(document: &str) -> Result<String> {
    static SHARED: OnceLock<CompactEncoder> = OnceLock::new();
    SHARED.get_or_init(CompactEncoder::default).encode(document)
}
