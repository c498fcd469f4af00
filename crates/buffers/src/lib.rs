//! `typepack-buffers` - byte sinks and byte cursors shared by the typepack codecs.
//!
//! [`Writer`] is the append-only sink encoders write into; [`Reader`] is the
//! cursor decoders advance. Both use big-endian byte order for fixed-width
//! numbers.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Errors raised by bounds-checked [`Reader`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
