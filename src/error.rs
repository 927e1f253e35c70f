//! Error types for the LZ78 codec.

use std::io;
use thiserror::Error;

use crate::utils::index_encoding::IndexError;

/// Errors raised while decoding a compressed stream or moving bytes through
/// the stream and batch interfaces. Encoding itself never fails.
#[derive(Debug, Error)]
pub enum LZ78Error {
    /// An item refers to a phrase that was not defined yet. An index that
    /// does not fit into a machine word is reported with 'index' set to
    /// usize::MAX.
    #[error(
        "corrupt stream at byte {offset}: index {index} is not below the \
         phrase table length {table_len}"
    )]
    CorruptStream {
        index: usize,
        table_len: usize,
        offset: usize,
    },

    /// The stream ended in the middle of an item.
    #[error("truncated stream: incomplete item starting at byte {offset}")]
    TruncatedStream { offset: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LZ78Error {
    /// Attach the position of the item that starts at 'offset' to an error
    /// from the index codec. 'table_len' is the size of the phrase table when
    /// the item was read.
    pub fn from_index(err: IndexError, offset: usize, table_len: usize) -> Self {
        match err {
            IndexError::Truncated => LZ78Error::TruncatedStream { offset },
            IndexError::Overflow => LZ78Error::CorruptStream {
                index: usize::MAX,
                table_len,
                offset,
            },
        }
    }

    /// Returns true if the error describes malformed input rather than a
    /// failure of the underlying reader or writer.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, LZ78Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, LZ78Error>;
