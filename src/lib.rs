//! An LZ78 dictionary compressor. The encoder grows a trie of phrases while
//! scanning the input and emits one (code, literal) item per new phrase. The
//! decoder rebuilds the same phrases from the item stream alone.

pub mod batch;
pub mod error;
pub mod lz;
pub mod trie;
pub mod utils;

pub use error::{LZ78Error, Result};

/// A trait that defines the interface for encoding buffers.
pub trait Encoder<'a> {
    /// Creates a new Encoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self;

    /// Encode the whole input buffer and return the number of bytes that were
    /// written into the output stream.
    #[must_use]
    fn encode(&mut self) -> usize;
}

/// A trait that defines the interface for decoding buffers.
pub trait Decoder<'a> {
    /// Creates a new Decoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self;

    /// Try to decode the buffer 'input', and return the number of input bytes
    /// that were consumed followed by the number of bytes written.
    fn decode(&mut self) -> Result<(usize, usize)>;
}

/// Compress 'input' into a fresh buffer.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    let _ = lz::LZ78Encoder::new(input, &mut output).encode();
    output
}

/// Decompress 'input' into a fresh buffer. Fails on corrupt or truncated
/// streams.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    lz::LZ78Decoder::new(input, &mut output).decode()?;
    Ok(output)
}
