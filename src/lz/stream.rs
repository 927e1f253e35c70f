//! Compress and decompress between readers and writers, without holding the
//! whole input in memory.

use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use crate::error::{LZ78Error, Result};
use crate::lz::decoder::PhraseTable;
use crate::lz::encoder::EncoderState;
use crate::utils::index_encoding::IndexAccumulator;

/// The size of the chunks that the encoder reads from its input.
const CHUNK_SIZE: usize = 1 << 16;

/// The number of bytes consumed and produced by a stream operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    pub read: usize,
    pub written: usize,
}

impl StreamStats {
    /// Returns the ratio between the larger uncompressed side and the
    /// compressed side, or None for empty streams.
    pub fn ratio(&self, compressing: bool) -> Option<f64> {
        let (from, to) = if compressing {
            (self.read, self.written)
        } else {
            (self.written, self.read)
        };
        if to == 0 {
            return None;
        }
        Some(from as f64 / to as f64)
    }
}

/// Compress everything in 'input' into 'output'.
pub fn compress_stream<R: Read, W: Write>(
    input: R,
    output: W,
) -> Result<StreamStats> {
    let mut reader = input;
    let mut writer = BufWriter::new(output);
    let mut state = EncoderState::new();
    let mut chunk = vec![0; CHUNK_SIZE];
    let mut encoded = Vec::new();
    let mut stats = StreamStats::default();

    loop {
        let len = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        stats.read += len;
        stats.written += state.extend(&chunk[..len], &mut encoded);
        writer.write_all(&encoded)?;
        encoded.clear();
    }

    stats.written += state.finish(&mut encoded);
    writer.write_all(&encoded)?;
    writer.flush()?;
    log::debug!(
        "Compressed {} bytes into {} bytes",
        stats.read,
        stats.written
    );
    Ok(stats)
}

/// Reads single bytes and counts them.
struct ByteReader<R: Read> {
    inner: BufReader<R>,
    pos: usize,
}

impl<R: Read> ByteReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            pos: 0,
        }
    }

    /// Returns the next byte, or None at the end of the stream.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(buf[0]));
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Decompress everything in 'input' into 'output'. Phrases are written as
/// soon as they are decoded, so on error 'output' may hold a prefix of the
/// original data.
pub fn decompress_stream<R: Read, W: Write>(
    input: R,
    output: W,
) -> Result<StreamStats> {
    let mut reader = ByteReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut table = PhraseTable::new();
    let mut written = 0;

    loop {
        let start = reader.pos;
        let table_len = table.len();
        let mut acc = IndexAccumulator::new();
        let index = loop {
            let Some(byte) = reader.next_byte()? else {
                if acc.is_empty() {
                    writer.flush()?;
                    log::debug!("Decompressed {} bytes into {}", start, written);
                    return Ok(StreamStats {
                        read: start,
                        written,
                    });
                }
                return Err(LZ78Error::TruncatedStream { offset: start });
            };
            if let Some(index) = acc
                .push(byte)
                .map_err(|err| LZ78Error::from_index(err, start, table_len))?
            {
                break index;
            }
        };

        let symbol = reader
            .next_byte()?
            .ok_or(LZ78Error::TruncatedStream { offset: start })?;
        let phrase = table.expand(index, symbol).ok_or(
            LZ78Error::CorruptStream {
                index,
                table_len,
                offset: start,
            },
        )?;
        writer.write_all(phrase)?;
        written += phrase.len();
    }
}
