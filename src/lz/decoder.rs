//! The LZ78 decoder. Each item of the stream defines a new phrase as a
//! previously defined phrase followed by one literal byte, and the phrase is
//! also the next chunk of the decompressed output.

use std::ops::Range;

use crate::error::{LZ78Error, Result};
use crate::utils::index_encoding;
use crate::Decoder;

/// The phrases that the decoder has rebuilt so far. Phrase zero is the empty
/// phrase. The bytes of all phrases are kept in one buffer.
#[derive(Debug)]
pub struct PhraseTable {
    /// The concatenation of all of the phrases.
    data: Vec<u8>,
    /// The location of each phrase in 'data'.
    spans: Vec<Range<usize>>,
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseTable {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            spans: vec![0..0],
        }
    }

    /// Returns the number of phrases, including the empty phrase.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// The table always holds the empty phrase.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the phrase with the code 'index'.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let span = self.spans.get(index)?;
        Some(&self.data[span.clone()])
    }

    /// Append the phrase 'index' followed by 'symbol' to the table and return
    /// it, or None if 'index' is not defined yet.
    pub fn expand(&mut self, index: usize, symbol: u8) -> Option<&[u8]> {
        let prefix = self.spans.get(index)?.clone();
        let start = self.data.len();
        self.data.extend_from_within(prefix);
        self.data.push(symbol);
        self.spans.push(start..self.data.len());
        Some(&self.data[start..])
    }
}

/// An LZ78 Decoder.
pub struct LZ78Decoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// Points to the current byte to process.
    cursor: usize,
}

impl<'a> LZ78Decoder<'a> {
    /// Decode a single item from the input. Returns the index and the literal
    /// and advances the cursor.
    fn decode_item(&mut self, table_len: usize) -> Result<(usize, u8)> {
        let start = self.cursor;
        let (read, index) = index_encoding::decode(&self.input[start..])
            .map_err(|err| LZ78Error::from_index(err, start, table_len))?;
        let symbol = *self
            .input
            .get(start + read)
            .ok_or(LZ78Error::TruncatedStream { offset: start })?;
        self.cursor = start + read + 1;
        Ok((index, symbol))
    }

    /// Decode the input parameter. Returns the number of bytes consumed and the
    /// number of bytes written if the operation succeeded.
    fn decode_impl(&mut self) -> Result<(usize, usize)> {
        self.cursor = 0;
        let mut table = PhraseTable::new();
        let mut written = 0;

        while self.cursor < self.input.len() {
            let start = self.cursor;
            let table_len = table.len();
            let (index, symbol) = self.decode_item(table_len)?;
            let phrase = table.expand(index, symbol).ok_or(
                LZ78Error::CorruptStream {
                    index,
                    table_len,
                    offset: start,
                },
            )?;
            self.output.extend_from_slice(phrase);
            written += phrase.len();
        }

        log::debug!(
            "Decoded {} bytes into {} bytes using {} phrases",
            self.cursor,
            written,
            table.len() - 1
        );
        Ok((self.cursor, written))
    }
}

impl<'a> Decoder<'a> for LZ78Decoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        Self {
            input,
            output,
            cursor: 0,
        }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        self.decode_impl()
    }
}
