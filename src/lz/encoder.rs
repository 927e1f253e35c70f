//! The LZ78 encoder. Every time the current phrase can't be extended with the
//! next input byte, a new phrase is created and the item (code of the current
//! phrase, byte) is written to the output.

use crate::trie::{Code, Trie, ROOT};
use crate::utils::index_encoding;
use crate::Encoder;

/// The definition of a dictionary phrase: the phrase 'parent' followed by
/// 'literal'.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub parent: Code,
    pub literal: u8,
}

impl Entry {
    /// Serialize the entry into 'output' and return the number of bytes
    /// written.
    pub fn write(&self, output: &mut Vec<u8>) -> usize {
        let written = index_encoding::encode(self.parent, output);
        output.push(self.literal);
        written + 1
    }
}

/// The state of the encoder between input bytes. This allows the input to be
/// fed in chunks.
#[derive(Debug)]
pub struct EncoderState {
    /// The phrase dictionary.
    trie: Trie,
    /// Entry k-1 defines the phrase with code k.
    table: Vec<Entry>,
    /// The longest phrase that matches the unencoded input.
    current: Code,
    /// The code of the next phrase.
    next_code: Code,
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderState {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            table: Vec::new(),
            current: ROOT,
            next_code: 1,
        }
    }

    /// Process a single input byte and return the number of bytes written.
    pub fn push(&mut self, byte: u8, output: &mut Vec<u8>) -> usize {
        if let Some(child) = self.trie.lookup_child(self.current, byte) {
            self.current = child;
            return 0;
        }

        let entry = Entry {
            parent: self.current,
            literal: byte,
        };
        self.table.push(entry);
        let written = entry.write(output);
        self.trie.insert_child(self.current, byte, self.next_code);
        self.next_code += 1;
        self.current = ROOT;
        written
    }

    /// Process all of the bytes in 'input' and return the number of bytes
    /// written.
    pub fn extend(&mut self, input: &[u8], output: &mut Vec<u8>) -> usize {
        input.iter().map(|&byte| self.push(byte, output)).sum()
    }

    /// Flush the pending phrase, and return the number of bytes written.
    /// If the input ended in the middle of a known phrase, the definition of
    /// that phrase is sent again, so the decoder always handles one item at a
    /// time in the same way.
    pub fn finish(&mut self, output: &mut Vec<u8>) -> usize {
        if self.current == ROOT {
            return 0;
        }
        let entry = self.table[self.current - 1];
        self.current = ROOT;
        entry.write(output)
    }

    /// Returns the dictionary entries, in code order.
    pub fn entries(&self) -> &[Entry] {
        &self.table
    }

    /// Returns the code that the next new phrase will receive.
    pub fn next_code(&self) -> Code {
        self.next_code
    }
}

/// An LZ78 Encoder.
pub struct LZ78Encoder<'a> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> LZ78Encoder<'a> {
    fn encode_impl(&mut self) -> usize {
        let mut state = EncoderState::new();
        let mut written = state.extend(self.input, self.output);
        written += state.finish(self.output);
        log::debug!(
            "Encoded {} bytes into {} bytes using {} phrases",
            self.input.len(),
            written,
            state.entries().len()
        );
        written
    }
}

impl<'a> Encoder<'a> for LZ78Encoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        Self { input, output }
    }

    fn encode(&mut self) -> usize {
        self.encode_impl()
    }
}
