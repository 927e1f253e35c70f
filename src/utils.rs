//! A collection of utilities for handling indices and file names.

/// File naming conventions used by the command line tool and the batch
/// driver.
pub mod signatures {
    /// The extension that the cli appends to compressed files.
    pub const FILE_EXTENSION: &str = ".lz78";
    /// The suffix that the batch driver appends to the file stem of
    /// decompressed files.
    pub const DECOMPRESSED_SUFFIX: &str = "Decompressed";

    /// Return True if 'path' names a compressed file.
    pub fn has_extension(path: &str) -> bool {
        path.ends_with(FILE_EXTENSION) && path.len() > FILE_EXTENSION.len()
    }
}

/// Implements the self-delimiting encoding of dictionary indices.
/// The number is written in base 128, most significant digit first, one
/// digit per byte. All digits except the last have the high bit cleared, and
/// the last digit has the high bit set. Zero is written as [0x80], and the
/// number 300 is serialized as [0x02, 0xac].
pub mod index_encoding {
    use thiserror::Error;

    /// The high bit marks the last byte of an index.
    pub const TERMINATOR: u8 = 0x80;
    /// The number of payload bits in each byte.
    const DIGIT_BITS: u32 = 7;
    const DIGIT_MASK: u8 = 0x7f;
    /// Enough digits for any usize.
    const MAX_DIGITS: usize = (usize::BITS as usize + 6) / 7;

    #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
    pub enum IndexError {
        /// The input ended before the terminating byte.
        #[error("index is missing its terminating byte")]
        Truncated,
        /// The accumulated value does not fit in a usize.
        #[error("index does not fit in a machine word")]
        Overflow,
    }

    /// Encode the number 'num' into the stream and return the number of bytes
    /// written.
    pub fn encode(num: usize, stream: &mut Vec<u8>) -> usize {
        let mut digits = [0u8; MAX_DIGITS];
        let mut val = num;
        let mut len = 0;
        // Collect the digits from the least significant one.
        loop {
            digits[len] = (val as u8) & DIGIT_MASK;
            len += 1;
            val >>= DIGIT_BITS;
            if val == 0 {
                break;
            }
        }
        digits[0] |= TERMINATOR;
        stream.extend(digits[..len].iter().rev());
        len
    }

    /// Returns the number of bytes needed to encode 'num'.
    pub fn encoded_len(num: usize) -> usize {
        let bits = usize::BITS - num.leading_zeros();
        (bits.max(1) as usize + 6) / 7
    }

    /// Accumulates the digits of a single index, one byte at a time. This is
    /// used by readers that can't look ahead in the input.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct IndexAccumulator {
        value: usize,
        digits: usize,
    }

    impl IndexAccumulator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Consume the next byte of the index. Returns the decoded number
        /// after the terminating byte, and resets the accumulator.
        pub fn push(&mut self, byte: u8) -> Result<Option<usize>, IndexError> {
            if self.value > (usize::MAX >> DIGIT_BITS) {
                return Err(IndexError::Overflow);
            }
            self.value = (self.value << DIGIT_BITS) | (byte & DIGIT_MASK) as usize;
            self.digits += 1;

            if byte & TERMINATOR == 0 {
                return Ok(None);
            }
            let val = self.value;
            *self = Self::default();
            Ok(Some(val))
        }

        /// Returns true if no digits of the current index were consumed.
        pub fn is_empty(&self) -> bool {
            self.digits == 0
        }
    }

    /// Decode a number from the stream and return the number of bytes read
    /// and the value that was loaded.
    pub fn decode(stream: &[u8]) -> Result<(usize, usize), IndexError> {
        let mut acc = IndexAccumulator::new();
        for (i, &byte) in stream.iter().enumerate() {
            if let Some(val) = acc.push(byte)? {
                return Ok((i + 1, val));
            }
        }
        Err(IndexError::Truncated)
    }

    #[test]
    fn test_index_encoding_small() {
        let mut stream = Vec::new();
        assert_eq!(encode(0, &mut stream), 1);
        assert_eq!(encode(1, &mut stream), 1);
        assert_eq!(encode(127, &mut stream), 1);
        assert_eq!(encode(128, &mut stream), 2);
        assert_eq!(encode(300, &mut stream), 2);
        assert_eq!(stream, [0x80, 0x81, 0xff, 0x01, 0x80, 0x02, 0xac]);
    }

    #[test]
    fn test_index_encoding_len() {
        for val in [0, 1, 127, 128, 16383, 16384, 1 << 21, usize::MAX] {
            let mut stream = Vec::new();
            let written = encode(val, &mut stream);
            assert_eq!(written, encoded_len(val));
            assert_eq!(stream.len(), written);
        }
    }

    #[test]
    fn test_index_decoding_errors() {
        assert_eq!(decode(&[]), Err(IndexError::Truncated));
        assert_eq!(decode(&[0x01, 0x02]), Err(IndexError::Truncated));

        let too_long = [0x7f; MAX_DIGITS + 1];
        assert_eq!(decode(&too_long), Err(IndexError::Overflow));
    }

    #[test]
    fn test_index_decoding_stops_at_terminator() {
        let stream = [0x01, 0x80, 0x61, 0x85];
        assert_eq!(decode(&stream), Ok((2, 128)));
        assert_eq!(decode(&stream[3..]), Ok((1, 5)));
    }
}
