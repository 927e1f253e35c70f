//! The LZ78 encoder and decoder, for buffers and for streams.

pub mod decoder;
pub mod encoder;
pub mod stream;
pub use decoder::LZ78Decoder;
pub use encoder::LZ78Encoder;
pub use stream::{compress_stream, decompress_stream, StreamStats};
