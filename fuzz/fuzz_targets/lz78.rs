#![no_main]

use libfuzzer_sys::fuzz_target;
use lz78::lz::{LZ78Decoder, LZ78Encoder};
use lz78::{Decoder, Encoder};

fuzz_target!(|data: &[u8]| {
    let mut compressed: Vec<u8> = Vec::new();

    {
        let mut encoder = LZ78Encoder::new(data, &mut compressed);
        let written = encoder.encode();
        assert_eq!(written, compressed.len());
    }

    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = LZ78Decoder::new(&compressed, &mut decompressed);
        let (consumed, written) = decoder.decode().unwrap();
        assert_eq!(consumed, compressed.len());
        assert_eq!(written, decompressed.len());
    }
    assert_eq!(decompressed, data);
});
