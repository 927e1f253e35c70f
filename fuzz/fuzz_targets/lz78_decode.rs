#![no_main]

use libfuzzer_sys::fuzz_target;
use lz78::lz::LZ78Decoder;
use lz78::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = LZ78Decoder::new(data, &mut decompressed);
        let _ = decoder.decode();
    }
});
