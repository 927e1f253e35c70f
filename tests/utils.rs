use lz78::lz::decoder::PhraseTable;
use lz78::utils::index_encoding::{decode, encode, IndexAccumulator};
use lz78::utils::signatures::has_extension;

#[test]
fn test_index_encoding_round_trip() {
    fn check(val: usize) {
        let mut stream = Vec::new();
        let written = encode(val, &mut stream);
        assert_eq!(written, stream.len());

        // Only the last byte carries the terminator bit.
        let (last, rest) = stream.split_last().unwrap();
        assert!(last & 0x80 != 0);
        assert!(rest.iter().all(|b| b & 0x80 == 0));

        assert_eq!(decode(&stream), Ok((written, val)));
    }

    for val in 0..1000 {
        check(val);
    }
    for shift in 7..usize::BITS {
        check((1 << shift) - 1);
        check(1 << shift);
        check((1 << shift) + 1);
    }
    check(usize::MAX);
}

#[test]
fn test_index_accumulator() {
    let mut stream = Vec::new();
    let _ = encode(5, &mut stream);
    let _ = encode(1 << 20, &mut stream);
    let _ = encode(0, &mut stream);

    let mut acc = IndexAccumulator::new();
    let mut values = Vec::new();
    for byte in stream {
        if let Some(val) = acc.push(byte).unwrap() {
            values.push(val);
            assert!(acc.is_empty());
        } else {
            assert!(!acc.is_empty());
        }
    }
    assert_eq!(values, [5, 1 << 20, 0]);
}

#[test]
fn test_phrase_table() {
    let mut table = PhraseTable::new();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0), Some(&[][..]));

    assert_eq!(table.expand(0, b'a'), Some(&b"a"[..]));
    assert_eq!(table.expand(1, b'b'), Some(&b"ab"[..]));
    assert_eq!(table.expand(2, b'c'), Some(&b"abc"[..]));
    assert_eq!(table.expand(0, b'a'), Some(&b"a"[..]));
    assert_eq!(table.len(), 5);
    assert_eq!(table.get(3), Some(&b"abc"[..]));

    // Undefined phrases are rejected, and the table is unchanged.
    assert_eq!(table.expand(5, b'x'), None);
    assert_eq!(table.len(), 5);
    assert_eq!(table.get(5), None);
}

#[test]
fn test_file_extension() {
    assert!(has_extension("data.txt.lz78"));
    assert!(!has_extension("data.txt"));
    assert!(!has_extension(".lz78"));
}
