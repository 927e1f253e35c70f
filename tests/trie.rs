use lz78::trie::{Trie, ROOT};

#[test]
fn test_trie_insert_and_lookup() {
    let mut trie = Trie::new();
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.lookup_child(ROOT, b'a'), None);

    let a = trie.insert_child(ROOT, b'a', 1);
    let b = trie.insert_child(ROOT, b'b', 2);
    let ab = trie.insert_child(a, b'b', 3);
    assert_eq!((a, b, ab), (1, 2, 3));
    assert_eq!(trie.len(), 4);

    assert_eq!(trie.lookup_child(ROOT, b'a'), Some(a));
    assert_eq!(trie.lookup_child(ROOT, b'b'), Some(b));
    assert_eq!(trie.lookup_child(a, b'b'), Some(ab));
    assert_eq!(trie.lookup_child(b, b'b'), None);
    assert_eq!(trie.lookup_child(ab, b'a'), None);
}

#[test]
fn test_trie_all_byte_values() {
    let mut trie = Trie::new();
    for byte in 0..=255u8 {
        let code = trie.len();
        trie.insert_child(ROOT, byte, code);
    }
    for byte in 0..=255u8 {
        assert_eq!(trie.lookup_child(ROOT, byte), Some(byte as usize + 1));
    }
}

#[test]
#[should_panic]
fn test_trie_duplicate_child() {
    let mut trie = Trie::new();
    trie.insert_child(ROOT, b'x', 1);
    trie.insert_child(ROOT, b'x', 2);
}
