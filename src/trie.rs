//! A prefix tree of dictionary phrases. The nodes live in a flat arena and are
//! addressed by their code, which is also their creation order. The root is
//! the empty phrase and has the code zero.

use ahash::AHashMap;

/// The identity of a dictionary phrase.
pub type Code = usize;

/// The code of the empty phrase.
pub const ROOT: Code = 0;

/// A single phrase in the trie.
#[derive(Debug, Default)]
struct TrieNode {
    /// Maps the next byte of the phrase to the code of the longer phrase.
    children: AHashMap<u8, Code>,
}

/// An incrementally growing trie of byte phrases.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a trie that only contains the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Returns the number of phrases, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The trie is never empty, because the root is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the code of the phrase 'node' followed by 'byte', if it exists.
    pub fn lookup_child(&self, node: Code, byte: u8) -> Option<Code> {
        self.nodes[node].children.get(&byte).copied()
    }

    /// Creates the phrase 'node' followed by 'byte' and assigns it 'code'.
    /// Codes are handed out in creation order, so 'code' must be the next
    /// free slot in the arena, and the child must not exist yet.
    pub fn insert_child(&mut self, node: Code, byte: u8, code: Code) -> Code {
        assert_eq!(code, self.nodes.len(), "Codes must be assigned in order");
        let prev = self.nodes[node].children.insert(byte, code);
        assert!(prev.is_none(), "The child {} already exists", byte);
        self.nodes.push(TrieNode::default());
        code
    }
}
