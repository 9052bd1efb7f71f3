//! Prefix tree for command-name completion.
//!
//! Children are kept in a `BTreeMap`, so every enumeration comes out in
//! lexical order without a separate sort.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// A trie (prefix tree) of words.
///
/// # Example
///
/// ```
/// use interp::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("commands");
/// trie.insert("count");
/// trie.insert("leave");
///
/// assert_eq!(trie.completions("co"), vec!["commands", "count"]);
/// assert!(trie.contains("leave"));
/// assert!(!trie.contains("lea"));
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    count: usize,
}

impl Trie {
    /// Creates a new empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word. Empty words and repeats are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let node = word
            .chars()
            .fold(&mut self.root, |node, ch| node.children.entry(ch).or_default());

        if !node.terminal {
            node.terminal = true;
            self.count += 1;
        }
    }

    /// Checks if a whole word is present.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|node| node.terminal)
    }

    /// Returns every word starting with `prefix`, in lexical order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(node) = self.find(prefix) {
            collect(node, &mut prefix.to_string(), &mut results);
        }
        results
    }

    /// Returns the number of words in the trie.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the trie holds no words.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }
}

fn collect(node: &TrieNode, prefix: &mut String, results: &mut Vec<String>) {
    if node.terminal {
        results.push(prefix.clone());
    }

    for (ch, child) in &node.children {
        prefix.push(*ch);
        collect(child, prefix, results);
        prefix.pop();
    }
}
