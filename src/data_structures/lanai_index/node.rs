//! Node implementation for the Lanai pattern trie.
//!
//! Nodes are the building blocks of the trie. Each one maps edge labels to
//! child nodes and may hold the entries of the patterns that end at it.

use fnv::FnvHashMap;

use super::label::Label;
use super::signature::Signature;

/// Payload stored for one `add` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<D> {
    /// Caller supplied payload
    pub data: D,

    /// Position of the `add` call that stored this entry
    pub insertion_index: u64,

    /// Signature of the pattern the entry was added under
    pub signature: Signature,
}

/// A node in the Lanai pattern trie.
///
/// Patterns whose scalars share a text form, such as `{"a": 1}` and
/// `{"a": "1"}`, end at the same node. Each entry keeps its own signature so
/// exact lookups and removals stay per pattern.
#[derive(Debug, Clone)]
pub struct TrieNode<D> {
    /// Map of edge labels to child nodes
    pub children: FnvHashMap<Label, TrieNode<D>>,

    /// Entries of the patterns that terminate here, in insertion order
    pub entries: Vec<Entry<D>>,
}

impl<D> TrieNode<D> {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            children: FnvHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// Returns the child reached over `label`, if any.
    pub fn child(&self, label: &Label) -> Option<&TrieNode<D>> {
        self.children.get(label)
    }

    /// Returns `true` if nothing is stored here or below.
    pub fn is_vacant(&self) -> bool {
        self.children.is_empty() && self.entries.is_empty()
    }

    /// Returns the child reached over `label`, creating it first if needed.
    pub(crate) fn grab_branch(&mut self, label: Label) -> &mut TrieNode<D> {
        self.children.entry(label).or_default()
    }

    /// Follows `path` without creating anything.
    pub(crate) fn descend(&self, path: &[Label]) -> Option<&TrieNode<D>> {
        path.iter().try_fold(self, |node, label| node.child(label))
    }

    /// Appends an entry.
    pub(crate) fn attach(&mut self, entry: Entry<D>) {
        self.entries.push(entry);
    }

    /// Returns the entries stored under exactly `signature`, oldest first.
    pub fn entries_for(&self, signature: Signature) -> impl Iterator<Item = &Entry<D>> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.signature == signature)
    }

    /// Counts nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }
}

impl<D: PartialEq> TrieNode<D> {
    /// Drops entries owned by `signature`, returning how many were removed.
    ///
    /// With `data` only matching payloads go; otherwise every entry of the
    /// pattern does. Entries of other patterns are left alone.
    pub(crate) fn take_entries(&mut self, signature: &Signature, data: Option<&D>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            entry.signature != *signature || data.is_some_and(|data| entry.data != *data)
        });
        before - self.entries.len()
    }

    /// Removes entries at the end of `path` and prunes vacant nodes on the way back.
    pub(crate) fn purge(&mut self, path: &[Label], signature: &Signature, data: Option<&D>) -> usize {
        let Some((label, rest)) = path.split_first() else {
            return self.take_entries(signature, data);
        };

        let Some(child) = self.children.get_mut(label) else {
            return 0;
        };

        let removed = child.purge(rest, signature, data);
        if child.is_vacant() {
            self.children.remove(label);
        }
        removed
    }
}

impl<D> Default for TrieNode<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signature() -> Signature {
        Signature::of(&json!({"a": 1}))
    }

    fn entry(data: &'static str, insertion_index: u64, signature: Signature) -> Entry<&'static str> {
        Entry {
            data,
            insertion_index,
            signature,
        }
    }

    fn path() -> Vec<Label> {
        vec![Label::Key("a".to_string()), Label::Value("1".to_string())]
    }

    fn stored(entries: &[(&'static str, u64)]) -> TrieNode<&'static str> {
        let mut root = TrieNode::new();
        let mut trunk = &mut root;
        for label in path() {
            trunk = trunk.grab_branch(label);
        }
        for &(data, insertion_index) in entries {
            trunk.attach(entry(data, insertion_index, signature()));
        }
        root
    }

    #[test]
    fn test_new_node_is_vacant() {
        let node = TrieNode::<u8>::new();
        assert!(node.is_vacant());
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn test_grab_branch_reuses_children() {
        let mut node = TrieNode::<u8>::new();
        node.grab_branch(Label::Key("a".to_string()));
        node.grab_branch(Label::Key("a".to_string()));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_purge_everything_prunes_path() {
        let mut root = stored(&[("X", 0), ("Y", 1)]);
        assert_eq!(root.node_count(), 3);

        assert_eq!(root.purge(&path(), &signature(), None), 2);
        assert!(root.is_vacant());
    }

    #[test]
    fn test_purge_by_data_keeps_the_rest() {
        let mut root = stored(&[("X", 0), ("Y", 1)]);

        assert_eq!(root.purge(&path(), &signature(), Some(&"X")), 1);
        let terminal = root.descend(&path()).unwrap();
        assert_eq!(terminal.entries, vec![entry("Y", 1, signature())]);
    }

    #[test]
    fn test_purge_wrong_signature_is_noop() {
        let mut root = stored(&[("X", 0)]);
        let other = Signature::of(&json!({"a": "1"}));

        assert_eq!(root.purge(&path(), &other, None), 0);
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_purge_missing_path_is_noop() {
        let mut root = stored(&[("X", 0)]);
        let missing = vec![Label::Key("b".to_string()), Label::Value("1".to_string())];

        assert_eq!(root.purge(&missing, &signature(), None), 0);
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_purge_keeps_colliding_pattern() {
        let mut root = stored(&[("number", 0)]);
        let text = Signature::of(&json!({"a": "1"}));
        let mut trunk = &mut root;
        for label in path() {
            trunk = trunk.grab_branch(label);
        }
        trunk.attach(entry("text", 1, text.clone()));

        let terminal = root.descend(&path()).unwrap();
        assert_eq!(terminal.entries_for(signature()).count(), 1);
        assert_eq!(terminal.entries_for(text.clone()).count(), 1);

        assert_eq!(root.purge(&path(), &text, None), 1);
        let terminal = root.descend(&path()).unwrap();
        assert_eq!(terminal.entries, vec![entry("number", 0, signature())]);
    }
}
