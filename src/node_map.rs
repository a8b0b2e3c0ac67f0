use std::collections::HashMap;
use std::ops::Index;

use crate::signal::Node;

/// Sparse map from network nodes to values.
///
/// Entries come and go freely, which is what the equivalence checker needs
/// for its round-local gate patterns.
#[derive(Debug, Clone)]
pub struct NodeMap<T> {
    map: HashMap<Node, T>,
}

impl<T> Default for NodeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeMap<T> {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, node: Node) -> bool {
        self.map.contains_key(&node)
    }

    pub fn get(&self, node: Node) -> Option<&T> {
        self.map.get(&node)
    }

    pub fn get_mut(&mut self, node: Node) -> Option<&mut T> {
        self.map.get_mut(&node)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, node: Node, value: T) -> Option<T> {
        self.map.insert(node, value)
    }

    pub fn remove(&mut self, node: Node) -> Option<T> {
        self.map.remove(&node)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, &T)> {
        self.map.iter().map(|(&n, v)| (n, v))
    }
}

impl<T> Index<Node> for NodeMap<T> {
    type Output = T;

    fn index(&self, node: Node) -> &Self::Output {
        match self.map.get(&node) {
            Some(value) => value,
            None => panic!("No value stored for node {}", node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut map = NodeMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert(Node::new(3), "a"), None);
        assert_eq!(map.insert(Node::new(3), "b"), Some("a"));
        assert_eq!(map.len(), 1);
        assert!(map.contains(Node::new(3)));
        assert_eq!(map[Node::new(3)], "b");
        assert_eq!(map.remove(Node::new(3)), Some("b"));
        assert!(!map.contains(Node::new(3)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut map = NodeMap::new();
        map.insert(Node::new(1), 10);
        if let Some(v) = map.get_mut(Node::new(1)) {
            *v += 1;
        }
        assert_eq!(map.get(Node::new(1)), Some(&11));
        assert_eq!(map.get(Node::new(2)), None);
    }

    #[test]
    #[should_panic(expected = "No value stored for node n9")]
    fn test_index_missing_panics() {
        let map: NodeMap<u8> = NodeMap::new();
        let _ = map[Node::new(9)];
    }
}
