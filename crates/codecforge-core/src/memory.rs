//! An in-memory representation backend.
//!
//! [`Node`] is a small self-describing tree (null, scalars, lists, string
//! keyed maps) and [`MemoryProvider`] is its [`TypeProvider`]. Useful when a
//! value needs to be taken apart generically without committing to a text
//! format, and as the reference backend for the codec tests.
//!
//! `Node` also derives serde's traits (`untagged`), so a tree can be handed
//! to any serde format as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CodecError, DataResult, MapView, TypeProvider};

/// A value in the in-memory tree.
///
/// Maps use a `BTreeMap` so iteration order, and therefore any debug output
/// embedded in error messages, is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Node>),
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// Builds a map node from `(key, value)` pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the entry under `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// [`TypeProvider`] for [`Node`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProvider;

impl TypeProvider for MemoryProvider {
    type Value = Node;

    fn null(&self) -> Node {
        Node::Null
    }

    fn is_null(&self, value: &Node) -> bool {
        matches!(value, Node::Null)
    }

    fn create_map(&self) -> Node {
        Node::Map(BTreeMap::new())
    }

    fn create_map_from(&self, entries: Vec<(String, Node)>) -> Node {
        Node::Map(entries.into_iter().collect())
    }

    fn merge(&self, current: Node, addition: Node) -> DataResult<Node> {
        match (current, addition) {
            (Node::Null, addition) => Ok(addition),
            (Node::Map(mut current), Node::Map(addition)) => {
                current.extend(addition);
                Ok(Node::Map(current))
            }
            (current, addition) => Err(CodecError::merge_failure(&current, &addition)),
        }
    }

    fn get_map<'a>(&self, value: &'a Node) -> DataResult<MapView<'a, Node>> {
        match value {
            Node::Map(entries) => Ok(MapView::new(
                entries.iter().map(|(k, v)| (k.as_str(), v)),
            )),
            other => Err(CodecError::type_mismatch("a map", other)),
        }
    }

    fn create_boolean(&self, value: bool) -> Node {
        Node::Bool(value)
    }

    fn create_integer(&self, value: i64) -> Node {
        Node::Integer(value)
    }

    fn create_float(&self, value: f64) -> DataResult<Node> {
        Ok(Node::Float(value))
    }

    fn create_string(&self, value: &str) -> Node {
        Node::String(value.to_owned())
    }

    fn create_list(&self, items: Vec<Node>) -> Node {
        Node::List(items)
    }

    fn get_boolean(&self, value: &Node) -> DataResult<bool> {
        match value {
            Node::Bool(b) => Ok(*b),
            other => Err(CodecError::type_mismatch("a boolean", other)),
        }
    }

    fn get_integer(&self, value: &Node) -> DataResult<i64> {
        match value {
            Node::Integer(i) => Ok(*i),
            other => Err(CodecError::type_mismatch("an integer", other)),
        }
    }

    // Integers widen to floats; the reverse is a mismatch.
    fn get_float(&self, value: &Node) -> DataResult<f64> {
        match value {
            Node::Float(f) => Ok(*f),
            Node::Integer(i) => Ok(*i as f64),
            other => Err(CodecError::type_mismatch("a number", other)),
        }
    }

    fn get_string<'a>(&self, value: &'a Node) -> DataResult<&'a str> {
        match value {
            Node::String(s) => Ok(s.as_str()),
            other => Err(CodecError::type_mismatch("a string", other)),
        }
    }

    fn get_list<'a>(&self, value: &'a Node) -> DataResult<Vec<&'a Node>> {
        match value {
            Node::List(items) => Ok(items.iter().collect()),
            other => Err(CodecError::type_mismatch("a list", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    // =====================================================================
    // merge
    // =====================================================================

    #[test]
    fn test_merge_into_null_returns_addition() {
        let merged = MemoryProvider.merge(Node::Null, Node::Integer(3)).unwrap();
        assert_eq!(merged, Node::Integer(3));
    }

    #[test]
    fn test_merge_maps_is_a_union() {
        let current = Node::map([("x", Node::Integer(1))]);
        let addition = Node::map([("y", Node::Integer(2))]);
        let merged = MemoryProvider.merge(current, addition).unwrap();
        assert_eq!(
            merged,
            Node::map([("x", Node::Integer(1)), ("y", Node::Integer(2))])
        );
    }

    #[test]
    fn test_merge_duplicate_key_addition_wins() {
        let current = Node::map([("x", Node::Integer(1))]);
        let addition = Node::map([("x", Node::Integer(9))]);
        let merged = MemoryProvider.merge(current, addition).unwrap();
        assert_eq!(merged.get("x"), Some(&Node::Integer(9)));
    }

    #[test]
    fn test_merge_scalar_into_map_fails() {
        let err = MemoryProvider
            .merge(MemoryProvider.create_map(), Node::Integer(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MergeFailure);
        assert!(err.to_string().contains("Integer(1)"));
    }

    // =====================================================================
    // views
    // =====================================================================

    #[test]
    fn test_get_map_on_scalar_is_type_mismatch() {
        let err = MemoryProvider.get_map(&Node::Bool(true)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "Expected a map but found Bool(true)");
    }

    #[test]
    fn test_get_float_accepts_integers() {
        assert_eq!(MemoryProvider.get_float(&Node::Integer(2)), Ok(2.0));
        assert!(MemoryProvider.get_integer(&Node::Float(2.0)).is_err());
    }

    #[test]
    fn test_get_list_and_string() {
        let list = Node::List(vec![Node::from("a"), Node::from("b")]);
        let items = MemoryProvider.get_list(&list).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(MemoryProvider.get_string(items[1]), Ok("b"));
    }

    // =====================================================================
    // serde
    // =====================================================================

    #[test]
    fn test_node_serializes_untagged() {
        let node = Node::map([
            ("name", Node::from("ada")),
            ("tags", Node::List(vec![Node::Integer(1), Node::Null])),
        ]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"name":"ada","tags":[1,null]}"#);
    }

    #[test]
    fn test_node_deserializes_untagged() {
        let node: Node = serde_json::from_str(r#"{"a":[true,2,2.5,"s"]}"#).unwrap();
        assert_eq!(
            node,
            Node::map([(
                "a",
                Node::List(vec![
                    Node::Bool(true),
                    Node::Integer(2),
                    Node::Float(2.5),
                    Node::String("s".into()),
                ])
            )])
        );
    }
}
