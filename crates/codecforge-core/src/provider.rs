//! The backend boundary.
//!
//! A [`TypeProvider`] knows how to build and take apart the representation
//! values of one backend (a JSON tree, the in-memory [`Node`](crate::memory::Node)
//! tree, ...). Codecs never look inside a representation value themselves;
//! they ask the provider for a *view* of the shape they expect and get a
//! [`DataResult`] back. That keeps every codec backend-agnostic: the same
//! `Codec` value works against any provider.

use std::collections::BTreeMap;
use std::fmt;

use crate::DataResult;

/// Adapter between codecs and one concrete representation.
///
/// Implementations must be pure in-memory transformations: no I/O and no
/// blocking. All `get_*` methods fail with [`CodecError::TypeMismatch`](crate::CodecError::TypeMismatch) when
/// the value has a different shape.
pub trait TypeProvider {
    /// The backend's representation value.
    type Value: Clone + fmt::Debug;

    /// The absent value. Encoding starts from here.
    fn null(&self) -> Self::Value;

    /// Returns `true` if `value` is the absent value.
    fn is_null(&self, value: &Self::Value) -> bool;

    /// A fresh, empty map.
    fn create_map(&self) -> Self::Value;

    /// A map holding exactly `entries`. Later duplicates win.
    fn create_map_from(&self, entries: Vec<(String, Self::Value)>) -> Self::Value;

    /// Combines `addition` into `current`.
    ///
    /// - `current` absent → `addition`
    /// - both maps → union, entries of `addition` override
    /// - otherwise → [`CodecError::MergeFailure`](crate::CodecError::MergeFailure)
    fn merge(&self, current: Self::Value, addition: Self::Value) -> DataResult<Self::Value>;

    /// Views `value` as a key → subvalue mapping.
    fn get_map<'a>(&self, value: &'a Self::Value) -> DataResult<MapView<'a, Self::Value>>;

    fn create_boolean(&self, value: bool) -> Self::Value;
    fn create_integer(&self, value: i64) -> Self::Value;

    /// Fails with [`CodecError::OutOfRange`](crate::CodecError::OutOfRange)
    /// if the backend cannot hold `value` (e.g. NaN in JSON).
    fn create_float(&self, value: f64) -> DataResult<Self::Value>;
    fn create_string(&self, value: &str) -> Self::Value;
    fn create_list(&self, items: Vec<Self::Value>) -> Self::Value;

    fn get_boolean(&self, value: &Self::Value) -> DataResult<bool>;
    fn get_integer(&self, value: &Self::Value) -> DataResult<i64>;
    fn get_float(&self, value: &Self::Value) -> DataResult<f64>;
    fn get_string<'a>(&self, value: &'a Self::Value) -> DataResult<&'a str>;
    fn get_list<'a>(&self, value: &'a Self::Value) -> DataResult<Vec<&'a Self::Value>>;
}

/// A borrowed key → value view of a map-shaped representation value.
///
/// Built once per map and shared by every field that reads from it.
#[derive(Debug, Clone)]
pub struct MapView<'a, V> {
    entries: BTreeMap<&'a str, &'a V>,
}

impl<'a, V> MapView<'a, V> {
    /// Collects the given entries. If a backend produces duplicate keys the
    /// last one is kept. Backends call this from `get_map`.
    pub fn new(entries: impl IntoIterator<Item = (&'a str, &'a V)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a V> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a V)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}
