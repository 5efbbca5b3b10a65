//! Field-bound codecs: "how to read and write exactly this field of `O`".

use std::fmt;
use std::marker::PhantomData;

use crate::{Codec, CodecError, DataResult, MapView, TypeProvider};

/// One field of a product type `O`, as seen by a
/// [`CodecGrouper`](crate::CodecGrouper).
///
/// [`ConfiguredCodec`] is the implementation everyone uses; the trait exists
/// so the grouper can be generic over a tuple of differently typed fields.
pub trait FieldCodec<O>: fmt::Display + Send + Sync {
    /// The type of the field.
    type Value;

    /// Reads the field from `object` and merges `{key: encoded}` into `map`.
    fn encode_field<P: TypeProvider>(
        &self,
        provider: &P,
        map: P::Value,
        object: &O,
    ) -> DataResult<P::Value>;

    /// Decodes the field out of an already viewed map.
    fn decode_field<P: TypeProvider>(
        &self,
        provider: &P,
        map: &MapView<'_, P::Value>,
    ) -> DataResult<Self::Value>;
}

/// A [`Codec`] bound to a field key and an accessor on `O`.
///
/// Usually built through [`Codec::field`]:
///
/// ```rust
/// use codecforge_core::{codecs, Codec};
///
/// struct Point { x: i32, y: i32 }
///
/// let x = codecs::int().field("x", |p: &Point| &p.x);
/// assert_eq!(x.key(), "x");
/// ```
pub struct ConfiguredCodec<C, O, G> {
    codec: C,
    key: String,
    getter: G,
    _owner: PhantomData<fn(&O)>,
}

impl<C, O, G> ConfiguredCodec<C, O, G>
where
    C: Codec,
    G: Fn(&O) -> &C::Value + Send + Sync,
{
    /// # Panics
    /// Panics if `key` is empty. An empty key is a mistake in how the codec
    /// was assembled, so it fails right here instead of on every encode.
    pub fn new(codec: C, key: impl Into<String>, getter: G) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "field key must not be empty (codec: {codec})");
        Self {
            codec,
            key,
            getter,
            _owner: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C, O, G> FieldCodec<O> for ConfiguredCodec<C, O, G>
where
    C: Codec,
    G: Fn(&O) -> &C::Value + Send + Sync,
{
    type Value = C::Value;

    fn encode_field<P: TypeProvider>(
        &self,
        provider: &P,
        map: P::Value,
        object: &O,
    ) -> DataResult<P::Value> {
        let field = (self.getter)(object);
        if self.codec.is_absent(field) {
            return Ok(map);
        }
        let encoded = self.codec.encode_start(provider, provider.null(), Some(field))?;
        let entry = provider.create_map_from(vec![(self.key.clone(), encoded)]);
        provider.merge(map, entry)
    }

    fn decode_field<P: TypeProvider>(
        &self,
        provider: &P,
        map: &MapView<'_, P::Value>,
    ) -> DataResult<C::Value> {
        match map.get(&self.key) {
            Some(field) => self.codec.decode_start(provider, Some(field)),
            // Codecs that accept absence (optionals) decide for themselves;
            // for everything else the key is required.
            None => self
                .codec
                .decode_start(provider, None)
                .map_err(|_| CodecError::MissingField {
                    key: self.key.clone(),
                }),
        }
    }
}

impl<C: fmt::Display, O, G> fmt::Display for ConfiguredCodec<C, O, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.codec)
    }
}

impl<C: fmt::Debug, O, G> fmt::Debug for ConfiguredCodec<C, O, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredCodec")
            .field("key", &self.key)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs;
    use crate::memory::{MemoryProvider, Node};

    struct Account {
        name: String,
        nickname: Option<String>,
    }

    fn account() -> Account {
        Account {
            name: "ada".into(),
            nickname: None,
        }
    }

    #[test]
    fn test_encode_field_merges_under_key() {
        let name = codecs::string().field("name", |a: &Account| &a.name);
        let map = name
            .encode_field(&MemoryProvider, MemoryProvider.create_map(), &account())
            .unwrap();
        assert_eq!(map, Node::map([("name", Node::from("ada"))]));
    }

    #[test]
    fn test_encode_field_keeps_existing_entries() {
        let name = codecs::string().field("name", |a: &Account| &a.name);
        let existing = Node::map([("id", Node::Integer(1))]);
        let map = name
            .encode_field(&MemoryProvider, existing, &account())
            .unwrap();
        assert_eq!(map.get("id"), Some(&Node::Integer(1)));
        assert_eq!(map.get("name"), Some(&Node::from("ada")));
    }

    #[test]
    fn test_absent_optional_writes_no_key() {
        let nickname = codecs::string()
            .optional()
            .field("nickname", |a: &Account| &a.nickname);
        let map = nickname
            .encode_field(&MemoryProvider, MemoryProvider.create_map(), &account())
            .unwrap();
        assert_eq!(map, MemoryProvider.create_map());
    }

    fn empty_view() -> MapView<'static, Node> {
        MapView::new(std::iter::empty())
    }

    #[test]
    fn test_decode_missing_key() {
        let name = codecs::string().field("name", |a: &Account| &a.name);
        let err = name
            .decode_field(&MemoryProvider, &empty_view())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing field 'name'");
    }

    #[test]
    fn test_decode_missing_optional_key_is_none() {
        let nickname = codecs::string()
            .optional()
            .field("nickname", |a: &Account| &a.nickname);
        let decoded = nickname
            .decode_field(&MemoryProvider, &empty_view())
            .unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_decode_reads_from_shared_view() {
        let name = codecs::string().field("name", |a: &Account| &a.name);
        let node = Node::map([("name", Node::from("ada")), ("id", Node::Integer(1))]);
        let view = MemoryProvider.get_map(&node).unwrap();
        assert_eq!(name.decode_field(&MemoryProvider, &view), Ok("ada".to_string()));
    }

    #[test]
    fn test_present_value_encoding_to_null_keeps_its_key() {
        // A mapped optional is not absent as far as the field is concerned,
        // so its null encoding is still written under the key.
        struct Wrapper {
            inner: Option<i32>,
        }
        let codec = codecs::int()
            .optional()
            .xmap(|v: Option<i32>| v, |v: Option<i32>| v)
            .field("inner", |w: &Wrapper| &w.inner);
        let map = codec
            .encode_field(&MemoryProvider, MemoryProvider.create_map(), &Wrapper { inner: None })
            .unwrap();
        assert_eq!(map, Node::map([("inner", Node::Null)]));
    }

    #[test]
    fn test_display_is_key_and_codec() {
        let name = codecs::string().field("name", |a: &Account| &a.name);
        assert_eq!(name.to_string(), "name: String");
    }

    #[test]
    #[should_panic(expected = "field key must not be empty")]
    fn test_empty_key_panics_at_construction() {
        let _ = codecs::string().field("", |a: &Account| &a.name);
    }
}
