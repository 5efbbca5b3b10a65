//! Reading and writing JSON text through a codec.
//!
//! [`JsonProvider`] only deals with `serde_json::Value` trees. [`JsonFormat`]
//! adds the two ends around it: parse text into a tree before decoding, and
//! print the tree after encoding. serde_json does the text part, the codec
//! does the shape part.

use codecforge_core::Codec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonError, JsonProvider};

/// Output settings for [`JsonFormat`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Indent the output (`serde_json::to_string_pretty`).
    pub pretty: bool,
}

/// Codec-driven JSON reader/writer.
///
/// ## Example
///
/// ```rust
/// use codecforge_core::{codecs, Codec};
/// use codecforge_json::JsonFormat;
///
/// let format = JsonFormat::default();
/// let codec = codecs::list(codecs::int());
///
/// let text = format.encode_to_string(&codec, &vec![1, 2, 3]).unwrap();
/// assert_eq!(text, "[1,2,3]");
///
/// let decoded = format.decode_from_str(&codec, &text).unwrap();
/// assert_eq!(decoded, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    config: JsonConfig,
}

impl JsonFormat {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn pretty() -> Self {
        Self::new(JsonConfig { pretty: true })
    }

    pub fn config(&self) -> &JsonConfig {
        &self.config
    }

    /// Encodes `value` into a JSON tree.
    pub fn encode_to_value<C: Codec>(&self, codec: &C, value: &C::Value) -> Result<Value, JsonError> {
        Ok(codec.encode(&JsonProvider, value)?)
    }

    /// Encodes `value` and prints it.
    ///
    /// # Errors
    /// `JsonError::Codec` if the codec rejects the value.
    pub fn encode_to_string<C: Codec>(
        &self,
        codec: &C,
        value: &C::Value,
    ) -> Result<String, JsonError> {
        let tree = self.encode_to_value(codec, value)?;
        if self.config.pretty {
            serde_json::to_string_pretty(&tree).map_err(JsonError::Write)
        } else {
            serde_json::to_string(&tree).map_err(JsonError::Write)
        }
    }

    pub fn encode_to_vec<C: Codec>(&self, codec: &C, value: &C::Value) -> Result<Vec<u8>, JsonError> {
        let tree = self.encode_to_value(codec, value)?;
        if self.config.pretty {
            serde_json::to_vec_pretty(&tree).map_err(JsonError::Write)
        } else {
            serde_json::to_vec(&tree).map_err(JsonError::Write)
        }
    }

    /// Parses `text` and decodes it.
    ///
    /// # Errors
    /// `JsonError::Syntax` for malformed text, `JsonError::Codec` for valid
    /// JSON of the wrong shape.
    pub fn decode_from_str<C: Codec>(&self, codec: &C, text: &str) -> Result<C::Value, JsonError> {
        let tree: Value = serde_json::from_str(text).map_err(JsonError::Syntax)?;
        Ok(codec.decode(&JsonProvider, &tree)?)
    }

    pub fn decode_from_slice<C: Codec>(&self, codec: &C, data: &[u8]) -> Result<C::Value, JsonError> {
        let tree: Value = serde_json::from_slice(data).map_err(JsonError::Syntax)?;
        Ok(codec.decode(&JsonProvider, &tree)?)
    }
}
