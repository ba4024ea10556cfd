use kvconf_types::{Value, ValueMap};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::kind::CodecKind;
use crate::traits::Codec;

/// Codec for a store persisted as a single JSON object.
///
/// Top-level keys are the store's entry names; each value may be any JSON
/// value. Numbers are decoded as 64-bit floats. A file that contains only
/// whitespace decodes to an empty mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    fn json_type_name(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

impl Codec for JsonCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Json
    }

    fn decode(&self, data: &[u8]) -> CodecResult<ValueMap> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(ValueMap::new());
        }
        let doc: serde_json::Value = serde_json::from_slice(data)?;
        let obj = match doc {
            serde_json::Value::Object(obj) => obj,
            other => return Err(CodecError::NotAnObject(Self::json_type_name(&other))),
        };
        let values: ValueMap = obj
            .into_iter()
            .map(|(k, v)| (k, Value::from_json(v)))
            .collect();
        debug!(entries = values.len(), "decoded json config");
        Ok(values)
    }

    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>> {
        let mut obj = serde_json::Map::with_capacity(values.len());
        for (key, value) in values {
            let json = value.to_json().map_err(|source| CodecError::Encode {
                key: key.clone(),
                source,
            })?;
            obj.insert(key.clone(), json);
        }
        let mut out = serde_json::to_vec_pretty(&serde_json::Value::Object(obj))?;
        out.push(b'\n');
        Ok(out)
    }
}
