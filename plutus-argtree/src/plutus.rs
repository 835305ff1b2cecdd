/// Target on-chain structured value, in its detailed JSON encoding.
use serde::Serialize;
use serde_json::Value;

/// A serialized argument: byte string, integer, constructor, or an opaque
/// value taken verbatim from a data field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlutusData {
    /// `{"bytes": "deadbeef"}`
    Bytes { bytes: String },
    /// `{"int": 42}`
    Int { int: i128 },
    /// `{"constructor": 1, "fields": [...]}`
    Constr {
        constructor: u64,
        fields: Vec<PlutusData>,
    },
    /// Already-structured data entered by hand.
    Raw(Value),
}

impl PlutusData {
    pub fn bytes(bytes: impl Into<String>) -> Self {
        PlutusData::Bytes {
            bytes: bytes.into(),
        }
    }

    pub fn int(int: i128) -> Self {
        PlutusData::Int { int }
    }

    pub fn constr(constructor: u64, fields: Vec<PlutusData>) -> Self {
        PlutusData::Constr {
            constructor,
            fields,
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Compact JSON text, digits of every integer preserved.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
