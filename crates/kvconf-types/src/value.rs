use std::collections::BTreeMap;
use std::fmt;

use crate::error::TypeError;

/// A name → value mapping. Sorted so that encoders emit entries in a stable order.
pub type ValueMap = BTreeMap<String, Value>;

/// A dynamically-kinded configuration value.
///
/// Codecs only ever decode numbers as [`Value::Float`]; the integer variants
/// appear when a caller stores an integer through a typed accessor and keep
/// that kind until the store is reloaded.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// JSON `null`.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    /// An ordered sequence of values (JSON array).
    Seq(Vec<Value>),
    /// A nested mapping (JSON object).
    Map(ValueMap),
}

/// The kind tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Seq,
    Map,
}

impl ValueKind {
    /// Stable lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Seq => "sequence",
            Self::Map => "map",
        }
    }

    /// Returns `true` for the kinds that carry a single scalar (everything
    /// except sequences, maps and null).
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::String
        )
    }

    /// Returns `true` for the three numeric kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Seq(_) => ValueKind::Seq,
            Self::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert a parsed JSON document into a [`Value`].
    ///
    /// All JSON numbers become [`Value::Float`].
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Float),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Seq(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(obj) => Self::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert into a JSON document. Fails on NaN and infinities, which JSON
    /// has no literal for.
    pub fn to_json(&self) -> Result<serde_json::Value, TypeError> {
        Ok(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Uint(n) => serde_json::Value::from(*n),
            Self::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| TypeError::NonFiniteNumber(n.to_string()))?,
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Seq(items) => serde_json::Value::Array(
                items.iter().map(Self::to_json).collect::<Result<_, _>>()?,
            ),
            Self::Map(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    obj.insert(k.clone(), v.to_json()?);
                }
                serde_json::Value::Object(obj)
            }
        })
    }
}

/// Scalars render as their plain text form (the `value` half of a
/// `key=value` line); sequences and maps render as JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Seq(_) | Self::Map(_) => match self.to_json() {
                Ok(json) => write!(f, "{json}"),
                Err(_) => f.write_str("<unrepresentable>"),
            },
        }
    }
}

macro_rules! impl_from_scalar {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_scalar!(Int as i64: i8, i16, i32, i64, isize);
impl_from_scalar!(Uint as u64: u8, u16, u32, u64, usize);
impl_from_scalar!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Seq(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Self::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(-3i8).kind(), ValueKind::Int);
        assert_eq!(Value::from(3u16).kind(), ValueKind::Uint);
        assert_eq!(Value::from(1.5f32).kind(), ValueKind::Float);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::from(vec![Value::Null]).kind(), ValueKind::Seq);
        assert_eq!(Value::from(ValueMap::new()).kind(), ValueKind::Map);
        assert_eq!(Value::default().kind(), ValueKind::Null);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ValueKind::String.to_string(), "string");
        assert_eq!(ValueKind::Seq.name(), "sequence");
        assert!(ValueKind::Uint.is_numeric());
        assert!(!ValueKind::Map.is_scalar());
    }

    #[test]
    fn json_numbers_decode_as_float() {
        let v = Value::from_json(json!({"a": 1, "b": [2, 3.5], "c": {"d": -4}}));
        let Value::Map(map) = v else {
            panic!("expected a map");
        };
        assert_eq!(map["a"], Value::Float(1.0));
        assert_eq!(
            map["b"],
            Value::Seq(vec![Value::Float(2.0), Value::Float(3.5)])
        );
        let Value::Map(inner) = &map["c"] else {
            panic!("expected nested map");
        };
        assert_eq!(inner["d"], Value::Float(-4.0));
    }

    #[test]
    fn to_json_keeps_integers_integral() {
        assert_eq!(Value::Int(-7).to_json().unwrap(), json!(-7));
        assert_eq!(Value::Uint(7).to_json().unwrap(), json!(7));
    }

    #[test]
    fn to_json_rejects_non_finite() {
        let err = Value::Float(f64::NAN).to_json().unwrap_err();
        assert!(matches!(err, TypeError::NonFiniteNumber(_)));

        let nested = Value::Seq(vec![Value::Float(f64::INFINITY)]);
        assert!(nested.to_json().is_err());
    }

    #[test]
    fn display_scalars_as_plain_text() {
        assert_eq!(Value::from("hello world").to_string(), "hello world");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Float(3.14).to_string(), "3.14");
        assert_eq!(Value::Float(100.0).to_string(), "100");
        assert_eq!(Value::Int(-2).to_string(), "-2");
    }

    #[test]
    fn display_collections_as_json() {
        let v = Value::Seq(vec![Value::from("a"), Value::from(false)]);
        assert_eq!(v.to_string(), r#"["a",false]"#);
    }

    proptest! {
        #[test]
        fn finite_floats_survive_json(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let json = Value::Float(n).to_json().unwrap();
            prop_assert_eq!(Value::from_json(json), Value::Float(n));
        }
    }
}
