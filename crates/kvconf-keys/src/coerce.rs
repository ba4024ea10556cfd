//! The coercion table.
//!
//! | target            | accepted stored kinds                        |
//! |-------------------|----------------------------------------------|
//! | `String`          | string; bool (`"true"`/`"false"`)            |
//! | `bool`            | bool; string holding a boolean literal       |
//! | integers, floats  | int, uint, float (converted with `as`)       |
//! | `Vec<Value>`      | sequence                                     |
//! | `ValueMap`        | map                                          |
//!
//! Numeric conversions follow Rust `as` semantics: integer narrowing wraps,
//! float → integer truncates toward zero and saturates at the bounds (NaN
//! becomes `0`). Numbers are never rendered to or parsed from strings.

use kvconf_types::{Value, ValueKind, ValueMap};

/// Which rule of the coercion table produced a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// The stored kind is the kind this type is stored as, and the value
    /// fits without change.
    Exact,
    /// A bool read as a string, or a boolean literal read as a bool.
    BoolBridge,
    /// A conversion between numeric kinds or widths.
    Numeric,
}

/// A static type a [`Key`](crate::Key) can be bound to.
pub trait KeyType: Clone {
    /// Name reported as the wanted type in cast errors.
    const TYPE_NAME: &'static str;

    /// Convert a stored value, or `None` if the table has no rule for it.
    fn coerce(value: &Value) -> Option<(Self, Coercion)>;

    /// The value written to the store for this type.
    fn into_value(self) -> Value;
}

/// Parse a boolean literal: `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
pub fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl KeyType for String {
    const TYPE_NAME: &'static str = "string";

    fn coerce(value: &Value) -> Option<(Self, Coercion)> {
        match value {
            Value::String(s) => Some((s.clone(), Coercion::Exact)),
            Value::Bool(b) => Some((b.to_string(), Coercion::BoolBridge)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl KeyType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn coerce(value: &Value) -> Option<(Self, Coercion)> {
        match value {
            Value::Bool(b) => Some((*b, Coercion::Exact)),
            Value::String(s) => parse_bool_literal(s).map(|b| (b, Coercion::BoolBridge)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! impl_numeric_key_type {
    ($($t:ty => $name:literal, $stored:ident;)+) => {
        $(
            impl KeyType for $t {
                const TYPE_NAME: &'static str = $name;

                fn coerce(value: &Value) -> Option<(Self, Coercion)> {
                    let (n, lossless) = match value {
                        Value::Int(v) => {
                            let n = *v as $t;
                            (n, n as i64 == *v)
                        }
                        Value::Uint(v) => {
                            let n = *v as $t;
                            (n, n as u64 == *v)
                        }
                        Value::Float(v) => {
                            let n = *v as $t;
                            (n, n as f64 == *v || v.is_nan())
                        }
                        _ => return None,
                    };
                    let rule = if lossless && value.kind() == ValueKind::$stored {
                        Coercion::Exact
                    } else {
                        Coercion::Numeric
                    };
                    Some((n, rule))
                }

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )+
    };
}

impl_numeric_key_type! {
    i8 => "i8", Int;
    i16 => "i16", Int;
    i32 => "i32", Int;
    i64 => "i64", Int;
    isize => "isize", Int;
    u8 => "u8", Uint;
    u16 => "u16", Uint;
    u32 => "u32", Uint;
    u64 => "u64", Uint;
    usize => "usize", Uint;
    f32 => "f32", Float;
    f64 => "f64", Float;
}

impl KeyType for Vec<Value> {
    const TYPE_NAME: &'static str = "sequence";

    fn coerce(value: &Value) -> Option<(Self, Coercion)> {
        match value {
            Value::Seq(items) => Some((items.clone(), Coercion::Exact)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Seq(self)
    }
}

impl KeyType for ValueMap {
    const TYPE_NAME: &'static str = "map";

    fn coerce(value: &Value) -> Option<(Self, Coercion)> {
        match value {
            Value::Map(map) => Some((map.clone(), Coercion::Exact)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Map(self)
    }
}
