use std::io::{BufRead, Write};

use kvconf_types::{Value, ValueMap};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::kind::CodecKind;
use crate::traits::Codec;

/// Prefix marking a comment line.
const COMMENT_PREFIX: char = '#';
/// Separator between key and value.
const SEPARATOR: char = '=';

/// Codec for a store persisted as `key=value` lines.
///
/// File format:
/// ```text
/// # comment
/// name=server-1
/// port=8080
/// ```
///
/// Decoding skips comment lines and lines without a separator, splits the
/// rest at the first `=`, and stores the value as a float when it parses as
/// one, otherwise as the raw string. Text whose magnitude overflows a float
/// (`1e400`) stays a string. Keys and values are not trimmed.
///
/// Encoding writes one line per scalar entry. Sequences, maps and nulls have
/// no line form and are left out, as are entries whose key or value would
/// not read back as the same single line: line breaks anywhere, a `=` in
/// the key, or a key starting with `#`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineCodec;

impl LineCodec {
    fn parse_value(raw: &str) -> Value {
        match raw.parse::<f64>() {
            // `inf`/`nan` literals are kept; digits that overflow are not.
            Ok(n) if !n.is_infinite() || !raw.bytes().any(|b| b.is_ascii_digit()) => {
                Value::Float(n)
            }
            _ => Value::String(raw.to_owned()),
        }
    }

    fn has_line_break(s: &str) -> bool {
        s.contains(['\n', '\r'])
    }

    fn representable(key: &str, value: &Value) -> bool {
        let key_ok = !key.starts_with(COMMENT_PREFIX)
            && !key.contains(SEPARATOR)
            && !Self::has_line_break(key);
        let value_ok = match value {
            Value::String(s) => !Self::has_line_break(s),
            _ => true,
        };
        key_ok && value_ok
    }
}

impl Codec for LineCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Line
    }

    fn decode(&self, data: &[u8]) -> CodecResult<ValueMap> {
        let mut values = ValueMap::new();
        for (idx, line) in data.lines().enumerate() {
            let line = line.map_err(|e| CodecError::Line {
                line: idx + 1,
                reason: e.to_string(),
            })?;
            if line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let Some((key, raw)) = line.split_once(SEPARATOR) else {
                continue;
            };
            values.insert(key.to_owned(), Self::parse_value(raw));
        }
        debug!(entries = values.len(), "decoded line config");
        Ok(values)
    }

    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        for (key, value) in values {
            if !value.kind().is_scalar() {
                debug!(key = %key, kind = %value.kind(), "line codec skips non-scalar entry");
                continue;
            }
            if !Self::representable(key, value) {
                debug!(
                    key = %key.escape_debug(),
                    "line codec skips entry that would not read back"
                );
                continue;
            }
            writeln!(out, "{key}{SEPARATOR}{value}")?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> ValueMap {
        LineCodec.decode(text.as_bytes()).unwrap()
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    #[test]
    fn decode_numbers_and_strings() {
        let values = decode("port=8080\nratio=0.25\nname=server-1\n");
        assert_eq!(values["port"], Value::Float(8080.0));
        assert_eq!(values["ratio"], Value::Float(0.25));
        assert_eq!(values["name"], Value::from("server-1"));
    }

    #[test]
    fn decode_skips_comments_and_lines_without_separator() {
        let values = decode("# port=1\njust some words\n\nhost=example\n");
        assert_eq!(values.len(), 1);
        assert_eq!(values["host"], Value::from("example"));
    }

    #[test]
    fn decode_splits_at_first_separator() {
        let values = decode("query=a=b\n");
        assert_eq!(values["query"], Value::from("a=b"));
    }

    #[test]
    fn decode_does_not_trim() {
        let values = decode("key = 5\n");
        assert_eq!(values["key "], Value::from(" 5"));
    }

    #[test]
    fn decode_booleans_stay_strings() {
        let values = decode("debug=true\n");
        assert_eq!(values["debug"], Value::from("true"));
    }

    #[test]
    fn decode_empty_value_is_empty_string() {
        let values = decode("empty=\n");
        assert_eq!(values["empty"], Value::from(""));
    }

    #[test]
    fn decode_handles_crlf() {
        let values = decode("a=1\r\nb=two\r\n");
        assert_eq!(values["a"], Value::Float(1.0));
        assert_eq!(values["b"], Value::from("two"));
    }

    #[test]
    fn decode_later_duplicate_wins() {
        let values = decode("a=1\na=2\n");
        assert_eq!(values["a"], Value::Float(2.0));
    }

    #[test]
    fn decode_overflowing_number_stays_string() {
        let values = decode("x=1e400\ny=-1e400\n");
        assert_eq!(values["x"], Value::from("1e400"));
        assert_eq!(values["y"], Value::from("-1e400"));
    }

    #[test]
    fn decode_infinity_literal_is_number() {
        let values = decode("hi=inf\nlo=-infinity\n");
        assert_eq!(values["hi"], Value::Float(f64::INFINITY));
        assert_eq!(values["lo"], Value::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn decode_invalid_utf8_reports_line() {
        let err = LineCodec.decode(b"ok=1\nbad=\xff\xfe\n").unwrap_err();
        assert!(matches!(err, CodecError::Line { line: 2, .. }));
        assert!(err.is_decode());
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    #[test]
    fn encode_scalars_sorted_by_key() {
        let mut values = ValueMap::new();
        values.insert("b".into(), Value::Bool(true));
        values.insert("a".into(), Value::Float(1.5));
        values.insert("c".into(), Value::from("text"));
        values.insert("d".into(), Value::Int(-4));
        values.insert("e".into(), Value::Uint(9));
        let text = String::from_utf8(LineCodec.encode(&values).unwrap()).unwrap();
        assert_eq!(text, "a=1.5\nb=true\nc=text\nd=-4\ne=9\n");
    }

    #[test]
    fn encode_skips_collections_and_null() {
        let mut values = ValueMap::new();
        values.insert("list".into(), Value::Seq(vec![Value::Float(1.0)]));
        values.insert("map".into(), Value::Map(ValueMap::new()));
        values.insert("nothing".into(), Value::Null);
        values.insert("kept".into(), Value::from("yes"));
        let text = String::from_utf8(LineCodec.encode(&values).unwrap()).unwrap();
        assert_eq!(text, "kept=yes\n");
    }

    #[test]
    fn encode_skips_entries_that_would_split_or_merge_lines() {
        let mut values = ValueMap::new();
        values.insert("motd".into(), Value::from("hi\nadmin=true"));
        values.insert("a=b".into(), Value::from("v"));
        values.insert("#hidden".into(), Value::from("v"));
        values.insert("tail".into(), Value::from("x\r"));
        values.insert("multi\nline".into(), Value::Float(1.0));
        values.insert("ok".into(), Value::from("a=b # not a comment"));
        let bytes = LineCodec.encode(&values).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "ok=a=b # not a comment\n"
        );

        let reloaded = LineCodec.decode(&bytes).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(!reloaded.contains_key("admin"));
        assert_eq!(reloaded["ok"], Value::from("a=b # not a comment"));
    }

    #[test]
    fn numeric_looking_string_reloads_as_number() {
        let mut values = ValueMap::new();
        values.insert("pi".into(), Value::from("3.14"));
        let bytes = LineCodec.encode(&values).unwrap();
        let reloaded = LineCodec.decode(&bytes).unwrap();
        assert_eq!(reloaded["pi"], Value::Float(3.14));
    }

    #[test]
    fn bool_reloads_as_string() {
        let mut values = ValueMap::new();
        values.insert("on".into(), Value::Bool(false));
        let bytes = LineCodec.encode(&values).unwrap();
        let reloaded = LineCodec.decode(&bytes).unwrap();
        assert_eq!(reloaded["on"], Value::from("false"));
    }
}
