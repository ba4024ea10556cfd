use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::json::JsonCodec;
use crate::line::LineCodec;
use crate::traits::Codec;

/// Selects the on-disk encoding of a store.
///
/// Selectors coming from outside the program (a numeric tag, a name in a
/// config file or on the command line) are resolved with
/// [`CodecKind::from_tag`] or `From<&str>`. Anything unrecognized resolves to
/// [`CodecKind::Json`], so a store always ends up recording a kind it can
/// actually read and write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CodecKind {
    /// A single JSON object.
    #[default]
    Json,
    /// `key=value` lines with `#` comments.
    Line,
}

impl CodecKind {
    /// Numeric tag of this kind (`0` for JSON, `1` for lines).
    pub fn tag(self) -> u8 {
        match self {
            Self::Json => 0,
            Self::Line => 1,
        }
    }

    /// Resolve a numeric tag. Unknown tags fall back to JSON.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0 => Self::Json,
            1 => Self::Line,
            other => {
                warn!(tag = other, "unrecognized codec tag, falling back to json");
                Self::Json
            }
        }
    }

    /// Lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Line => "line",
        }
    }

    /// The codec implementing this kind.
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Json => &JsonCodec,
            Self::Line => &LineCodec,
        }
    }
}

impl From<&str> for CodecKind {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "line" | "lines" => Self::Line,
            other => {
                warn!(name = other, "unrecognized codec name, falling back to json");
                Self::Json
            }
        }
    }
}

impl From<String> for CodecKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<CodecKind> for String {
    fn from(kind: CodecKind) -> Self {
        kind.name().to_owned()
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
