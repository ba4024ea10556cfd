use std::path::PathBuf;

use kvconf_codec::CodecKind;
use serde::{Deserialize, Serialize};

/// Where a store lives and how it is encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub codec: CodecKind,
    /// Create missing parent directories when saving.
    pub create_dirs: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>, codec: CodecKind) -> Self {
        Self {
            path: path.into(),
            codec,
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config.json"),
            codec: CodecKind::Json,
            create_dirs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.path, PathBuf::from("config.json"));
        assert_eq!(c.codec, CodecKind::Json);
        assert!(!c.create_dirs);
    }

    #[test]
    fn deserialize_partial() {
        let c: StoreConfig =
            serde_json::from_str(r#"{"path": "app.cfg", "codec": "line"}"#).unwrap();
        assert_eq!(c, StoreConfig::new("app.cfg", CodecKind::Line));
    }

    #[test]
    fn deserialize_unknown_codec_heals_to_json() {
        let c: StoreConfig = serde_json::from_str(r#"{"codec": "toml"}"#).unwrap();
        assert_eq!(c.codec, CodecKind::Json);
    }
}
