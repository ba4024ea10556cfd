use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kvconf_codec::CodecKind;
use kvconf_store::StoreConfig;

#[derive(Parser)]
#[command(
    name = "kvconf",
    about = "Inspect and edit kvconf configuration files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file to operate on
    #[arg(short, long, global = true, env = "KVCONF_FILE", default_value = "config.json")]
    pub file: PathBuf,

    /// File encoding: `json` or `line` (anything else is read as json)
    #[arg(long, global = true, env = "KVCONF_FORMAT", default_value = "json")]
    pub format: String,

    /// Create missing parent directories when saving
    #[arg(long, global = true)]
    pub create_dirs: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.file.clone(),
            codec: CodecKind::from(self.format.as_str()),
            create_dirs: self.create_dirs,
        }
    }
}

/// Static type to read an entry as, or to store a value as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Number,
    Bool,
    /// Any JSON value (arrays and objects included)
    Json,
    /// RFC 3339 timestamp
    Time,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one entry
    Get(GetArgs),
    /// Set one entry and save the file
    Put(PutArgs),
    /// Delete one entry and save the file
    Remove(RemoveArgs),
    /// Print every entry with its kind
    Dump,
    /// List entry names
    Keys,
}

#[derive(Args)]
pub struct GetArgs {
    pub key: String,
    /// Coerce the entry to this type instead of printing it raw
    #[arg(long = "as", value_enum)]
    pub as_type: Option<ValueType>,
}

#[derive(Args)]
pub struct PutArgs {
    pub key: String,
    pub value: String,
    #[arg(long = "as", value_enum, default_value = "string")]
    pub as_type: ValueType,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub key: String,
}
