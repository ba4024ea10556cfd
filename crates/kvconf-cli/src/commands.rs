use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Utc};
use colored::Colorize;
use kvconf_keys::{parse_bool_literal, Key, TimeKey};
use kvconf_store::ConfigStore;
use kvconf_types::{format_timestamp, parse_timestamp, Value};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = cli.store_config();
    let store = ConfigStore::open(&config)
        .with_context(|| format!("failed to load {}", config.path.display()))?;
    debug!(
        path = %config.path.display(),
        codec = %config.codec,
        entries = store.len(),
        "store opened"
    );
    match cli.command {
        Command::Get(args) => cmd_get(&store, args),
        Command::Put(args) => cmd_put(&store, args),
        Command::Remove(args) => cmd_remove(&store, args),
        Command::Dump => cmd_dump(&store),
        Command::Keys => cmd_keys(&store),
    }
}

/// Parse command-line text into the value stored for `as_type`.
pub fn parse_value(as_type: ValueType, raw: &str) -> anyhow::Result<Value> {
    Ok(match as_type {
        ValueType::String => Value::from(raw),
        ValueType::Number => Value::Float(
            raw.parse::<f64>()
                .with_context(|| format!("{raw:?} is not a number"))?,
        ),
        ValueType::Bool => Value::Bool(
            parse_bool_literal(raw).ok_or_else(|| anyhow!("{raw:?} is not a boolean"))?,
        ),
        ValueType::Json => Value::from_json(
            serde_json::from_str(raw).with_context(|| format!("{raw:?} is not valid JSON"))?,
        ),
        ValueType::Time => Value::String(format_timestamp(&parse_timestamp(raw)?)),
    })
}

fn render_typed(store: &ConfigStore, key: &str, as_type: ValueType) -> anyhow::Result<String> {
    let name = key.to_owned();
    Ok(match as_type {
        ValueType::String => Key::new(name, String::new()).get_err(store)?,
        ValueType::Number => Key::new(name, 0.0f64).get_err(store)?.to_string(),
        ValueType::Bool => Key::new(name, false).get_err(store)?.to_string(),
        ValueType::Time => {
            let epoch = DateTime::<Utc>::default().fixed_offset();
            format_timestamp(&TimeKey::new(name, epoch).get_err(store)?)
        }
        ValueType::Json => {
            let value = store
                .get(key)
                .ok_or_else(|| anyhow!("key not found: {key}"))?;
            serde_json::to_string_pretty(&value.to_json()?)?
        }
    })
}

fn cmd_get(store: &ConfigStore, args: GetArgs) -> anyhow::Result<()> {
    let text = match args.as_type {
        Some(as_type) => render_typed(store, &args.key, as_type)?,
        None => store
            .get(&args.key)
            .ok_or_else(|| anyhow!("key not found: {}", args.key))?
            .to_string(),
    };
    println!("{text}");
    Ok(())
}

fn cmd_put(store: &ConfigStore, args: PutArgs) -> anyhow::Result<()> {
    let value = parse_value(args.as_type, &args.value)?;
    println!("{} {} = {}", "✓".green().bold(), args.key.bold(), value);
    store.put(args.key, value);
    store.save()?;
    Ok(())
}

fn cmd_remove(store: &ConfigStore, args: RemoveArgs) -> anyhow::Result<()> {
    if store.remove(&args.key).is_none() {
        bail!("key not found: {}", args.key);
    }
    store.save()?;
    println!("{} removed {}", "✓".green().bold(), args.key.bold());
    Ok(())
}

fn cmd_dump(store: &ConfigStore) -> anyhow::Result<()> {
    let values = store.get_copy_of_config();
    if values.is_empty() {
        println!("{} is empty.", store.path().display());
        return Ok(());
    }
    for (key, value) in &values {
        println!(
            "{} = {}  {}",
            key.bold(),
            value,
            format!("({})", value.kind()).dimmed()
        );
    }
    Ok(())
}

fn cmd_keys(store: &ConfigStore) -> anyhow::Result<()> {
    for key in store.keys() {
        println!("{key}");
    }
    Ok(())
}
