//! Config command - inspect and edit the JSON configuration file.
//!
//! Keys are dotted paths into the config (`batch.jobs`,
//! `extraction.counterparty_tokens`). Only keys that already exist in the
//! default layout can be read or written.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use facturas_core::FacturasConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value (e.g. "batch.jobs")
    Get { key: String },

    /// Change one value; lists take JSON or comma separated items
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (default: the active config path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} {} not found, showing defaults", style("ℹ").blue(), path.display());
            }
            println!("{}", serde_json::to_string_pretty(&load_or_default(&path)?)?);
            Ok(())
        }
        ConfigCommand::Init(init) => init_config(init.output.unwrap_or(path), init.force),
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = lookup(&json, &key).ok_or_else(|| unknown_key(&json, &key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set_value(&path, &key, &value),
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!("\nRun 'facturas config init' to create a configuration file.");
            }
            Ok(())
        }
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<FacturasConfig> {
    if path.exists() {
        FacturasConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))
    } else {
        Ok(FacturasConfig::default())
    }
}

fn save(config: &FacturasConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn init_config(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    save(&FacturasConfig::default(), &path)?;
    println!("{} Created configuration file at {}", style("✓").green(), path.display());
    Ok(())
}

fn set_value(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(load_or_default(path)?)?;

    let current = lookup(&json, key).ok_or_else(|| unknown_key(&json, key))?;
    let value = parse_value(current, raw);
    debug!("Setting {} from {} to {}", key, current, value);

    assign(&mut json, key, value.clone())?;

    let config: FacturasConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.validate()?;
    save(&config, path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

/// Interpret a command-line value against the type of the current one.
///
/// Strings are taken verbatim so paths and numbers-as-names survive. For
/// everything else JSON is tried first; a list also accepts `a,b,c`.
fn parse_value(current: &Value, raw: &str) -> Value {
    if current.is_string() {
        return Value::String(raw.to_string());
    }
    if let Ok(parsed) = serde_json::from_str(raw) {
        return parsed;
    }
    if current.is_array() {
        return Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        );
    }
    Value::String(raw.to_string())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.as_object()?.get(part))
}

fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = key
        .split('.')
        .try_fold(json, |node, part| node.as_object_mut()?.get_mut(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    *slot = value;
    Ok(())
}

/// Dotted paths of every leaf value.
fn leaf_keys(json: &Value) -> Vec<String> {
    fn walk(node: &Value, prefix: &str, out: &mut Vec<String>) {
        match node.as_object() {
            Some(map) => {
                for (name, child) in map {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    walk(child, &path, out);
                }
            }
            None => out.push(prefix.to_string()),
        }
    }

    let mut keys = Vec::new();
    walk(json, "", &mut keys);
    keys.sort();
    keys
}

fn unknown_key(json: &Value, key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown configuration key '{}'. Valid keys: {}",
        key,
        leaf_keys(json).join(", ")
    )
}
