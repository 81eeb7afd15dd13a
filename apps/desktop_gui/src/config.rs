use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use clap::Parser;
use serde::de::DeserializeOwned;

pub const DEFAULT_CONFIG_FILE: &str = "delivery_form.toml";

const MAX_WINDOW_DIMENSION: f32 = 8192.0;
const MAX_SIGNATURE_DIMENSION: u32 = 4096;
const MAX_PEN_WIDTH: f32 = 64.0;

#[derive(Parser, Debug, Default)]
#[command(name = "desktop_gui", about = "Actas de Entrega: delivery records form")]
pub struct Args {
    /// Settings file; a missing default file is not an error.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_parser = parse_window_dimension)]
    pub window_width: Option<f32>,
    #[arg(long, value_parser = parse_window_dimension)]
    pub window_height: Option<f32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SIGNATURE_DIMENSION as i64))]
    pub signature_width: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SIGNATURE_DIMENSION as i64))]
    pub signature_height: Option<u32>,
    #[arg(long, value_parser = parse_pen_width)]
    pub pen_width: Option<f32>,
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    pub signature_width: u32,
    pub signature_height: u32,
    pub pen_width: f32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 720.0,
            window_height: 900.0,
            signature_width: 325,
            signature_height: 200,
            pen_width: 2.5,
            log_filter: "info".into(),
        }
    }
}

/// Resolved settings plus the entries that were skipped on the way.
/// Logging is not up yet while loading, so the skips are reported afterwards.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub ignored: Vec<String>,
}

/// Defaults, then the settings file, then environment, then flags.
pub fn load_settings(args: &Args) -> anyhow::Result<LoadedSettings> {
    let mut settings = Settings::default();
    let mut ignored = Vec::new();

    match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            apply_file(&mut settings, &raw, &mut ignored)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        }
        None => {
            if let Some(raw) = read_optional(Path::new(DEFAULT_CONFIG_FILE)) {
                if let Err(err) = apply_file(&mut settings, &raw, &mut ignored) {
                    ignored.push(format!("{DEFAULT_CONFIG_FILE}: {err:#}"));
                }
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok(), &mut ignored);
    apply_args(&mut settings, args);
    Ok(LoadedSettings { settings, ignored })
}

fn read_optional(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn window_dimension(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0 && value <= MAX_WINDOW_DIMENSION).then_some(value)
}

fn signature_dimension(value: u32) -> Option<u32> {
    (value > 0 && value <= MAX_SIGNATURE_DIMENSION).then_some(value)
}

fn pen_width(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0 && value <= MAX_PEN_WIDTH).then_some(value)
}

fn log_filter(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn parse_window_dimension(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.parse().map_err(|err| format!("{err}"))?;
    window_dimension(value)
        .ok_or_else(|| format!("expected a size above 0 and at most {MAX_WINDOW_DIMENSION}"))
}

fn parse_pen_width(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.parse().map_err(|err| format!("{err}"))?;
    pen_width(value).ok_or_else(|| format!("expected a width above 0 and at most {MAX_PEN_WIDTH}"))
}

/// Only a file that is not TOML at all is an error; each key is checked on
/// its own and a bad one leaves the previous value in place.
fn apply_file(settings: &mut Settings, raw: &str, ignored: &mut Vec<String>) -> anyhow::Result<()> {
    let table: toml::Table = raw.parse()?;

    if let Some(v) = file_entry(&table, "window_width", window_dimension, ignored) {
        settings.window_width = v;
    }
    if let Some(v) = file_entry(&table, "window_height", window_dimension, ignored) {
        settings.window_height = v;
    }
    if let Some(v) = file_entry(&table, "signature_width", signature_dimension, ignored) {
        settings.signature_width = v;
    }
    if let Some(v) = file_entry(&table, "signature_height", signature_dimension, ignored) {
        settings.signature_height = v;
    }
    if let Some(v) = file_entry(&table, "pen_width", pen_width, ignored) {
        settings.pen_width = v;
    }
    if let Some(v) = file_entry(&table, "log_filter", log_filter, ignored) {
        settings.log_filter = v;
    }
    Ok(())
}

fn file_entry<T: DeserializeOwned>(
    table: &toml::Table,
    key: &str,
    accept: fn(T) -> Option<T>,
    ignored: &mut Vec<String>,
) -> Option<T> {
    let value = table.get(key)?;
    let accepted = value.clone().try_into::<T>().ok().and_then(accept);
    if accepted.is_none() {
        ignored.push(format!("settings file: {key} = {value}"));
    }
    accepted
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
    ignored: &mut Vec<String>,
) {
    if let Some(v) = env_entry(
        &lookup,
        &["DELIVERY_FORM_WINDOW_WIDTH", "APP__WINDOW_WIDTH"],
        window_dimension,
        ignored,
    ) {
        settings.window_width = v;
    }
    if let Some(v) = env_entry(
        &lookup,
        &["DELIVERY_FORM_WINDOW_HEIGHT", "APP__WINDOW_HEIGHT"],
        window_dimension,
        ignored,
    ) {
        settings.window_height = v;
    }
    if let Some(v) = env_entry(
        &lookup,
        &["DELIVERY_FORM_SIGNATURE_WIDTH", "APP__SIGNATURE_WIDTH"],
        signature_dimension,
        ignored,
    ) {
        settings.signature_width = v;
    }
    if let Some(v) = env_entry(
        &lookup,
        &["DELIVERY_FORM_SIGNATURE_HEIGHT", "APP__SIGNATURE_HEIGHT"],
        signature_dimension,
        ignored,
    ) {
        settings.signature_height = v;
    }
    if let Some(v) = env_entry(
        &lookup,
        &["DELIVERY_FORM_PEN_WIDTH", "APP__PEN_WIDTH"],
        pen_width,
        ignored,
    ) {
        settings.pen_width = v;
    }
    if let Some(v) = env_entry(
        &lookup,
        &["RUST_LOG", "DELIVERY_FORM_LOG", "APP__LOG_FILTER"],
        log_filter,
        ignored,
    ) {
        settings.log_filter = v;
    }
}

/// Later names win. A value that fails to parse or is out of range is skipped.
fn env_entry<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    names: &[&str],
    accept: fn(T) -> Option<T>,
    ignored: &mut Vec<String>,
) -> Option<T> {
    let (name, raw) = names
        .iter()
        .rev()
        .find_map(|&name| lookup(name).map(|raw| (name, raw)))?;
    let accepted = raw.trim().parse::<T>().ok().and_then(accept);
    if accepted.is_none() {
        ignored.push(format!("environment: {name}={raw}"));
    }
    accepted
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(v) = args.window_width {
        settings.window_width = v;
    }
    if let Some(v) = args.window_height {
        settings.window_height = v;
    }
    if let Some(v) = args.signature_width {
        settings.signature_width = v;
    }
    if let Some(v) = args.signature_height {
        settings.signature_height = v;
    }
    if let Some(v) = args.pen_width {
        settings.pen_width = v;
    }
    if let Some(v) = &args.log_filter {
        settings.log_filter = v.clone();
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
