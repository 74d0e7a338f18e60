//! Simple TOML parser for the panel description
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the panel configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Flat integer arrays: alternates = [-1, 0]
//! - [encoder] and [option.name] section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys outside section headers

use super::types::{EncoderConfig, OptionConfig, PanelConfig};
use crate::option::{AlternatePolicy, Title, MAX_ALTERNATES};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Only one of `min` and `max` given
    IncompleteRange,
}

/// Current parsing context
#[derive(Debug, Clone)]
enum Section {
    Root,
    Encoder,
    Option,
}

/// Parse TOML configuration into PanelConfig
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;
    let mut current_option: Option<OptionConfig> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_option(&mut config, &mut current_option)?;

            let header = line[1..line.len() - 1].trim();
            section = match header {
                "encoder" => Section::Encoder,
                _ => match header.strip_prefix("option.") {
                    Some(name) => {
                        current_option = Some(OptionConfig {
                            name: parse_title(name)?,
                            ..OptionConfig::default()
                        });
                        Section::Option
                    }
                    None => return Err(ParseError::InvalidSection),
                },
            };
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            return Err(ParseError::InvalidValue);
        };

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Encoder => apply_encoder(&mut config.encoder, key, value)?,
            Section::Option => {
                if let Some(option) = current_option.as_mut() {
                    apply_option(option, key, value)?;
                }
            }
        }
    }

    save_option(&mut config, &mut current_option)?;

    Ok(config)
}

fn save_option(
    config: &mut PanelConfig,
    current: &mut Option<OptionConfig>,
) -> Result<(), ParseError> {
    let Some(option) = current.take() else {
        return Ok(());
    };

    if option.min.is_some() != option.max.is_some() {
        return Err(ParseError::IncompleteRange);
    }

    config
        .options
        .push(option)
        .map_err(|_| ParseError::TooManyItems)
}

fn apply_encoder(encoder: &mut EncoderConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "pin_a" => encoder.pin_a = parse_int(value)?,
        "pin_b" => encoder.pin_b = parse_int(value)?,
        "pin_select" => encoder.pin_select = parse_int(value)?,
        "debounce_ms" => encoder.debounce_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_option(option: &mut OptionConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "name" => option.name = parse_title(parse_string(value))?,
        "value" => option.value = parse_int(value)?,
        "min" => option.min = Some(parse_int(value)?),
        "max" => option.max = Some(parse_int(value)?),
        "multiplier" => option.multiplier = parse_int(value)?,
        "zeroable" => option.zeroable = parse_bool(value)?,
        "alternates" => option.alternates = parse_int_array(value)?,
        "alternate_policy" => option.alternate_policy = parse_policy(value)?,
        "alternate" => option.alternate = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_title(value: &str) -> Result<Title, ParseError> {
    Title::try_from(value).map_err(|_| ParseError::TooManyItems)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an integer array like "[-1, 0, 5]"
fn parse_int_array(value: &str) -> Result<heapless::Vec<i32, MAX_ALTERNATES>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut values = heapless::Vec::new();
    for part in inner.split(',') {
        let part = part.trim();
        // Allow a trailing comma
        if part.is_empty() {
            continue;
        }
        values
            .push(parse_int(part)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(values)
}

/// Parse alternate policy
fn parse_policy(value: &str) -> Result<AlternatePolicy, ParseError> {
    match parse_string(value) {
        "clamp" | "Clamp" => Ok(AlternatePolicy::Clamp),
        "wrap" | "Wrap" => Ok(AlternatePolicy::Wrap),
        _ => Err(ParseError::InvalidValue),
    }
}
