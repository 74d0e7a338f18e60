//! Build script for shutterdial-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest GPIO number on the RP2040
const MAX_PIN: i64 = 29;

/// Options that fit in the settings menu
const MAX_OPTIONS: usize = 4;

/// Alternate values per option
const MAX_ALTERNATES: usize = 3;

/// Title capacity in bytes
const MAX_TITLE_LEN: usize = 16;

const ENCODER_KEYS: [&str; 4] = ["pin_a", "pin_b", "pin_select", "debounce_ms"];

const OPTION_KEYS: [&str; 9] = [
    "name",
    "value",
    "min",
    "max",
    "multiplier",
    "zeroable",
    "alternates",
    "alternate_policy",
    "alternate",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        fail(
            "panel.toml not found",
            &["The firmware embeds panel.toml from the shutterdial-firmware directory".into()],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read panel.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in panel.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_encoder(&config, &mut errors);
    validate_options(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid panel configuration", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Abort the build with a boxed error report
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", truncate(e)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 62 {
        format!("{}...", line.chars().take(59).collect::<String>())
    } else {
        line.to_string()
    }
}

/// Only [encoder] and [option.*] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match name.as_str() {
            "encoder" | "option" if value.is_table() => {}
            "encoder" | "option" => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("Unknown section [{}]", name)),
        }
    }
}

fn validate_encoder(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(encoder) = config.get("encoder").and_then(|e| e.as_table()) else {
        return;
    };

    for key in encoder.keys() {
        if !ENCODER_KEYS.contains(&key.as_str()) {
            errors.push(format!("[encoder] unknown key '{}'", key));
        }
    }

    let mut pins = Vec::new();
    for key in ["pin_a", "pin_b", "pin_select"] {
        match encoder.get(key) {
            Some(toml::Value::Integer(pin)) if (0..=MAX_PIN).contains(pin) => {
                if pins.contains(pin) {
                    errors.push(format!("[encoder] {} = {} is used twice", key, pin));
                }
                pins.push(*pin);
            }
            Some(_) => errors.push(format!("[encoder] {} must be a GPIO 0-{}", key, MAX_PIN)),
            None => {}
        }
    }

    if let Some(debounce) = encoder.get("debounce_ms") {
        if !matches!(debounce, toml::Value::Integer(ms) if u32::try_from(*ms).is_ok()) {
            errors.push("[encoder] debounce_ms must be 0-4294967295".into());
        }
    }
}

fn validate_options(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(options) = config.get("option").and_then(|o| o.as_table()) else {
        return;
    };

    if options.len() > MAX_OPTIONS {
        errors.push(format!("At most {} [option.*] sections", MAX_OPTIONS));
    }

    for (name, option) in options {
        let Some(option) = option.as_table() else {
            errors.push(format!("[option.{}] must be a table", name));
            continue;
        };

        for key in option.keys() {
            if !OPTION_KEYS.contains(&key.as_str()) {
                errors.push(format!("[option.{}] unknown key '{}'", name, key));
            }
        }

        let title = option
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or(name);
        if title.len() > MAX_TITLE_LEN {
            errors.push(format!(
                "[option.{}] name longer than {} bytes",
                name, MAX_TITLE_LEN
            ));
        }

        for key in ["value", "min", "max", "multiplier"] {
            if let Some(value) = option.get(key) {
                if !matches!(value, toml::Value::Integer(v) if i32::try_from(*v).is_ok()) {
                    errors.push(format!("[option.{}] {} must be a 32-bit integer", name, key));
                }
            }
        }

        match (option.get("min"), option.get("max")) {
            (Some(toml::Value::Integer(min)), Some(toml::Value::Integer(max))) if min > max => {
                errors.push(format!("[option.{}] min {} is above max {}", name, min, max));
            }
            (Some(_), None) | (None, Some(_)) => {
                errors.push(format!("[option.{}] needs both min and max", name));
            }
            _ => {}
        }

        if let Some(toml::Value::Integer(0)) = option.get("multiplier") {
            errors.push(format!("[option.{}] multiplier cannot be 0", name));
        }

        if let Some(zeroable) = option.get("zeroable") {
            if !zeroable.is_bool() {
                errors.push(format!("[option.{}] zeroable must be true or false", name));
            }
        }

        match option.get("alternates") {
            Some(toml::Value::Array(values)) => {
                if values.len() > MAX_ALTERNATES {
                    errors.push(format!(
                        "[option.{}] at most {} alternates",
                        name, MAX_ALTERNATES
                    ));
                }
                if !values.iter().all(|v| v.is_integer()) {
                    errors.push(format!("[option.{}] alternates must be integers", name));
                }
            }
            Some(_) => errors.push(format!("[option.{}] alternates must be an array", name)),
            None => {}
        }

        if let Some(policy) = option.get("alternate_policy") {
            if !matches!(policy.as_str(), Some("clamp" | "wrap")) {
                errors.push(format!(
                    "[option.{}] alternate_policy must be 'clamp' or 'wrap'",
                    name
                ));
            }
        }

        match option.get("alternate") {
            Some(toml::Value::Boolean(true)) => {
                let empty = option
                    .get("alternates")
                    .and_then(|v| v.as_array())
                    .map_or(true, |values| values.is_empty());
                if empty {
                    errors.push(format!(
                        "[option.{}] alternate needs at least one alternate",
                        name
                    ));
                }
            }
            Some(toml::Value::Boolean(false)) | None => {}
            Some(_) => errors.push(format!("[option.{}] alternate must be true or false", name)),
        }
    }
}
