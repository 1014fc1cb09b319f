//! Build script for thermoloop-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates thermoloop.toml at compile time, first as TOML, then with
//!   the same parser the firmware runs at boot

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Expected shape of a config value
#[derive(Clone, Copy)]
enum Kind {
    /// Integer or float
    Number,
    /// Positive integer
    Count,
    /// Array of four digits 0-9
    Digits,
}

/// Known keys per section
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "pid",
        &[
            ("kp", Kind::Number),
            ("ki", Kind::Number),
            ("kd", Kind::Number),
            ("integral_limit", Kind::Number),
            ("output_min", Kind::Number),
            ("output_max", Kind::Number),
        ],
    ),
    (
        "schedule",
        &[("tick_ms", Kind::Count), ("telemetry_every", Kind::Count)],
    ),
    ("display", &[("prefix", Kind::Digits)]),
    ("serial", &[("baudrate", Kind::Count)]),
];

/// Validate thermoloop.toml configuration at compile time
fn validate_config() {
    // Re-run if thermoloop.toml changes
    println!("cargo:rerun-if-changed=thermoloop.toml");

    let config_path = Path::new("thermoloop.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: thermoloop.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds thermoloop.toml at build time.              ║\n\
            ║  Please create one in the thermoloop-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read thermoloop.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in thermoloop.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = validate_schema(&config);
    errors.extend(validate_ranges(&config));

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in thermoloop.toml                 ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Same parser and validation the firmware runs at boot
    if let Err(e) = thermoloop_core::config::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: thermoloop.toml rejected by the firmware config parser   ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&format!("{:?}", e))
        );
    }

    println!("cargo:warning=thermoloop.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that every section and key is known and has the right shape
fn validate_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (section, value) in root {
        let Some(keys) = SCHEMA
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, keys)| *keys)
        else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some(kind) = keys.iter().find(|(k, _)| k == key).map(|(_, kind)| *kind) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };

            let ok = match kind {
                Kind::Number => value.is_float() || value.is_integer(),
                Kind::Count => matches!(value.as_integer(), Some(n) if n > 0),
                Kind::Digits => value.as_array().is_some_and(|items| {
                    items.len() == 4
                        && items
                            .iter()
                            .all(|d| matches!(d.as_integer(), Some(0..=9)))
                }),
            };
            if !ok {
                let expected = match kind {
                    Kind::Number => "a number",
                    Kind::Count => "a positive integer",
                    Kind::Digits => "an array of four digits 0-9",
                };
                errors.push(format!("[{}] {} must be {}", section, key, expected));
            }
        }
    }

    errors
}

fn number(config: &toml::Value, section: &str, key: &str) -> Option<f64> {
    let value = config.get(section)?.get(key)?;
    value.as_float().or_else(|| value.as_integer().map(|n| n as f64))
}

/// Cross-field checks on the PID limits
fn validate_ranges(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(limit) = number(config, "pid", "integral_limit") {
        if limit <= 0.0 {
            errors.push("[pid] integral_limit must be positive".to_string());
        }
    }

    let min = number(config, "pid", "output_min").unwrap_or(0.0);
    let max = number(config, "pid", "output_max").unwrap_or(255.0);
    if !(0.0..=255.0).contains(&min) || !(0.0..=255.0).contains(&max) {
        errors.push("[pid] output_min/output_max must be 0-255".to_string());
    }
    if min >= max {
        errors.push("[pid] output_min must be below output_max".to_string());
    }

    errors
}
