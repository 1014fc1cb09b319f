//! Minimal TOML parser for the regulator configuration
//!
//! Handles only the subset `thermoloop.toml` uses and needs no allocator.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` with integer, float and flat integer-array values
//! - Digit separators (`1_000`) and a leading `+`
//! - Comments (`# ...`), also after a value
//!
//! Keys that are absent keep their default value.

use super::types::{ConfigError, ControlConfig, PREFIX_DIGITS};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Pid,
    Schedule,
    Display,
    Serial,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pid" => Some(Self::Pid),
            "schedule" => Some(Self::Schedule),
            "display" => Some(Self::Display),
            "serial" => Some(Self::Serial),
            _ => None,
        }
    }
}

/// Parse TOML configuration into a validated [`ControlConfig`]
pub fn parse_config(input: &str) -> Result<ControlConfig, ConfigError> {
    let mut config = ControlConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            section = Section::from_name(name.trim())
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::UnknownKey { line: line_no })?;
        apply(&mut config, section, key.trim(), value.trim(), line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn apply(
    config: &mut ControlConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Pid, "kp") => config.gains.kp = parse_f32(value, line)?,
        (Section::Pid, "ki") => config.gains.ki = parse_f32(value, line)?,
        (Section::Pid, "kd") => config.gains.kd = parse_f32(value, line)?,
        (Section::Pid, "integral_limit") => config.integral_limit = parse_f32(value, line)?,
        (Section::Pid, "output_min") => config.output_min = parse_f32(value, line)?,
        (Section::Pid, "output_max") => config.output_max = parse_f32(value, line)?,
        (Section::Schedule, "tick_ms") => config.tick_period_ms = parse_u32(value, line)?,
        (Section::Schedule, "telemetry_every") => {
            config.telemetry_divisor = parse_u32(value, line)?
        }
        (Section::Display, "prefix") => config.display_prefix = parse_digits(value, line)?,
        (Section::Serial, "baudrate") => config.baudrate = parse_u32(value, line)?,
        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

/// Drop everything from the first `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Longest numeric literal accepted after removing separators
const MAX_NUMBER_LEN: usize = 32;

/// Drop a leading `+` and TOML digit separators (`1_000.0`)
///
/// An underscore must sit between two digits.
fn strip_separators<'a>(value: &str, buf: &'a mut [u8; MAX_NUMBER_LEN]) -> Option<&'a str> {
    let bytes = value.strip_prefix('+').unwrap_or(value).as_bytes();
    let mut len = 0;
    let mut prev_digit = false;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let next_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(prev_digit && next_digit) {
                return None;
            }
            prev_digit = false;
            continue;
        }
        *buf.get_mut(len)? = b;
        len += 1;
        prev_digit = b.is_ascii_digit();
    }

    core::str::from_utf8(&buf[..len]).ok()
}

fn parse_f32(value: &str, line: usize) -> Result<f32, ConfigError> {
    let mut buf = [0u8; MAX_NUMBER_LEN];
    strip_separators(value, &mut buf)
        .and_then(|v| v.parse::<f32>().ok())
        .ok_or(ConfigError::InvalidValue { line })
}

fn parse_u32(value: &str, line: usize) -> Result<u32, ConfigError> {
    let mut buf = [0u8; MAX_NUMBER_LEN];
    strip_separators(value, &mut buf)
        .filter(|v| v.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or(ConfigError::InvalidValue { line })
}

fn parse_digits(value: &str, line: usize) -> Result<[u8; PREFIX_DIGITS], ConfigError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue { line })?;

    let mut digits = [0u8; PREFIX_DIGITS];
    let mut count = 0;
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = digits
            .get_mut(count)
            .ok_or(ConfigError::InvalidValue { line })?;
        let digit = parse_u32(item, line)?;
        *slot = u8::try_from(digit).map_err(|_| ConfigError::InvalidValue { line })?;
        count += 1;
    }

    if count != PREFIX_DIGITS {
        return Err(ConfigError::InvalidValue { line });
    }
    Ok(digits)
}
