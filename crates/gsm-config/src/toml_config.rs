use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use super::stack_config::{CfgChannels, CfgGprs, CfgTimers, SharedConfig, StackConfig, default_pdch_poll_ms, default_t200_ms};

/// Build `SharedConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref ch) = root.channels {
        if !ch.extra.is_empty() {
            return Err(format!("Unrecognized fields: channels::{:?}", sorted_keys(&ch.extra)).into());
        }
        if let Some(ref gprs) = ch.gprs {
            if !gprs.extra.is_empty() {
                return Err(format!("Unrecognized fields: channels.gprs::{:?}", sorted_keys(&gprs.extra)).into());
            }
        }
    }
    if let Some(ref t) = root.timers {
        if !t.extra.is_empty() {
            return Err(format!("Unrecognized fields in timers: {:?}", sorted_keys(&t.extra)).into());
        }
    }

    let mut cfg = StackConfig {
        debug_log: root.debug_log,
        channels: CfgChannels::default(),
        timers: CfgTimers::default(),
    };

    if let Some(ch) = root.channels {
        apply_channels_patch(&mut cfg.channels, ch);
    }
    if let Some(t) = root.timers {
        apply_timers_patch(&mut cfg.timers, t);
    }

    cfg.validate().map_err(|e| format!("Invalid configuration: {}", e))?;
    Ok(SharedConfig::from_config(cfg))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    from_reader(BufReader::new(f))
}

fn apply_channels_patch(dst: &mut CfgChannels, src: ChannelsDto) {
    if let Some(v) = src.sdcch_count {
        dst.sdcch_count = v;
    }
    if let Some(v) = src.tch_count {
        dst.tch_count = v;
    }
    dst.gprs = src.gprs.map(|g| CfgGprs {
        timeslot: g.timeslot,
        pdch_count: g.pdch_count,
    });
}

fn apply_timers_patch(dst: &mut CfgTimers, src: TimersDto) {
    dst.t200_ms = src.t200_ms;
    dst.establish_timeout_ms = src.establish_timeout_ms;
    dst.pdch_poll_ms = src.pdch_poll_ms;
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    channels: Option<ChannelsDto>,

    #[serde(default)]
    timers: Option<TimersDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ChannelsDto {
    sdcch_count: Option<u8>,
    tch_count: Option<u8>,

    #[serde(default)]
    gprs: Option<GprsDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct GprsDto {
    timeslot: u8,
    #[serde(default = "default_pdch_count")]
    pdch_count: u8,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

fn default_pdch_count() -> u8 {
    1
}

#[derive(Deserialize)]
struct TimersDto {
    #[serde(default = "default_t200_ms")]
    t200_ms: u64,
    establish_timeout_ms: Option<u64>,
    #[serde(default = "default_pdch_poll_ms")]
    pdch_poll_ms: u64,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
