//! Build script for handset-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates handset.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use handset_core::HandsetConfig;

/// Sections the firmware understands
const SECTIONS: &[&str] = &["timing", "stick", "game", "link"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate handset.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=handset.toml");

    let config_path = Path::new("handset.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: handset.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds handset.toml from the crate directory.      ║\n\
            ║  An empty file selects the built-in defaults.                    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read handset.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail("Invalid TOML syntax in handset.toml", &e.to_string()),
    };

    validate_sections(&table);

    // Field names, types and the pixel order strings
    let config: HandsetConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid settings in handset.toml", &e.to_string()),
    };

    validate_values(&config);

    println!("cargo:warning=handset.toml validated successfully");
}

/// Reject unknown sections and keys
fn validate_sections(table: &toml::Table) {
    let defaults = match toml::Table::try_from(HandsetConfig::default()) {
        Ok(defaults) => defaults,
        Err(e) => fail("Could not serialize default configuration", &e.to_string()),
    };

    let mut errors = Vec::new();
    for (name, value) in table {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
            continue;
        }
        let Some(section) = value.as_table() else {
            errors.push(format!("'{}' must be a [section]", name));
            continue;
        };
        let known = defaults.get(name).and_then(|v| v.as_table());
        for key in section.keys() {
            if !known.is_some_and(|k| k.contains_key(key)) {
                errors.push(format!("Unknown key '{}' in [{}]", key, name));
            }
        }
    }

    if !errors.is_empty() {
        fail("Unrecognized entries in handset.toml", &errors.join("\n"));
    }
}

/// Range checks serde cannot express
fn validate_values(config: &HandsetConfig) {
    let mut errors = Vec::new();

    let stick = &config.stick;
    if stick.center > 4095 {
        errors.push(format!("stick.center {} exceeds the 12-bit ADC range", stick.center));
    }
    if stick.dead_zone >= 2048 {
        errors.push(format!("stick.dead_zone {} leaves no usable travel", stick.dead_zone));
    }

    let timing = &config.timing;
    if timing.clock_refresh_ticks == 0 {
        errors.push("timing.clock_refresh_ticks must be at least 1".to_string());
    }
    if timing.lock_message_tick >= timing.clock_refresh_ticks {
        errors.push(format!(
            "timing.lock_message_tick {} is never reached (clock_refresh_ticks {})",
            timing.lock_message_tick, timing.clock_refresh_ticks
        ));
    }
    if timing.location_refresh_polls == 0 || timing.weather_refresh_polls == 0 {
        errors.push("timing refresh intervals must be at least 1".to_string());
    }

    if config.game.spawn_interval == 0 {
        errors.push("game.spawn_interval must be at least 1".to_string());
    }
    if config.link.baud == 0 {
        errors.push("link.baud must be non-zero".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid values in handset.toml", &errors.join("\n"));
    }
}

fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
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
