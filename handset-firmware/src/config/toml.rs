//! Minimal TOML reader for handset.toml
//!
//! Handles only the subset the handset configuration uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing ones outside strings
//!
//! Keys left out keep their defaults, so an empty document yields
//! `HandsetConfig::default()`.

use handset_core::config::{GameRules, LinkConfig, StickConfig, TimingConfig};
use handset_core::HandsetConfig;
use handset_protocol::PixelOrder;

/// Parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Header names a section the firmware does not know
    UnknownSection(usize),
    /// Key is not valid in its section
    UnknownKey(usize),
    /// Value does not parse as the key's type
    InvalidValue(usize),
    /// Line is neither a header nor `key = value`
    Malformed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Stick,
    Game,
    Link,
}

/// Parse a handset.toml document
pub fn parse_config(input: &str) -> Result<HandsetConfig, ParseError> {
    let mut config = HandsetConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line).ok_or(ParseError::UnknownSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Malformed(line_no))?;
        let applied = match section {
            Section::Root => Err(Field::Unknown),
            Section::Timing => apply_timing(&mut config.timing, key, value),
            Section::Stick => apply_stick(&mut config.stick, key, value),
            Section::Game => apply_game(&mut config.game, key, value),
            Section::Link => apply_link(&mut config.link, key, value),
        };
        applied.map_err(|e| match e {
            Field::Unknown => ParseError::UnknownKey(line_no),
            Field::Invalid => ParseError::InvalidValue(line_no),
        })?;
    }

    Ok(config)
}

/// Why a key was rejected
enum Field {
    Unknown,
    Invalid,
}

fn parse_section_header(line: &str) -> Option<Section> {
    let name = line.strip_prefix('[')?;
    // Allow a trailing comment after the header
    let end = name.find(']')?;
    match name[..end].trim() {
        "timing" => Some(Section::Timing),
        "stick" => Some(Section::Stick),
        "game" => Some(Section::Game),
        "link" => Some(Section::Link),
        _ => None,
    }
}

fn apply_timing(t: &mut TimingConfig, key: &str, value: &str) -> Result<(), Field> {
    let slot = match key {
        "launcher_ms" => &mut t.launcher_ms,
        "lock_ms" => &mut t.lock_ms,
        "camera_ms" => &mut t.camera_ms,
        "compass_ms" => &mut t.compass_ms,
        "weather_ms" => &mut t.weather_ms,
        "game_tick_ms" => &mut t.game_tick_ms,
        "input_ms" => &mut t.input_ms,
        "clock_refresh_ticks" => &mut t.clock_refresh_ticks,
        "lock_message_tick" => &mut t.lock_message_tick,
        "location_refresh_polls" => &mut t.location_refresh_polls,
        "weather_refresh_polls" => &mut t.weather_refresh_polls,
        "launcher_cooldown" => {
            t.launcher_cooldown = parse_int(value)?;
            return Ok(());
        }
        _ => return Err(Field::Unknown),
    };
    *slot = parse_int(value)?;
    Ok(())
}

fn apply_stick(s: &mut StickConfig, key: &str, value: &str) -> Result<(), Field> {
    match key {
        "center" => s.center = parse_int(value)?,
        "dead_zone" => s.dead_zone = parse_int(value)?,
        "swap_axes" => s.swap_axes = parse_bool(value)?,
        "invert_x" => s.invert_x = parse_bool(value)?,
        "invert_y" => s.invert_y = parse_bool(value)?,
        _ => return Err(Field::Unknown),
    }
    Ok(())
}

fn apply_game(g: &mut GameRules, key: &str, value: &str) -> Result<(), Field> {
    match key {
        "seed" => g.seed = parse_int(value)?,
        "spawn_interval" => g.spawn_interval = parse_int(value)?,
        "move_cooldown" => g.move_cooldown = parse_int(value)?,
        "outcome_pause_ms" => g.outcome_pause_ms = parse_int(value)?,
        _ => return Err(Field::Unknown),
    }
    Ok(())
}

fn apply_link(l: &mut LinkConfig, key: &str, value: &str) -> Result<(), Field> {
    match key {
        "baud" => l.baud = parse_int(value)?,
        "pixel_order" => {
            l.pixel_order = match parse_string(value) {
                "low_first" => PixelOrder::LowFirst,
                "high_first" => PixelOrder::HighFirst,
                _ => return Err(Field::Invalid),
            }
        }
        _ => return Err(Field::Unknown),
    }
    Ok(())
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
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

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Integers may use `_` separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, Field> {
    let mut digits = [0u8; 24];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        *digits.get_mut(len).ok_or(Field::Invalid)? = b;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .map_err(|_| Field::Invalid)?
        .parse()
        .map_err(|_| Field::Invalid)
}

fn parse_bool(value: &str) -> Result<bool, Field> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Field::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config(""), Ok(HandsetConfig::default()));
        assert_eq!(
            parse_config("# only a comment\n\n"),
            Ok(HandsetConfig::default())
        );
    }

    #[test]
    fn test_embedded_file_parses() {
        let config = parse_config(include_str!("../../handset.toml")).unwrap();
        let defaults = HandsetConfig::default();
        assert_eq!(config.timing, defaults.timing);
        assert_eq!(config.game, defaults.game);
        assert_eq!(config.link.baud, defaults.link.baud);
        // Board specifics
        assert_eq!(config.link.pixel_order, PixelOrder::HighFirst);
        assert!(config.stick.swap_axes);
        assert!(config.stick.invert_x);
        assert!(!config.stick.invert_y);
    }

    #[test]
    fn test_sections_and_comments() {
        let input = "\
[timing]
launcher_ms = 200   # slower menu
[stick]
swap_axes = true
invert_y = true
[game]
seed = 1_000
[link]
baud = 115_200
pixel_order = \"high_first\"  # companion sends big-endian
";
        let config = parse_config(input).unwrap();
        assert_eq!(config.timing.launcher_ms, 200);
        assert_eq!(config.timing.lock_ms, TimingConfig::default().lock_ms);
        assert!(config.stick.swap_axes);
        assert!(config.stick.invert_y);
        assert!(!config.stick.invert_x);
        assert_eq!(config.game.seed, 1000);
        assert_eq!(config.link.baud, 115_200);
        assert_eq!(config.link.pixel_order, PixelOrder::HighFirst);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_config("[timing]\nbogus = 1\n"),
            Err(ParseError::UnknownKey(2))
        );
        assert_eq!(
            parse_config("[display]\n"),
            Err(ParseError::UnknownSection(1))
        );
        assert_eq!(
            parse_config("[stick]\ncenter = yes\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[timing]\nlauncher_cooldown = 300\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("\n\njust words\n"),
            Err(ParseError::Malformed(3))
        );
        assert_eq!(parse_config("baud = 9600\n"), Err(ParseError::UnknownKey(1)));
    }

    #[test]
    fn test_key_value_keeps_hash_in_string() {
        assert_eq!(
            parse_key_value("name = \"a#b\" # note"),
            Some(("name", "\"a#b\""))
        );
        assert_eq!(parse_key_value("key ="), None);
        assert_eq!(parse_string("\"low_first\""), "low_first");
    }
}
