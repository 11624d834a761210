//! Fixed-size text records and their field parser.
//!
//! Record format:
//! - Exactly 128 bytes on the wire, padded by the companion
//! - Last byte forced to NUL by the receiver; text ends at the first NUL
//! - Fields separated by `\n`
//!
//! Parsing never fails: a missing delimiter leaves the fields after it as
//! `None`, and callers skip `None` fields when drawing.

/// Size of every text response (time, location, weather)
pub const TEXT_RECORD_LEN: usize = 128;

/// Receive buffer for one text response
#[derive(Clone, PartialEq, Eq)]
pub struct TextRecord {
    buf: [u8; TEXT_RECORD_LEN],
}

impl Default for TextRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for TextRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TextRecord").field(&self.text()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextRecord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextRecord({=str})", self.text())
    }
}

impl TextRecord {
    /// Create an empty record
    pub const fn new() -> Self {
        Self {
            buf: [0; TEXT_RECORD_LEN],
        }
    }

    /// Build a record from received bytes, forcing the terminator
    ///
    /// Shorter input is zero padded, longer input is truncated.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut record = Self::new();
        let len = bytes.len().min(TEXT_RECORD_LEN);
        record.buf[..len].copy_from_slice(&bytes[..len]);
        record.seal();
        record
    }

    /// Buffer to receive into
    pub fn as_mut_bytes(&mut self) -> &mut [u8; TEXT_RECORD_LEN] {
        &mut self.buf
    }

    /// Force the NUL terminator in the last byte
    pub fn seal(&mut self) {
        self.buf[TEXT_RECORD_LEN - 1] = 0;
    }

    /// The record text up to the first NUL
    ///
    /// Bytes that are not valid UTF-8 end the text early.
    pub fn text(&self) -> &str {
        let end = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TEXT_RECORD_LEN);
        let bytes = &self.buf[..end];
        match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// First line of the record, without the line terminator
    pub fn first_line(&self) -> &str {
        next_field(self.text()).0
    }

    /// Parse the record as a weather report
    pub fn weather(&self) -> WeatherReport<'_> {
        WeatherReport::parse(self.text())
    }
}

/// Weather record split into its fields
///
/// Wire layout: `"City, Country\nTEMP\nCOND\nDETAIL\n"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport<'a> {
    /// City (always present, possibly empty)
    pub city: &'a str,
    /// Country or region, after the last comma of the first line
    pub country: Option<&'a str>,
    /// Temperature line
    pub temperature: Option<&'a str>,
    /// Condition line ("Sunny", "Light rain")
    pub condition: Option<&'a str>,
    /// Free-form detail line (humidity, wind)
    pub detail: Option<&'a str>,
}

impl<'a> WeatherReport<'a> {
    /// Split a weather record into borrowed field views
    pub fn parse(text: &'a str) -> Self {
        let (city_line, rest) = next_field(text);
        let (temperature, rest) = split_optional(rest);
        let (condition, rest) = split_optional(rest);
        let detail = rest.map(|d| next_field(d).0);

        let (city, country) = match city_line.rsplit_once(',') {
            Some((city, country)) => (city, Some(country.trim_start_matches(' '))),
            None => (city_line, None),
        };

        Self {
            city,
            country,
            temperature,
            condition,
            detail,
        }
    }
}

/// Split off one line; the remainder is `None` when there is no newline
fn next_field(text: &str) -> (&str, Option<&str>) {
    match text.split_once('\n') {
        Some((field, rest)) => (field.trim_end_matches('\r'), Some(rest)),
        None => (text.trim_end_matches('\r'), None),
    }
}

fn split_optional(text: Option<&str>) -> (Option<&str>, Option<&str>) {
    match text {
        Some(text) => {
            let (field, rest) = next_field(text);
            (Some(field), rest)
        }
        None => (None, None),
    }
}
