//! Command and notification bytes

use crate::photo::PHOTO_LEN;
use crate::record::TEXT_RECORD_LEN;

/// Requests the handset sends to the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Current wall-clock time, one line of text
    Time,
    /// Location line shown by the compass app
    Location,
    /// Weather report (city, temperature, condition, detail)
    Weather,
    /// One camera frame
    Photo,
}

/// Bytes the companion sends without being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Face recognised, the handset may leave the lock screen
    Unlock,
}

// Wire format values
const CMD_TIME: u8 = b'T';
const CMD_LOCATION: u8 = b'C';
const CMD_WEATHER: u8 = b'W';
const CMD_PHOTO: u8 = b'P';
const NOTIFY_UNLOCK: u8 = b'U';

impl Command {
    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_TIME => Some(Command::Time),
            CMD_LOCATION => Some(Command::Location),
            CMD_WEATHER => Some(Command::Weather),
            CMD_PHOTO => Some(Command::Photo),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Time => CMD_TIME,
            Command::Location => CMD_LOCATION,
            Command::Weather => CMD_WEATHER,
            Command::Photo => CMD_PHOTO,
        }
    }

    /// Exact number of bytes the companion answers with
    pub fn response_len(self) -> usize {
        match self {
            Command::Photo => PHOTO_LEN,
            _ => TEXT_RECORD_LEN,
        }
    }

    /// Returns true if the response is a text record
    pub fn is_text(self) -> bool {
        !matches!(self, Command::Photo)
    }
}

impl Notification {
    /// Parse a notification from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            NOTIFY_UNLOCK => Some(Notification::Unlock),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Notification::Unlock => NOTIFY_UNLOCK,
        }
    }
}
