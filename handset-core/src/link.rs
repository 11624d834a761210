//! Companion link client
//!
//! One command byte out, a fixed number of bytes back. The caller holds the
//! bus lock for the whole exchange so responses never interleave.

use embedded_io_async::{Read, ReadExactError, ReadReady, Write};
use handset_display::Color;
use handset_protocol::{
    photo, Command, Notification, PixelOrder, TextRecord, PHOTO_HEIGHT, PHOTO_ROW_LEN,
    PHOTO_WIDTH,
};

/// Errors on the companion link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The serial device reported an error
    Serial,
    /// The serial device closed before the full response arrived
    UnexpectedEof,
}

impl<E> From<ReadExactError<E>> for LinkError {
    fn from(e: ReadExactError<E>) -> Self {
        match e {
            ReadExactError::UnexpectedEof => LinkError::UnexpectedEof,
            ReadExactError::Other(_) => LinkError::Serial,
        }
    }
}

/// Request/response client over a byte stream
pub struct CompanionLink<S> {
    serial: S,
}

impl<S> CompanionLink<S>
where
    S: Read + Write + ReadReady,
{
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub fn into_inner(self) -> S {
        self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Fetch the clock line for the lock screen
    pub async fn fetch_time(&mut self, record: &mut TextRecord) -> Result<(), LinkError> {
        self.request_text(Command::Time, record).await
    }

    /// Fetch the location line for the compass
    pub async fn fetch_location(&mut self, record: &mut TextRecord) -> Result<(), LinkError> {
        self.request_text(Command::Location, record).await
    }

    /// Fetch the weather record
    pub async fn fetch_weather(&mut self, record: &mut TextRecord) -> Result<(), LinkError> {
        self.request_text(Command::Weather, record).await
    }

    async fn request_text(
        &mut self,
        command: Command,
        record: &mut TextRecord,
    ) -> Result<(), LinkError> {
        self.send(command).await?;
        self.serial.read_exact(record.as_mut_bytes()).await?;
        record.seal();
        Ok(())
    }

    /// Ask for a photo and return a reader over its rows
    ///
    /// The whole frame must be drained before the link is used again.
    pub async fn request_photo(&mut self, order: PixelOrder) -> Result<PhotoStream<'_, S>, LinkError> {
        self.send(Command::Photo).await?;
        Ok(PhotoStream {
            serial: &mut self.serial,
            order,
            next_row: 0,
        })
    }

    /// Drain pending bytes without blocking; true if an unlock arrived
    pub async fn poll_unlock(&mut self) -> Result<bool, LinkError> {
        let mut unlocked = false;
        while self.serial.read_ready().map_err(|_| LinkError::Serial)? {
            let mut byte = [0u8; 1];
            self.serial.read_exact(&mut byte).await?;
            if Notification::from_byte(byte[0]) == Some(Notification::Unlock) {
                unlocked = true;
            }
        }
        Ok(unlocked)
    }

    async fn send(&mut self, command: Command) -> Result<(), LinkError> {
        self.serial
            .write_all(&[command.to_byte()])
            .await
            .map_err(|_| LinkError::Serial)?;
        self.serial.flush().await.map_err(|_| LinkError::Serial)
    }
}

/// Rows of a photo in flight
pub struct PhotoStream<'a, S> {
    serial: &'a mut S,
    order: PixelOrder,
    next_row: usize,
}

impl<S: Read> PhotoStream<'_, S> {
    /// Read the next row into `pixels` and return its screen row
    ///
    /// `Ok(None)` once all rows have been read.
    pub async fn next_row(
        &mut self,
        pixels: &mut [Color; PHOTO_WIDTH],
    ) -> Result<Option<usize>, LinkError> {
        let Some(screen_row) = photo::screen_row(self.next_row) else {
            return Ok(None);
        };

        let mut raw = [0u8; PHOTO_ROW_LEN];
        self.serial.read_exact(&mut raw).await?;
        for (pair, px) in raw.chunks_exact(2).zip(pixels.iter_mut()) {
            *px = Color(self.order.pixel(pair[0], pair[1]));
        }

        self.next_row += 1;
        Ok(Some(screen_row))
    }

    /// Rows left to read
    pub fn remaining(&self) -> usize {
        PHOTO_HEIGHT - self.next_row
    }
}
