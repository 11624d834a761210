//! Camera frame layout.
//!
//! A photo is a raw RGB565 raster streamed row by row:
//! - 240 × 240 pixels, two bytes each, no header
//! - rows arrive bottom-first, so stream row `r` lands on screen row `239 - r`
//! - the two bytes combine as `(high << 8) | low`, in [`PixelOrder`]

/// Photo width in pixels
pub const PHOTO_WIDTH: usize = 240;

/// Photo height in pixels
pub const PHOTO_HEIGHT: usize = 240;

/// Bytes per streamed row
pub const PHOTO_ROW_LEN: usize = PHOTO_WIDTH * 2;

/// Total photo response size
pub const PHOTO_LEN: usize = PHOTO_ROW_LEN * PHOTO_HEIGHT;

/// Byte order of each pixel on the wire
///
/// The link is documented as low byte first, which is the default. The
/// stock companion camera script packs pixels big-endian (`>u2`) and needs
/// `HighFirst`; the board's handset.toml selects that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelOrder {
    /// Low byte first, high byte second
    #[default]
    LowFirst,
    /// High byte first, low byte second
    HighFirst,
}

impl PixelOrder {
    /// Combine the two wire bytes of one pixel into an RGB565 value
    pub fn pixel(self, first: u8, second: u8) -> u16 {
        let (high, low) = match self {
            PixelOrder::LowFirst => (second, first),
            PixelOrder::HighFirst => (first, second),
        };
        ((high as u16) << 8) | low as u16
    }

    /// Decode one streamed row into `out`
    ///
    /// Decodes `min(row.len() / 2, out.len())` pixels and returns that count.
    pub fn decode_row(self, row: &[u8], out: &mut [u16]) -> usize {
        let mut count = 0;
        for (pair, px) in row.chunks_exact(2).zip(out.iter_mut()) {
            *px = self.pixel(pair[0], pair[1]);
            count += 1;
        }
        count
    }
}

/// Screen row for a stream row (bottom-to-top order)
///
/// Returns `None` for rows past the end of the photo.
pub fn screen_row(stream_row: usize) -> Option<usize> {
    if stream_row < PHOTO_HEIGHT {
        Some(PHOTO_HEIGHT - 1 - stream_row)
    } else {
        None
    }
}
