//! Camera app: ask the companion for a photo and stream it to the panel

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, ReadReady, Write};
use handset_display::{Canvas, CanvasExt, Color, Point, Rect, TextStyle};
use handset_protocol::PHOTO_WIDTH;

use super::{report, AppError};
use crate::context::Handset;
use crate::state::AppId;

/// Strip under the photo used for status text
const STATUS_AREA: Rect = Rect::new(0, 240, 240, 40);
const STATUS_AT: Point = Point::new(30, 250);

pub async fn run<M, D, S, G>(handset: &Handset<M, D, S, G>, delay: &mut impl DelayNs)
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    // A press from before the app started is not a shutter press
    handset.take_photo_request();
    report("camera", draw_ready(&mut *handset.display.lock().await));

    while handset.is_running(AppId::Camera) {
        if handset.take_photo_request() {
            report("camera", capture(handset).await);
        }
        delay.delay_ms(handset.config.timing.camera_ms).await;
    }
}

fn draw_ready<C: Canvas + ?Sized>(canvas: &mut C) -> Result<(), AppError> {
    canvas.clear(Color::BLACK)?;
    canvas.draw_text(Point::new(60, 100), "CAMERA READY", TextStyle::medium(Color::WHITE))?;
    draw_status(canvas, "Press BTN1 to Snap", Color::WHITE)
}

fn draw_status<C: Canvas + ?Sized>(canvas: &mut C, text: &str, color: Color) -> Result<(), AppError> {
    canvas.fill_clipped(STATUS_AREA, Color::BLACK)?;
    canvas.draw_text(STATUS_AT, text, TextStyle::medium(color))?;
    Ok(())
}

/// Request a photo and draw it row by row
///
/// The bus stays locked for the whole frame; the display is locked per row.
/// A panel error stops drawing but the rest of the frame is still read, so
/// the next request on the link starts on a response boundary.
async fn capture<M, D, S, G>(handset: &Handset<M, D, S, G>) -> Result<(), AppError>
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    info!("camera: capturing");
    draw_status(&mut *handset.display.lock().await, "CAPTURING...", Color::RED)?;

    let mut bus = handset.bus.lock().await;
    let mut stream = bus.link.request_photo(handset.config.link.pixel_order).await?;
    let mut pixels = [Color::BLACK; PHOTO_WIDTH];
    let mut panel_error = None;
    while let Some(row) = stream.next_row(&mut pixels).await? {
        if panel_error.is_some() {
            continue;
        }
        let mut display = handset.display.lock().await;
        if let Err(e) = display.draw_span(Point::new(0, row as i32), &pixels) {
            warn!("camera: panel failed at row {}, draining frame", row);
            panel_error = Some(e);
        }
    }
    drop(bus);

    if let Some(e) = panel_error {
        return Err(AppError::Display(e));
    }

    draw_status(&mut *handset.display.lock().await, "Press BTN1 to Snap", Color::WHITE)?;
    info!("camera: photo shown");
    Ok(())
}
