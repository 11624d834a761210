//! Compass app: needle from the magnetometer, location line from the companion

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, ReadReady, Write};
use handset_display::{Canvas, CanvasExt, Color, Point, Rect, TextStyle};
use handset_protocol::TextRecord;

use super::{report, AppError};
use crate::context::Handset;
use crate::state::AppId;
use crate::traits::Magnetometer;

pub const CENTER: Point = Point::new(120, 140);
pub const DIAL_RADIUS: u32 = 50;
pub const NEEDLE_LEN: f32 = 45.0;

const LOCATION_AREA: Rect = Rect::new(10, 40, 220, 20);
const HEADING_AREA: Rect = Rect::new(80, 205, 80, 12);

/// Needle tip for a heading in degrees
pub fn needle_tip(center: Point, heading_deg: f32) -> Point {
    let angle = heading_deg.to_radians() + core::f32::consts::PI;
    Point::new(
        center.x + libm::roundf(libm::cosf(angle) * NEEDLE_LEN) as i32,
        center.y - libm::roundf(libm::sinf(angle) * NEEDLE_LEN) as i32,
    )
}

pub async fn run<M, D, S, G>(handset: &Handset<M, D, S, G>, delay: &mut impl DelayNs)
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
    G: Magnetometer,
{
    let powered = handset.bus.lock().await.compass.power_up().await;
    match powered {
        Ok(()) => info!("compass: sensor up"),
        Err(e) => warn!("compass: bring-up failed: {}", e),
    }
    report("compass", draw_dial(&mut *handset.display.lock().await));

    let refresh = handset.config.timing.location_refresh_polls.max(1);
    let mut record = TextRecord::new();
    let mut needle: Option<Point> = None;
    let mut poll = 0;

    while handset.is_running(AppId::Compass) {
        if poll == 0 {
            report("compass", refresh_location(handset, &mut record).await);
        }

        let sample = handset.bus.lock().await.compass.read().await;
        match sample {
            Ok(Some(sample)) => {
                if let Some(heading) = sample.heading_deg() {
                    let mut display = handset.display.lock().await;
                    report("compass", draw_needle(&mut *display, &mut needle, heading));
                }
            }
            // Not ready: try again next poll
            Ok(None) => {}
            Err(e) => warn!("compass: {}", e),
        }

        poll = (poll + 1) % refresh;
        delay.delay_ms(handset.config.timing.compass_ms).await;
    }

    let suspended = handset.bus.lock().await.compass.power_down().await;
    if let Err(e) = suspended {
        warn!("compass: power down failed: {}", e);
    }
}

fn draw_dial<C: Canvas + ?Sized>(canvas: &mut C) -> Result<(), AppError> {
    canvas.clear(Color::BLACK)?;
    canvas.draw_circle(CENTER, DIAL_RADIUS, Color::WHITE)?;
    let top = CENTER.y - DIAL_RADIUS as i32;
    canvas.draw_line(Point::new(CENTER.x, top), Point::new(CENTER.x, top + 5), Color::RED)?;
    canvas.draw_text(Point::new(CENTER.x - 4, top - 14), "N", TextStyle::small(Color::RED))?;
    canvas.draw_text(Point::new(80, 250), "COMPASS", TextStyle::medium(Color::WHITE))?;
    Ok(())
}

fn draw_needle<C: Canvas + ?Sized>(
    canvas: &mut C,
    previous: &mut Option<Point>,
    heading: f32,
) -> Result<(), AppError> {
    if let Some(tip) = previous.take() {
        canvas.draw_line(CENTER, tip, Color::BLACK)?;
    }
    let tip = needle_tip(CENTER, heading);
    canvas.draw_line(CENTER, tip, Color::RED)?;
    *previous = Some(tip);

    let mut label: heapless::String<16> = heapless::String::new();
    let _ = write!(label, "{} deg", libm::roundf(heading) as u32 % 360);
    canvas.fill_clipped(HEADING_AREA, Color::BLACK)?;
    canvas.draw_text(Point::new(HEADING_AREA.x, HEADING_AREA.y), &label, TextStyle::small(Color::WHITE))?;
    Ok(())
}

async fn refresh_location<M, D, S, G>(
    handset: &Handset<M, D, S, G>,
    record: &mut TextRecord,
) -> Result<(), AppError>
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    handset.bus.lock().await.link.fetch_location(record).await?;

    let mut display = handset.display.lock().await;
    display.fill_clipped(LOCATION_AREA, Color::BLACK)?;
    display.draw_text(Point::new(10, 44), record.first_line(), TextStyle::small(Color::CYAN))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::HandsetConfig;
    use crate::context::SharedBus;
    use crate::link::CompanionLink;
    use crate::state::{Event, Selection};
    use crate::testing::{HookDelay, MockMag, MockSerial, Op, RecordingCanvas};
    use crate::traits::MagSample;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type TestHandset = Handset<NoopRawMutex, RecordingCanvas, MockSerial, MockMag>;

    fn record(text: &str) -> [u8; 128] {
        let mut buf = [0u8; 128];
        buf[..text.len()].copy_from_slice(text.as_bytes());
        buf
    }

    fn compass_handset(input: &[u8], samples: &[Option<MagSample>]) -> TestHandset {
        let mut mag = MockMag::default();
        mag.samples.extend(samples.iter().copied());
        let bus = SharedBus::new(CompanionLink::new(MockSerial::with_input(input)), mag);
        let h = Handset::new(RecordingCanvas::new(), bus, HandsetConfig::default());
        h.dispatch(Event::Unlock);
        h.set_selection(Selection::new(1).unwrap());
        h.press_select();
        h
    }

    #[test]
    fn test_needle_tip() {
        // Heading 0 points left of centre, 90 points down
        assert_eq!(needle_tip(CENTER, 0.0), Point::new(75, 140));
        assert_eq!(needle_tip(CENTER, 90.0), Point::new(120, 185));
        assert_eq!(needle_tip(CENTER, 180.0), Point::new(165, 140));
    }

    #[test]
    fn test_needle_erases_previous() {
        let first = MagSample { x: 100, y: 0, z: 0 };
        let second = MagSample { x: 0, y: 100, z: 0 };
        let h = compass_handset(&record("Oslo, NO"), &[Some(first), None, Some(second)]);
        let mut delay = HookDelay::new(|n| {
            if n == 3 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut delay));

        let display = h.display.try_lock().unwrap();
        let lines: std::vec::Vec<_> = display
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Line(from, to, color) if *from == CENTER => Some((*to, *color)),
                _ => None,
            })
            .collect();
        let tip0 = needle_tip(CENTER, 0.0);
        let tip90 = needle_tip(CENTER, 90.0);
        assert_eq!(lines, [(tip0, Color::RED), (tip0, Color::BLACK), (tip90, Color::RED)]);
        assert!(display.has_text("Oslo, NO"));
        assert!(display.has_text("90 deg"));
    }

    #[test]
    fn test_sensor_powered_for_the_session() {
        let h = compass_handset(&record("Here"), &[]);
        let mut delay = HookDelay::new(|n| {
            if n == 1 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut delay));

        let mut bus = h.bus.try_lock().unwrap();
        assert_eq!(bus.compass.power_ups, 1);
        assert_eq!(bus.compass.power_downs, 1);
        assert!(!bus.compass.powered);
        assert_eq!(bus.link.serial_mut().written(), b"C");
    }

    #[test]
    fn test_location_refresh_interval() {
        let mut input = std::vec::Vec::new();
        input.extend_from_slice(&record("A"));
        input.extend_from_slice(&record("B"));
        let h = compass_handset(&input, &[]);
        let mut delay = HookDelay::new(|n| {
            if n == 21 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut delay));

        let mut bus = h.bus.try_lock().unwrap();
        // Polls 0 and 20 fetch
        assert_eq!(bus.link.serial_mut().written(), b"CC");
        drop(bus);
        let display = h.display.try_lock().unwrap();
        assert!(display.has_text("A"));
        assert!(display.has_text("B"));
    }
}
