//! Weather app: fetch a report from the companion and lay it out

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, ReadReady, Write};
use handset_display::{Canvas, CanvasExt, Color, Point, Rect, TextStyle};
use handset_protocol::{TextRecord, WeatherReport};

use super::{report, AppError};
use crate::context::Handset;
use crate::state::AppId;

const REPORT_AREA: Rect = Rect::new(0, 40, 240, 220);
const TITLE: &str = "WEATHER";

pub async fn run<M, D, S, G>(handset: &Handset<M, D, S, G>, delay: &mut impl DelayNs)
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    report("weather", draw_splash(&mut *handset.display.lock().await));

    let refresh = handset.config.timing.weather_refresh_polls.max(1);
    let mut record = TextRecord::new();
    let mut poll = 0;

    while handset.is_running(AppId::Weather) {
        if poll == 0 {
            report("weather", fetch_and_draw(handset, &mut record).await);
        }
        poll = (poll + 1) % refresh;
        delay.delay_ms(handset.config.timing.weather_ms).await;
    }
}

fn draw_splash<C: Canvas + ?Sized>(canvas: &mut C) -> Result<(), AppError> {
    canvas.clear(Color::BLACK)?;
    canvas.draw_text(Point::new(85, 10), TITLE, TextStyle::medium(Color::WHITE))?;
    canvas.draw_text(Point::new(70, 120), "Loading...", TextStyle::medium(Color::WHITE))?;
    Ok(())
}

async fn fetch_and_draw<M, D, S, G>(
    handset: &Handset<M, D, S, G>,
    record: &mut TextRecord,
) -> Result<(), AppError>
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    handset.bus.lock().await.link.fetch_weather(record).await?;
    let weather = record.weather();
    debug!("weather: {}", weather.city);
    draw_report(&mut *handset.display.lock().await, &weather)
}

/// Lay out one report; missing fields are skipped
pub fn draw_report<C: Canvas + ?Sized>(canvas: &mut C, report: &WeatherReport<'_>) -> Result<(), AppError> {
    canvas.fill_clipped(REPORT_AREA, Color::BLACK)?;
    canvas.draw_optional_text(Point::new(10, 50), report.temperature, TextStyle::large(Color::WHITE))?;
    canvas.draw_optional_text(Point::new(10, 110), report.condition, TextStyle::medium(Color::YELLOW))?;
    canvas.draw_optional_text(Point::new(10, 140), Some(report.city), TextStyle::medium(Color::CYAN))?;
    canvas.draw_optional_text(Point::new(10, 165), report.country, TextStyle::small(Color::WHITE))?;
    canvas.draw_optional_text(Point::new(10, 195), report.detail, TextStyle::small(Color::GREY))?;
    Ok(())
}
