//! Home task: lock screen, launcher, and the active app inline

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, ReadReady, Write};
use handset_display::{Canvas, CanvasExt, Color, Point, Rect, TextStyle};
use handset_protocol::TextRecord;

use super::{report, AppError};
use crate::context::Handset;
use crate::launcher::{self, Navigator};
use crate::state::{AppId, AppState, Event};
use crate::traits::{Joystick, Magnetometer};

const CLOCK_AREA: Rect = Rect::new(0, 60, 240, 60);
const MESSAGE_AREA: Rect = Rect::new(0, 140, 240, 80);

/// Run the home task forever
pub async fn run<M, D, S, G, J>(
    handset: &Handset<M, D, S, G>,
    stick: &mut J,
    delay: &mut impl DelayNs,
) -> !
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
    G: Magnetometer,
    J: Joystick,
{
    info!("home task started");
    lock_screen(handset, delay).await;

    let mut home = Home::new();
    loop {
        home.step(handset, stick, delay).await;
    }
}

/// Show the lock screen until the companion sends an unlock
pub async fn lock_screen<M, D, S, G>(handset: &Handset<M, D, S, G>, delay: &mut impl DelayNs)
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    let timing = handset.config.timing;
    let period = timing.clock_refresh_ticks.max(1);
    let mut record = TextRecord::new();
    let mut tick = 0;

    let cleared = handset.display.lock().await.clear(Color::BLACK);
    report("lock", cleared.map_err(AppError::from));

    while handset.state().is_locked() {
        if tick == 0 {
            report("lock", refresh_clock(handset, &mut record).await);
        }
        if tick == timing.lock_message_tick {
            report("lock", draw_lock_message(&mut *handset.display.lock().await));
        }

        let unlocked = handset.bus.lock().await.link.poll_unlock().await;
        match unlocked {
            Ok(true) => {
                handset.dispatch(Event::Unlock);
            }
            Ok(false) => {}
            Err(e) => warn!("lock: {}", e),
        }

        tick = (tick + 1) % period;
        delay.delay_ms(timing.lock_ms).await;
    }
}

async fn refresh_clock<M, D, S, G>(
    handset: &Handset<M, D, S, G>,
    record: &mut TextRecord,
) -> Result<(), AppError>
where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
{
    handset.bus.lock().await.link.fetch_time(record).await?;

    let mut display = handset.display.lock().await;
    display.fill_clipped(CLOCK_AREA, Color::BLACK)?;
    display.draw_text(Point::new(30, 70), record.first_line(), TextStyle::large(Color::WHITE))?;
    Ok(())
}

fn draw_lock_message<C: Canvas + ?Sized>(canvas: &mut C) -> Result<(), AppError> {
    canvas.fill_clipped(MESSAGE_AREA, Color::BLACK)?;
    canvas.draw_text(Point::new(40, 150), "PHONE LOCKED!", TextStyle::medium(Color::RED))?;
    canvas.draw_text(
        Point::new(20, 190),
        "Show face to camera to unlock",
        TextStyle::small(Color::WHITE),
    )?;
    Ok(())
}

/// Launcher loop state
pub struct Home {
    navigator: Navigator,
    needs_redraw: bool,
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}

impl Home {
    pub const fn new() -> Self {
        Self {
            navigator: Navigator::new(),
            needs_redraw: true,
        }
    }

    /// One launcher iteration, or one whole app session if an app was selected
    pub async fn step<M, D, S, G, J>(
        &mut self,
        handset: &Handset<M, D, S, G>,
        stick: &mut J,
        delay: &mut impl DelayNs,
    ) where
        M: RawMutex,
        D: Canvas,
        S: Read + Write + ReadReady,
        G: Magnetometer,
        J: Joystick,
    {
        match handset.state() {
            AppState::Running(app) => {
                run_app(handset, app, stick, delay).await;
                self.needs_redraw = true;
                return;
            }
            AppState::Locked => {
                lock_screen(handset, delay).await;
                self.needs_redraw = true;
                return;
            }
            AppState::Launcher => {}
        }

        let current = handset.focus().selection;
        if self.needs_redraw {
            let mut display = handset.display.lock().await;
            report("launcher", launcher::draw_home(&mut *display, current).map_err(AppError::from));
            self.needs_redraw = false;
        }

        let reading = stick.read().await;
        let next = self.navigator.step(
            &handset.config.stick,
            reading,
            current,
            handset.config.timing.launcher_cooldown,
        );
        if next != current {
            debug!("launcher cursor {} -> {}", current.index(), next.index());
            handset.set_selection(next);
            let mut display = handset.display.lock().await;
            report(
                "launcher",
                launcher::move_cursor(&mut *display, current, next).map_err(AppError::from),
            );
        }

        delay.delay_ms(handset.config.timing.launcher_ms).await;
    }
}

async fn run_app<M, D, S, G, J>(
    handset: &Handset<M, D, S, G>,
    app: AppId,
    stick: &mut J,
    delay: &mut impl DelayNs,
) where
    M: RawMutex,
    D: Canvas,
    S: Read + Write + ReadReady,
    G: Magnetometer,
    J: Joystick,
{
    info!("starting {}", app.label());
    match app {
        AppId::Camera => super::camera::run(handset, delay).await,
        AppId::Compass => super::compass::run(handset, delay).await,
        AppId::Weather => super::weather::run(handset, delay).await,
        AppId::Game => super::game::run(handset, stick, delay).await,
    }
    info!("{} closed", app.label());
}
