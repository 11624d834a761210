//! Frogger session: drives the engine and applies its repaints

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use handset_display::{Canvas, CanvasExt};

use super::{report, AppError};
use crate::context::Handset;
use crate::game::{palette, GameEngine, Outcome, PaintList, FLASH_AREA};
use crate::state::AppId;
use crate::traits::Joystick;

pub async fn run<M, D, S, G, J>(handset: &Handset<M, D, S, G>, stick: &mut J, delay: &mut impl DelayNs)
where
    M: RawMutex,
    D: Canvas,
    J: Joystick,
{
    let rules = handset.config.game;
    let mut engine = GameEngine::new(rules);
    let mut paints = PaintList::new();

    engine.paint_scene(&mut paints);
    report("game", paint(handset, &paints).await);

    while handset.is_running(AppId::Game) {
        let reading = stick.read().await;
        let direction = handset.config.stick.direction(reading);
        let outcome = engine.tick(direction, &mut paints);
        report("game", paint(handset, &paints).await);

        if outcome != Outcome::Playing {
            info!("game: {}", outcome);
            let flash = if outcome == Outcome::Won {
                palette::WIN
            } else {
                palette::DEATH
            };
            let flashed = handset.display.lock().await.fill_clipped(FLASH_AREA, flash);
            report("game", flashed.map_err(AppError::from));

            delay.delay_ms(rules.outcome_pause_ms).await;
            engine.reset_frog();
            engine.paint_scene(&mut paints);
            report("game", paint(handset, &paints).await);
        }

        delay.delay_ms(handset.config.timing.game_tick_ms).await;
    }
}

async fn paint<M, D, S, G>(handset: &Handset<M, D, S, G>, paints: &PaintList) -> Result<(), AppError>
where
    M: RawMutex,
    D: Canvas,
{
    let mut display = handset.display.lock().await;
    paints.apply(&mut *display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HandsetConfig, StickReading};
    use crate::context::SharedBus;
    use crate::game::frog::START_X;
    use crate::game::lanes::START_LANE;
    use crate::link::CompanionLink;
    use crate::state::{Event, Selection};
    use crate::testing::{HookDelay, MockMag, MockSerial, Op, RecordingCanvas, ScriptedStick};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use handset_display::Color;

    type TestHandset = Handset<NoopRawMutex, RecordingCanvas, MockSerial, MockMag>;

    fn game_handset(config: HandsetConfig) -> TestHandset {
        let bus = SharedBus::new(CompanionLink::new(MockSerial::with_input(&[])), MockMag::default());
        let h = Handset::new(RecordingCanvas::new(), bus, config);
        h.dispatch(Event::Unlock);
        h.set_selection(Selection::new(3).unwrap());
        h.press_select();
        h
    }

    #[test]
    fn test_scene_painted_on_entry() {
        let h = game_handset(HandsetConfig::default());
        let mut stick = ScriptedStick::centered();
        let mut delay = HookDelay::new(|n| {
            if n == 1 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut stick, &mut delay));

        let display = h.display.try_lock().unwrap();
        assert_eq!(display.at(0, 0), palette::GRASS);
        assert_eq!(display.at(0, 30), palette::WATER);
        assert_eq!(display.at(0, 130), palette::ROAD);
        assert_eq!(display.at(0, 270), palette::GRASS);
        let frog_x = START_X as i32 + 8;
        let frog_y = START_LANE as i32 * 20 + 8;
        assert_eq!(display.at(frog_x, frog_y), palette::FROG);
    }

    #[test]
    fn test_frog_moves_with_the_stick() {
        let h = game_handset(HandsetConfig::default());
        // Up from the start lane onto the safe road shoulder
        let mut stick = ScriptedStick::new(&[StickReading::new(2048, 4095)]);
        let mut delay = HookDelay::new(|n| {
            if n == 1 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut stick, &mut delay));

        let display = h.display.try_lock().unwrap();
        let frog_x = START_X as i32 + 8;
        assert_eq!(display.at(frog_x, 9 * 20 + 8), palette::FROG);
        assert_ne!(display.at(frog_x, 10 * 20 + 8), palette::FROG);
    }

    #[test]
    fn test_drowning_flashes_and_resets() {
        let mut config = HandsetConfig::default();
        config.game.move_cooldown = 0;
        let h = game_handset(config);
        // Straight up: the road lanes are still empty, the first water lane drowns
        let up = StickReading::new(2048, 4095);
        let mut stick = ScriptedStick::new(&[up; 6]);
        let mut delay = HookDelay::new(|n| {
            if n == 7 {
                h.dispatch(Event::Home);
            }
        });
        block_on(run(&h, &mut stick, &mut delay));

        let display = h.display.try_lock().unwrap();
        let flashed = display
            .ops
            .iter()
            .any(|op| *op == Op::Fill(FLASH_AREA, palette::DEATH));
        assert!(flashed);
        // Frog back at the start after the outcome
        let frog_x = START_X as i32 + 8;
        assert_eq!(display.at(frog_x, START_LANE as i32 * 20 + 8), palette::FROG);
        assert_ne!(display.at(0, 0), Color::RED);
    }
}
