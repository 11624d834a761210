//! Input task: button edges to lifecycle events

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::context::Handset;
use crate::state::{ButtonEdges, Event, Pressed};
use crate::traits::ButtonPad;

/// Wait for button interrupts forever
pub async fn run<M, D, S, G, B>(
    handset: &Handset<M, D, S, G>,
    buttons: &mut B,
    delay: &mut impl DelayNs,
) -> !
where
    M: RawMutex,
    B: ButtonPad,
{
    info!("input task started");
    let mut edges = ButtonEdges::new();
    loop {
        handset.buttons.wait().await;
        handle(handset, buttons, &mut edges);
        handset.buttons.rearm();
        delay.delay_ms(handset.config.timing.input_ms).await;
    }
}

/// Read the pad once and dispatch what was pressed
pub fn handle<M, D, S, G, B>(handset: &Handset<M, D, S, G>, buttons: &mut B, edges: &mut ButtonEdges) -> Pressed
where
    M: RawMutex,
    B: ButtonPad,
{
    let mask = buttons.read_mask();
    let pressed = edges.update(mask);
    trace!("buttons {=u8:#x}", mask);

    if pressed.select {
        handset.press_select();
    }
    if pressed.home {
        handset.dispatch(Event::Home);
    }
    pressed
}
