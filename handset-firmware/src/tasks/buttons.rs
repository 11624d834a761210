//! Button edge watcher
//!
//! Stands in for the GPIO interrupt handler: waits for an edge while the
//! source is armed, latches the line state and signals the input task.

use handset_hal_rp2040::{ButtonLatch, ButtonLines};

use crate::Board;

#[embassy_executor::task]
pub async fn button_watch_task(
    handset: &'static Board,
    mut lines: ButtonLines<'static>,
    latch: &'static ButtonLatch,
) {
    defmt::info!("Button watcher started");
    lines.watch(latch, &handset.buttons).await
}
