//! Button event task

use embassy_time::Delay;
use handset_core::apps;
use handset_hal_rp2040::ButtonLatch;

use crate::Board;

#[embassy_executor::task]
pub async fn input_task(handset: &'static Board, latch: &'static ButtonLatch) {
    defmt::info!("Input task started");
    let mut buttons = latch.reader();
    apps::input::run(handset, &mut buttons, &mut Delay).await
}
