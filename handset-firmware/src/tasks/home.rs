//! Foreground task: lock screen, launcher and the running app

use embassy_time::Delay;
use handset_core::apps;
use handset_hal_rp2040::AdcJoystick;

use crate::Board;

#[embassy_executor::task]
pub async fn home_task(handset: &'static Board, mut stick: AdcJoystick<'static>) {
    defmt::info!("Home task started");
    apps::home::run(handset, &mut stick, &mut Delay).await
}
