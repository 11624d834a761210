//! Board pin assignment
//!
//! | Function        | GPIO | Peripheral |
//! |-----------------|------|------------|
//! | Companion TX/RX | 0/1  | UART0      |
//! | Sensor SDA/SCL  | 4/5  | I2C0       |
//! | Panel SCK/MOSI  | 18/19| SPI0       |
//! | Panel CS        | 17   | GPIO       |
//! | Panel DC        | 16   | GPIO       |
//! | Panel RST       | 20   | GPIO       |
//! | Panel backlight | 21   | GPIO       |
//! | SELECT button   | 14   | GPIO, pull-up, active low |
//! | HOME button     | 15   | GPIO, pull-up, active low |
//! | Stick X / Y     | 26/27| ADC0/ADC1  |

pub const UART_TX: u8 = 0;
pub const UART_RX: u8 = 1;
pub const I2C_SDA: u8 = 4;
pub const I2C_SCL: u8 = 5;
pub const PANEL_DC: u8 = 16;
pub const PANEL_CS: u8 = 17;
pub const PANEL_SCK: u8 = 18;
pub const PANEL_MOSI: u8 = 19;
pub const PANEL_RST: u8 = 20;
pub const PANEL_BACKLIGHT: u8 = 21;
pub const BUTTON_SELECT: u8 = 14;
pub const BUTTON_HOME: u8 = 15;
pub const STICK_X: u8 = 26;
pub const STICK_Y: u8 = 27;

/// ADC channel index for a GPIO, `None` if the pin has no ADC function
pub const fn adc_channel(gpio: u8) -> Option<u8> {
    match gpio {
        26..=29 => Some(gpio - 26),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_pins_are_adc_capable() {
        assert_eq!(adc_channel(STICK_X), Some(0));
        assert_eq!(adc_channel(STICK_Y), Some(1));
        assert_eq!(adc_channel(BUTTON_SELECT), None);
    }
}
