//! BMI160 IMU with a BMM150 magnetometer on its auxiliary interface
//!
//! The BMM150 is not on the main bus. The BMI160 reaches it through its
//! auxiliary I2C master, driven in manual mode:
//!
//! - write: value into `MAG_IF_4`, target register into `MAG_IF_3`
//! - read: source register into `MAG_IF_2`, result lands in `DATA_MAG`
//! - `STATUS.mag_man_op` is set while a manual transfer is in flight
//!
//! The bring-up is timing sensitive and is run every time the compass
//! becomes active; automatic mode does not work reliably on this part.
//! Every sample re-asserts the auxiliary interface before reading.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use handset_core::traits::{MagSample, Magnetometer, SensorError};

/// BMI160 address with SDO high
pub const DEFAULT_ADDRESS: u8 = 0x69;

/// BMM150 address on the auxiliary bus
pub const BMM150_ADDRESS: u8 = 0x13;

/// Expected `CHIP_ID` value
pub const CHIP_ID: u8 = 0xD1;

/// BMI160 registers
pub mod reg {
    pub const CHIP_ID: u8 = 0x00;
    /// Magnetometer data, X/Y/Z little-endian
    pub const DATA_MAG: u8 = 0x04;
    pub const STATUS: u8 = 0x1B;
    /// Auxiliary device address
    pub const MAG_IF_0: u8 = 0x4B;
    /// Manual enable and burst length
    pub const MAG_IF_1: u8 = 0x4C;
    /// Manual read address
    pub const MAG_IF_2: u8 = 0x4D;
    /// Manual write address
    pub const MAG_IF_3: u8 = 0x4E;
    /// Manual write data
    pub const MAG_IF_4: u8 = 0x4F;
    pub const IF_CONF: u8 = 0x6B;
    pub const CMD: u8 = 0x7E;
}

/// BMM150 registers, reached through the auxiliary interface
pub mod bmm150 {
    pub const DATA_X_LSB: u8 = 0x42;
    pub const POWER: u8 = 0x4B;
    pub const OP_MODE: u8 = 0x4C;
    pub const REP_XY: u8 = 0x51;
    pub const REP_Z: u8 = 0x52;
}

/// Auxiliary interface carries the magnetometer
const IF_CONF_AUX_MAG: u8 = 0x20;
const CMD_MAG_NORMAL: u8 = 0x19;
const CMD_MAG_SUSPEND: u8 = 0x18;
const MAG_MANUAL: u8 = 0x80;
/// Six byte manual reads (X, Y, Z)
const MAG_BURST_6: u8 = 0x02;
const STATUS_MAG_MAN_OP: u8 = 1 << 2;

const POWER_ON: u8 = 0x01;
const POWER_OFF: u8 = 0x00;
const OP_NORMAL: u8 = 0x00;
/// Nine X/Y repetitions
const REP_XY_9: u8 = 0x04;
/// Fifteen Z repetitions
const REP_Z_15: u8 = 0x0E;

/// Settle time after each bring-up step
const STEP_DELAY_MS: u32 = 4;
/// Polls of `mag_man_op` before a manual write is declared stuck
const BUSY_POLLS: u8 = 10;

/// BMI160 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmi160Error {
    /// I2C transaction failed
    Bus,
    /// `CHIP_ID` did not match
    WrongChip(u8),
    /// Manual transfer on the auxiliary interface never finished
    AuxBusy,
}

impl From<Bmi160Error> for SensorError {
    fn from(e: Bmi160Error) -> Self {
        match e {
            Bmi160Error::Bus => SensorError::Bus,
            Bmi160Error::WrongChip(_) => SensorError::NotFound,
            Bmi160Error::AuxBusy => SensorError::Timeout,
        }
    }
}

/// BMI160 + BMM150 heading sensor
pub struct Bmi160<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    powered: bool,
}

impl<I, D> Bmi160<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            powered: false,
        }
    }

    /// Release the bus and the delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Run the magnetometer bring-up sequence
    pub async fn bring_up(&mut self) -> Result<(), Bmi160Error> {
        let id = self.read_reg(reg::CHIP_ID).await?;
        if id != CHIP_ID {
            return Err(Bmi160Error::WrongChip(id));
        }

        self.write_reg(reg::IF_CONF, IF_CONF_AUX_MAG).await?;
        self.delay.delay_ms(STEP_DELAY_MS).await;
        self.write_reg(reg::CMD, CMD_MAG_NORMAL).await?;
        self.delay.delay_ms(STEP_DELAY_MS).await;

        self.write_reg(reg::MAG_IF_0, BMM150_ADDRESS << 1).await?;
        self.write_reg(reg::MAG_IF_1, MAG_MANUAL).await?;

        self.mag_write(bmm150::POWER, POWER_ON).await?;
        self.mag_write(bmm150::OP_MODE, OP_NORMAL).await?;
        self.mag_write(bmm150::REP_XY, REP_XY_9).await?;
        self.mag_write(bmm150::REP_Z, REP_Z_15).await?;

        self.write_reg(reg::MAG_IF_1, MAG_MANUAL | MAG_BURST_6).await?;
        self.write_reg(reg::MAG_IF_2, bmm150::DATA_X_LSB).await?;

        self.powered = true;
        Ok(())
    }

    /// Read one sample; `None` while the manual read is still running
    pub async fn sample(&mut self) -> Result<Option<MagSample>, Bmi160Error> {
        self.write_reg(reg::IF_CONF, IF_CONF_AUX_MAG).await?;
        self.write_reg(reg::MAG_IF_2, bmm150::DATA_X_LSB).await?;
        self.delay.delay_ms(1).await;
        if !self.aux_idle().await? {
            return Ok(None);
        }

        let mut raw = [0u8; 6];
        self.read_regs(reg::DATA_MAG, &mut raw).await?;
        Ok(Some(MagSample {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }))
    }

    /// Put the magnetometer and the auxiliary interface to sleep
    pub async fn suspend(&mut self) -> Result<(), Bmi160Error> {
        self.powered = false;
        self.mag_write(bmm150::POWER, POWER_OFF).await?;
        self.write_reg(reg::CMD, CMD_MAG_SUSPEND).await
    }

    async fn mag_write(&mut self, register: u8, value: u8) -> Result<(), Bmi160Error> {
        self.write_reg(reg::MAG_IF_4, value).await?;
        self.write_reg(reg::MAG_IF_3, register).await?;
        self.wait_aux().await?;
        self.delay.delay_ms(STEP_DELAY_MS).await;
        Ok(())
    }

    async fn wait_aux(&mut self) -> Result<(), Bmi160Error> {
        for _ in 0..BUSY_POLLS {
            if self.aux_idle().await? {
                return Ok(());
            }
            self.delay.delay_ms(1).await;
        }
        Err(Bmi160Error::AuxBusy)
    }

    async fn aux_idle(&mut self) -> Result<bool, Bmi160Error> {
        Ok(self.read_reg(reg::STATUS).await? & STATUS_MAG_MAN_OP == 0)
    }

    async fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Bmi160Error> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|_| Bmi160Error::Bus)
    }

    async fn read_reg(&mut self, register: u8) -> Result<u8, Bmi160Error> {
        let mut value = [0u8; 1];
        self.read_regs(register, &mut value).await?;
        Ok(value[0])
    }

    async fn read_regs(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Bmi160Error> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .await
            .map_err(|_| Bmi160Error::Bus)
    }
}

impl<I, D> Magnetometer for Bmi160<I, D>
where
    I: I2c,
    D: DelayNs,
{
    async fn power_up(&mut self) -> Result<(), SensorError> {
        Ok(self.bring_up().await?)
    }

    async fn read(&mut self) -> Result<Option<MagSample>, SensorError> {
        if !self.powered {
            return Err(SensorError::NotFound);
        }
        Ok(self.sample().await?)
    }

    async fn power_down(&mut self) -> Result<(), SensorError> {
        Ok(self.suspend().await?)
    }
}
