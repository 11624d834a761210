//! Host-side doubles for the hardware traits

extern crate std;

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embedded_io_async::{ErrorKind, ErrorType, Read, ReadReady, Write};
use handset_display::{Canvas, Color, DisplayError, Point, Rect, TextStyle, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::config::StickReading;
use crate::traits::{ButtonPad, Joystick, MagSample, Magnetometer, SensorError};

/// Serial port fed from a fixed script; records everything written
pub struct MockSerial {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MockSerial {
    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn written(&self) -> &[u8] {
        &self.output
    }
}

impl ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let n = buf.len().min(self.input.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.input.pop_front().unwrap_or_default();
        }
        Ok(n)
    }
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, ErrorKind> {
        Ok(!self.input.is_empty())
    }
}

impl Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Drawing calls, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Rect, Color),
    Pixel(Point, Color),
    Line(Point, Point, Color),
    Circle(Point, u32, Color),
    Text(Point, String, TextStyle),
    Span(Point, usize),
}

/// Canvas that keeps a framebuffer and a log of calls
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    /// Make `draw_span` fail after logging the call
    pub fail_spans: bool,
    frame: Vec<u16>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fail_spans: false,
            frame: std::vec![0; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    /// Pixel value at a screen position
    pub fn at(&self, x: i32, y: i32) -> Color {
        Color(self.frame[(y * SCREEN_WIDTH + x) as usize])
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, text, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t == needle)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.frame[(y * SCREEN_WIDTH + x) as usize] = color.0;
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        self.ops.push(Op::Fill(rect, color));
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.put(x, y, color);
            }
        }
        Ok(())
    }

    fn draw_pixel(&mut self, at: Point, color: Color) -> Result<(), DisplayError> {
        self.ops.push(Op::Pixel(at, color));
        self.put(at.x, at.y, color);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError> {
        self.ops.push(Op::Line(from, to, color));
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: u32, color: Color) -> Result<(), DisplayError> {
        self.ops.push(Op::Circle(center, radius, color));
        Ok(())
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        self.ops.push(Op::Text(origin, String::from(text), style));
        Ok(())
    }

    fn draw_span(&mut self, origin: Point, pixels: &[Color]) -> Result<(), DisplayError> {
        self.ops.push(Op::Span(origin, pixels.len()));
        if self.fail_spans {
            return Err(DisplayError::Communication);
        }
        for (i, &c) in pixels.iter().enumerate() {
            self.put(origin.x + i as i32, origin.y, c);
        }
        Ok(())
    }
}

/// Delay that returns immediately and counts requested time
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl embedded_hal_async::delay::DelayNs for NoDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Delay that calls a hook with the running call count
///
/// Tests use it to change the lifecycle state after a number of loop
/// iterations so an app loop returns.
pub struct HookDelay<F> {
    pub calls: usize,
    hook: F,
}

impl<F: FnMut(usize)> HookDelay<F> {
    pub fn new(hook: F) -> Self {
        Self { calls: 0, hook }
    }
}

impl<F: FnMut(usize)> embedded_hal_async::delay::DelayNs for HookDelay<F> {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        (self.hook)(self.calls);
    }
}

/// Stick replaying a script, then resting at centre
pub struct ScriptedStick {
    pub script: VecDeque<StickReading>,
}

impl ScriptedStick {
    pub fn new(readings: &[StickReading]) -> Self {
        Self {
            script: readings.iter().copied().collect(),
        }
    }

    pub fn centered() -> Self {
        Self::new(&[])
    }
}

impl Joystick for ScriptedStick {
    async fn read(&mut self) -> StickReading {
        self.script
            .pop_front()
            .unwrap_or(StickReading::new(2048, 2048))
    }
}

/// Buttons replaying a script of masks
pub struct ScriptedButtons {
    pub masks: VecDeque<u8>,
}

impl ScriptedButtons {
    pub fn new(masks: &[u8]) -> Self {
        Self {
            masks: masks.iter().copied().collect(),
        }
    }
}

impl ButtonPad for ScriptedButtons {
    fn read_mask(&mut self) -> u8 {
        self.masks.pop_front().unwrap_or(0)
    }
}

/// Magnetometer returning scripted samples
#[derive(Default)]
pub struct MockMag {
    pub samples: VecDeque<Option<MagSample>>,
    pub powered: bool,
    pub power_ups: usize,
    pub power_downs: usize,
}

impl Magnetometer for MockMag {
    async fn power_up(&mut self) -> Result<(), SensorError> {
        self.powered = true;
        self.power_ups += 1;
        Ok(())
    }

    async fn read(&mut self) -> Result<Option<MagSample>, SensorError> {
        if !self.powered {
            return Err(SensorError::Bus);
        }
        Ok(self.samples.pop_front().flatten())
    }

    async fn power_down(&mut self) -> Result<(), SensorError> {
        self.powered = false;
        self.power_downs += 1;
        Ok(())
    }
}
