//! LCD display adapter.
//!
//! Implements [`DisplayPort`] over any `embedded-graphics` draw target.  On
//! the board the target is the ST7789 panel from `drivers::lcd`; host
//! tests draw into a framebuffer.
//!
//! Layout (landscape, 240x135):
//!
//! ```text
//! (10,30)  Devices: 5
//! (10,70)  Status: OFF
//! ```

use core::fmt::Debug;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::{debug, warn};

use crate::app::panel::PanelFrame;
use crate::app::ports::DisplayPort;

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;
const DEVICES_ORIGIN: Point = Point::new(10, 30);
const STATUS_ORIGIN: Point = Point::new(10, 70);

pub struct LcdDisplay<D> {
    target: D,
    redraws: u32,
    failures: u32,
}

impl<D> LcdDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            redraws: 0,
            failures: 0,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    /// Frames pushed to the panel.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    /// Frames the panel rejected.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    fn render(&mut self, frame: &PanelFrame) -> Result<(), D::Error> {
        self.target.clear(BACKGROUND)?;
        let style = MonoTextStyle::new(&FONT_10X20, FOREGROUND);
        Text::with_baseline(frame.devices_line.as_str(), DEVICES_ORIGIN, style, Baseline::Top)
            .draw(&mut self.target)?;
        Text::with_baseline(frame.status_line.as_str(), STATUS_ORIGIN, style, Baseline::Top)
            .draw(&mut self.target)?;
        Ok(())
    }
}

impl<D> DisplayPort for LcdDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    fn draw(&mut self, frame: &PanelFrame) {
        debug!("LCD   | {} | {}", frame.devices_line, frame.status_line);
        match self.render(frame) {
            Ok(()) => self.redraws = self.redraws.wrapping_add(1),
            Err(e) => {
                self.failures = self.failures.wrapping_add(1);
                warn!("LCD   | draw failed: {:?}", e);
            }
        }
    }
}
