//! Log-backed status display.
//!
//! Stands in for the OLED on the host: every text draw is written to the
//! logger at `debug`, tagged with the current font.  Colour changes and
//! rectangle fills are tracked but produce no output.

use core::convert::Infallible;

use log::debug;

use crate::app::ports::{Color, DisplayPort};

pub struct LogDisplay {
    font: u8,
    color: Color,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            font: 0,
            color: Color::White,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl DisplayPort for LogDisplay {
    type Error = Infallible;

    fn set_font(&mut self, font: u8) -> Result<(), Infallible> {
        self.font = font;
        Ok(())
    }

    fn write_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), Infallible> {
        debug!("SCREEN | f{} ({x:>3},{y:>3}) {text}", self.font);
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), Infallible> {
        self.color = color;
        Ok(())
    }

    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32) -> Result<(), Infallible> {
        Ok(())
    }
}
