//! Status screen layout.
//!
//! ```text
//!  y=16  TMP: 29 C        (font 1)
//!  y=37  HUM: 61 %        (font 1)
//!  y=49  HEATER / HEATER off
//!  y=62  COOLING / COOLING off
//! ```
//!
//! Banners are drawn over the previous frame without clearing the screen,
//! so the short "active" banner blanks out the trailing " off" of the
//! long one with a filled rectangle in the background colour.

use core::fmt::Write;

use crate::app::ports::{Color, DisplayPort};

pub const FONT_SMALL: u8 = 0;
pub const FONT_LARGE: u8 = 1;

const TEMP_POS: (i32, i32) = (0, 16);
const HUM_POS: (i32, i32) = (0, 37);
const HEATER_POS: (i32, i32) = (0, 49);
const COOLER_POS: (i32, i32) = (0, 62);

/// Area covering " off" after "HEATER".
const HEATER_OFF_TAIL: (i32, i32, u32, u32) = (54, 41, 50, 10);
/// Area covering " off" after "COOLING".
const COOLER_OFF_TAIL: (i32, i32, u32, u32) = (62, 54, 50, 10);

/// Wide enough for any `i32` reading, so formatting never truncates.
type Line = heapless::String<24>;

/// Everything the status screen shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenStatus {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub heater_active: bool,
    pub cooler_active: bool,
}

/// Draw the full status screen.
pub fn render_status<V: DisplayPort>(
    display: &mut V,
    status: &ScreenStatus,
) -> Result<(), V::Error> {
    display.set_font(FONT_LARGE)?;
    display.write_string(TEMP_POS.0, TEMP_POS.1, &temperature_line(status.temperature_c))?;
    display.write_string(HUM_POS.0, HUM_POS.1, &humidity_line(status.humidity_pct))?;

    display.set_font(FONT_SMALL)?;
    banner(display, HEATER_POS, "HEATER", status.heater_active, HEATER_OFF_TAIL)?;
    banner(display, COOLER_POS, "COOLING", status.cooler_active, COOLER_OFF_TAIL)
}

fn banner<V: DisplayPort>(
    display: &mut V,
    (x, y): (i32, i32),
    label: &str,
    active: bool,
    (rx, ry, rw, rh): (i32, i32, u32, u32),
) -> Result<(), V::Error> {
    if active {
        display.write_string(x, y, label)?;
        display.set_color(Color::Black)?;
        display.fill_rect(rx, ry, rw, rh)?;
        display.set_color(Color::White)
    } else {
        let mut line = Line::new();
        // Both labels fit with room to spare.
        let _ = write!(line, "{label} off");
        display.write_string(x, y, &line)
    }
}

/// `"TMP: 29 C"`: floored, left-aligned in two columns.
pub fn temperature_line(celsius: f32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "TMP: {:<2} C", celsius.floor() as i32);
    line
}

/// `"HUM: 61 %"`: floored, left-aligned in three columns.
pub fn humidity_line(percent: f32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "HUM: {:<3}%", percent.floor() as i32);
    line
}
