//! GPIO / peripheral pin assignments for the M5StickC Plus2.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

/// Power-hold latch.  Must be driven HIGH right after boot or the PMIC
/// cuts power as soon as the side button is released on battery.
pub const POWER_HOLD_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Front-panel buttons (active-low, external pull-ups, input-only pins)
// ---------------------------------------------------------------------------

/// Button A (large front button): add one identity.
pub const BUTTON_A_GPIO: i32 = 37;
/// Button B (side button): toggle broadcasting.
pub const BUTTON_B_GPIO: i32 = 39;

// ---------------------------------------------------------------------------
// Status LED (red, active-high)
// ---------------------------------------------------------------------------

pub const LED_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// LCD (ST7789V2, 135x240, SPI)
// ---------------------------------------------------------------------------

pub const LCD_SCLK_GPIO: i32 = 13;
pub const LCD_MOSI_GPIO: i32 = 15;
pub const LCD_CS_GPIO: i32 = 5;
pub const LCD_DC_GPIO: i32 = 14;
pub const LCD_RST_GPIO: i32 = 12;
/// Backlight enable (active-high).
pub const LCD_BL_GPIO: i32 = 27;
