//! Board pin assignment
//!
//! | signal | GPIO |
//! |---|---|
//! | keypad rows 0-3 | 6-9 |
//! | keypad columns 0-5 | 10-15 |
//! | up, down, left, right, enter | 16-20 |
//! | OLED SDA / SCL (I2C0) | 4 / 5 |
//!
//! The pin numbers themselves are fixed by the `KeypadPins`/`NavPins`
//! field types; only bus parameters live here.

/// SSD1306 7-bit address with SA0 tied low
pub const OLED_I2C_ADDRESS: u8 = 0x3C;

/// I2C0 bus speed
pub const OLED_I2C_FREQUENCY: u32 = 400_000;
