//! ILI9163 command definitions
//!
//! Command bytes used to drive the ILI9163 TFT controller. Every command is
//! sent as one SPI transaction: DC low for the opcode, DC high for the
//! argument bytes, CS held low for the whole exchange.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9163::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _r: &mut [u8], _w: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut interface = Interface::without_reset(MockSpi, MockPin, MockPin);
//! // Turn the panel output on
//! let _ = interface.send_command(command::DISPON, &[]);
//!
//! // 16-bit RGB565 pixels
//! let _ = interface.send_command(command::COLMOD, &[0x05]);
//! ```

// System commands

/// Software reset (0x01)
///
/// Returns all registers to their defaults. Needs a settle delay before the next command.
pub const SWRESET: u8 = 0x01;

/// Sleep out (0x11)
///
/// Leaves sleep mode and starts the booster. Needs a settle delay.
pub const SLPOUT: u8 = 0x11;

/// Normal display mode on (0x13)
pub const NORON: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVON: u8 = 0x21;

/// Display off (0x28)
///
/// Frame memory is kept, output is blanked.
pub const DISPOFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPON: u8 = 0x29;

// Addressing commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Row address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const RASET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Every data byte after this command goes into frame memory inside the
/// current column/row window, row-major.
pub const RAMWR: u8 = 0x2C;

/// Tearing effect line off (0x34)
pub const TEOFF: u8 = 0x34;

/// Tearing effect line on (0x35)
pub const TEON: u8 = 0x35;

/// Memory data access control (0x36)
///
/// Requires 1 byte built from the `MADCTL_*` bits.
pub const MADCTL: u8 = 0x36;

/// Interface pixel format (0x3A)
///
/// Requires 1 byte: 0x05 = 16 bits per pixel.
pub const COLMOD: u8 = 0x3A;

// MADCTL bits

/// Row address order (mirror Y)
pub const MADCTL_MY: u8 = 0x80;
/// Column address order (mirror X)
pub const MADCTL_MX: u8 = 0x40;
/// Row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// BGR color filter panel
pub const MADCTL_BGR: u8 = 0x08;

// Panel control commands

/// Frame rate control, normal mode (0xB1)
pub const FRMCTR1: u8 = 0xB1;
/// Frame rate control, idle mode (0xB2)
pub const FRMCTR2: u8 = 0xB2;
/// Frame rate control, partial mode (0xB3)
pub const FRMCTR3: u8 = 0xB3;
/// Display inversion control (0xB4)
pub const INVCTR: u8 = 0xB4;

/// Power control 1 (0xC0)
pub const PWCTR1: u8 = 0xC0;
/// Power control 2 (0xC1)
pub const PWCTR2: u8 = 0xC1;
/// Power control 3, normal mode (0xC2)
pub const PWCTR3: u8 = 0xC2;
/// Power control 4, idle mode (0xC3)
pub const PWCTR4: u8 = 0xC3;
/// Power control 5, partial mode (0xC4)
pub const PWCTR5: u8 = 0xC4;
/// VCOM control (0xC5)
pub const VMCTR1: u8 = 0xC5;

/// Positive gamma correction (0xE0)
///
/// Requires 15 bytes.
pub const GMCTRP1: u8 = 0xE0;

/// Negative gamma correction (0xE1)
///
/// Requires 15 bytes.
pub const GMCTRN1: u8 = 0xE1;
