//! ILI9163 TFT Display Driver
//!
//! A driver for the ILI9163 TFT controller driving 128x160 RGB565 panels over SPI.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Encoded init command tables with per-command delays
//! - Address windows with per-module column/row offsets
//! - Display, tearing-effect and inversion toggles
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use ili9163::{Builder, Display, Interface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, cs, dc, rst);
//! let config = Builder::new().spi_frequency(16_000_000).offsets(2, 1).build();
//!
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! // Fill the top-left 16x16 block with red
//! let _ = display.set_address_window(0, 0, 16, 16);
//! let _ = display.write_pixels(core::iter::repeat_n(0xF800, 16 * 16));
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Panel color filter order
pub mod color;
/// ILI9163 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Encoded init command tables
pub mod table;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::ColorOrder;
pub use config::{
    BusConfig, Builder, Config, DEFAULT_SPI_FREQUENCY_HZ, Dimensions, HEIGHT, Offsets,
    Orientation, SPI_MODE, WIDTH,
};
pub use display::Display;
pub use error::{Error, TableError};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface, NoResetPin};
pub use table::{CommandTable, InitCommand};
