//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ILI9163 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The ILI9163 requires:
//! - SPI bus (MOSI + SCK), mode 0. A bit-banged bus works as long as it
//!   implements [`SpiBus`].
//! - GPIO pins:
//!   - **CS**: Chip select (output, active low)
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low, optional)
//!
//! The driver drives CS itself so that an opcode and its arguments go out
//! under a single chip-select assertion.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9163::{DisplayInterface, Interface};
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
//! // SPI bus, CS, DC and RST pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Command with arguments, one transaction
//! let _ = interface.send_command(0x3A, &[0x05]);
//!
//! // Raw data (pixels)
//! let _ = interface.send_data(&[0xF8, 0x00]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config::BusConfig;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the ILI9163 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// transport that can frame a command with its arguments.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait on your own type for other transports, or to record traffic in tests.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Apply bus settings before any command traffic
    ///
    /// # Errors
    ///
    /// Returns an error if the bus cannot be reconfigured.
    fn configure(&mut self, bus: &BusConfig) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte followed by its argument bytes
    ///
    /// The implementation must send the whole exchange as one transaction:
    /// 1. Assert CS
    /// 2. Set DC low, send the opcode
    /// 3. Set DC high, send the argument bytes (if any)
    /// 4. Deassert CS
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8, args: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// DC high, one CS assertion. Used for pixel streams after
    /// [`RAMWR`](crate::command::RAMWR).
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Pulses RST: high 100ms, low 100ms, high 200ms. Does nothing when no
    /// reset pin is wired.
    fn reset<D: DelayNs>(&mut self, delay: &mut D);
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Placeholder reset pin for modules with RST tied high
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResetPin;

impl embedded_hal::digital::ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Hardware interface implementation for ILI9163
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`SpiBus`] and
/// GPIO [`OutputPin`]s.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, CS, DC, RST> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Settings requested by the driver
    bus: BusConfig,
}

impl<SPI, CS, DC, RST> Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface with a reset pin
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `cs` - Chip select pin (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst: Some(rst),
            bus: BusConfig::default(),
        }
    }

    /// Bus settings last applied through [`DisplayInterface::configure`]
    ///
    /// The SPI clock itself belongs to the HAL that built `SPI`; use this to
    /// set it up to match.
    pub fn bus_config(&self) -> BusConfig {
        self.bus
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC, Option<RST>) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC> Interface<SPI, CS, DC, NoResetPin>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new Interface for a module without a reset line
    pub fn without_reset(spi: SPI, cs: CS, dc: DC) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst: None,
            bus: BusConfig::default(),
        }
    }
}

impl<SPI, CS, DC, RST, PinErr> Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Run `frame` with CS held low, releasing CS even if it fails
    fn framed<F>(&mut self, frame: F) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>>
    where
        F: FnOnce(&mut Self) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>>,
    {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = frame(self);
        let released = self.cs.set_high().map_err(InterfaceError::Pin);
        result.and(released)
    }

    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.spi.write(bytes).map_err(InterfaceError::Spi)?;
        // DC must not change while bits are still shifting out
        self.spi.flush().map_err(InterfaceError::Spi)
    }
}

impl<SPI, CS, DC, RST, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn configure(&mut self, bus: &BusConfig) -> InterfaceResult<(), Self::Error> {
        log::debug!(
            "spi bus: {} Hz, polarity {:?}, phase {:?}",
            bus.frequency_hz,
            bus.mode.polarity,
            bus.mode.phase
        );
        self.bus = *bus;
        Ok(())
    }

    fn send_command(&mut self, command: u8, args: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.framed(|iface| {
            iface.dc.set_low().map_err(InterfaceError::Pin)?;
            iface.write(&[command])?;
            iface.dc.set_high().map_err(InterfaceError::Pin)?;
            if !args.is_empty() {
                iface.write(args)?;
            }
            Ok(())
        })
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.framed(|iface| {
            iface.dc.set_high().map_err(InterfaceError::Pin)?;
            iface.write(data)
        })
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        let Some(rst) = self.rst.as_mut() else {
            return;
        };
        let _ = rst.set_high();
        delay.delay_ms(100);
        let _ = rst.set_low();
        delay.delay_ms(100);
        let _ = rst.set_high();
        delay.delay_ms(200);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SPI_FREQUENCY_HZ, SPI_MODE};
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[derive(Default)]
    struct RecordingDelay {
        ms: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.ms.push(ms);
        }
    }

    fn low_high() -> [PinTransaction; 2] {
        [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]
    }

    #[test]
    fn test_command_with_args_is_one_transaction() {
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x2A]),
            SpiTransaction::flush(),
            SpiTransaction::write_vec(vec![0x00, 0x0A, 0x00, 0x0E]),
            SpiTransaction::flush(),
        ]);
        let cs = PinMock::new(&low_high());
        let dc = PinMock::new(&low_high());

        let mut interface = Interface::without_reset(spi, cs, dc);
        interface
            .send_command(0x2A, &[0x00, 0x0A, 0x00, 0x0E])
            .unwrap();

        let (mut spi, mut cs, mut dc, _) = interface.release();
        spi.done();
        cs.done();
        dc.done();
    }

    #[test]
    fn test_command_without_args_sends_opcode_only() {
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x29]),
            SpiTransaction::flush(),
        ]);
        let cs = PinMock::new(&low_high());
        // DC returns high after the opcode even with nothing to follow
        let dc = PinMock::new(&low_high());

        let mut interface = Interface::without_reset(spi, cs, dc);
        interface.send_command(0x29, &[]).unwrap();

        let (mut spi, mut cs, mut dc, _) = interface.release();
        spi.done();
        cs.done();
        dc.done();
    }

    #[test]
    fn test_send_data_sets_dc_high() {
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0xF8, 0x00, 0x07, 0xE0]),
            SpiTransaction::flush(),
        ]);
        let cs = PinMock::new(&low_high());
        let dc = PinMock::new(&[PinTransaction::set(PinState::High)]);

        let mut interface = Interface::without_reset(spi, cs, dc);
        interface.send_data(&[0xF8, 0x00, 0x07, 0xE0]).unwrap();

        let (mut spi, mut cs, mut dc, _) = interface.release();
        spi.done();
        cs.done();
        dc.done();
    }

    #[test]
    fn test_reset_pulses_rst() {
        let spi = SpiMock::new(&[]);
        let cs = PinMock::new(&[]);
        let dc = PinMock::new(&[]);
        let rst = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut delay = RecordingDelay::default();

        let mut interface = Interface::new(spi, cs, dc, rst);
        interface.reset(&mut delay);
        assert_eq!(delay.ms, [100, 100, 200]);

        let (mut spi, mut cs, mut dc, rst) = interface.release();
        spi.done();
        cs.done();
        dc.done();
        rst.unwrap().done();
    }

    #[test]
    fn test_reset_without_pin_does_not_wait() {
        let spi = SpiMock::new(&[]);
        let cs = PinMock::new(&[]);
        let dc = PinMock::new(&[]);
        let mut delay = RecordingDelay::default();

        let mut interface = Interface::without_reset(spi, cs, dc);
        interface.reset(&mut delay);
        assert!(delay.ms.is_empty());

        let (mut spi, mut cs, mut dc, rst) = interface.release();
        assert!(rst.is_none());
        spi.done();
        cs.done();
        dc.done();
    }

    #[test]
    fn test_configure_records_bus_settings() {
        let spi = SpiMock::new(&[]);
        let cs = PinMock::new(&[]);
        let dc = PinMock::new(&[]);

        let mut interface = Interface::without_reset(spi, cs, dc);
        assert_eq!(interface.bus_config(), BusConfig::default());

        let bus = BusConfig {
            frequency_hz: 4_000_000,
            mode: SPI_MODE,
        };
        interface.configure(&bus).unwrap();
        assert_eq!(interface.bus_config().frequency_hz, 4_000_000);
        assert_ne!(interface.bus_config().frequency_hz, DEFAULT_SPI_FREQUENCY_HZ);

        let (mut spi, mut cs, mut dc, _) = interface.release();
        spi.done();
        cs.done();
        dc.done();
    }
}
