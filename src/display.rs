//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    CASET, DISPOFF, DISPON, INVOFF, INVON, MADCTL, RAMWR, RASET, TEOFF, TEON,
};
use crate::config::{Config, Dimensions, Offsets};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::table::{BASELINE, GAMMA_AND_ENABLE, InitCommand};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Bytes buffered per SPI write when streaming pixels
const PIXEL_CHUNK_BYTES: usize = 64;

/// Pack an address span as `start << 16 | end`
///
/// `end` is `start + size - 1` in wrapping 16-bit arithmetic; no bounds are
/// checked. Sent big-endian as the four CASET/RASET argument bytes.
///
/// ```
/// use ili9163::display::window_span;
///
/// assert_eq!(window_span(10, 5), (10 << 16) | 14);
/// ```
pub fn window_span(start: u16, size: u16) -> u32 {
    let end = start.wrapping_add(size).wrapping_sub(1);
    (u32::from(start) << 16) | u32::from(end)
}

/// Core display driver for ILI9163
///
/// Replays the controller init tables, then addresses windows of frame
/// memory for pixel streams. For embedded-graphics support enable the
/// `graphics` feature.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Whether `init` has completed
    is_ready: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            is_ready: false,
        }
    }

    /// Configure the bus, reset and initialize the controller
    ///
    /// Runs the full sequence every time it is called: bus setup, hardware
    /// reset, the baseline and gamma tables, then MADCTL with the configured
    /// orientation. Blocks for the table delays (about 610ms) plus the reset
    /// pulse.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.is_ready = false;

        let bus = self.config.bus;
        self.interface.configure(&bus).map_err(Error::Interface)?;
        self.interface.reset(delay);

        self.replay(BASELINE.iter().copied(), delay)?;
        self.replay(GAMMA_AND_ENABLE.iter().copied(), delay)?;

        let madctl = self.config.orientation.madctl();
        self.send_command(MADCTL, &[madctl])?;

        self.is_ready = true;
        log::debug!("ili9163 ready, madctl {madctl:#04x}");
        Ok(())
    }

    /// Send each command of a table in order, honoring its delays
    ///
    /// Accepts built-in tables (`BASELINE.iter().copied()`) as well as
    /// decoded [`CommandTable`](crate::table::CommandTable)s. A command's
    /// delay elapses before the next command is sent.
    pub fn replay<'a, T, D>(&mut self, table: T, delay: &mut D) -> DisplayResult<I>
    where
        T: IntoIterator<Item = InitCommand<'a>>,
        D: DelayNs,
    {
        log::debug!("replaying command table");
        let mut sent = 0usize;
        for command in table {
            log::trace!(
                "cmd {:#04x} args {:02x?} delay {:?}",
                command.opcode,
                command.args,
                command.delay_ms
            );
            self.send_command(command.opcode, command.args)?;
            if let Some(ms) = command.delay_ms {
                delay.delay_ms(u32::from(ms));
            }
            sent += 1;
        }
        log::debug!("replayed {sent} commands");
        Ok(())
    }

    /// Target subsequent pixel writes at a rectangle
    ///
    /// Adds the configured offsets to `(x, y)`, sends CASET and RASET with
    /// the packed spans, then RAMWR. The next `w * h` pixels written land in
    /// the rectangle, row-major. Coordinates are not checked against the
    /// panel.
    #[allow(clippy::many_single_char_names)]
    pub fn set_address_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> DisplayResult<I> {
        if !self.is_ready {
            log::warn!("address window set before init");
        }
        let Offsets { col, row } = self.config.offsets;
        let x = x.wrapping_add_signed(i16::from(col));
        let y = y.wrapping_add_signed(i16::from(row));

        let columns = window_span(x, w);
        let rows = window_span(y, h);
        log::trace!("window cols {columns:#010x} rows {rows:#010x}");

        self.send_command(CASET, &columns.to_be_bytes())?;
        self.send_command(RASET, &rows.to_be_bytes())?;
        self.send_command(RAMWR, &[])
    }

    /// Set the active-area offsets
    ///
    /// Takes effect on the next [`set_address_window`](Self::set_address_window).
    /// No bus traffic.
    pub fn set_offsets(&mut self, col: i8, row: i8) {
        self.config.offsets = Offsets { col, row };
    }

    /// Turn the panel output on or off (DISPON / DISPOFF)
    pub fn set_display_enabled(&mut self, enable: bool) -> DisplayResult<I> {
        self.send_command(if enable { DISPON } else { DISPOFF }, &[])
    }

    /// Enable or disable the tearing effect output line (TEON / TEOFF)
    pub fn set_tearing_sync_enabled(&mut self, enable: bool) -> DisplayResult<I> {
        self.send_command(if enable { TEON } else { TEOFF }, &[])
    }

    /// Invert all displayed colors (INVON / INVOFF)
    pub fn set_inverted(&mut self, invert: bool) -> DisplayResult<I> {
        self.send_command(if invert { INVON } else { INVOFF }, &[])
    }

    /// Stream RGB565 pixels into the current window
    ///
    /// Each pixel is sent most significant byte first. Call
    /// [`set_address_window`](Self::set_address_window) first.
    pub fn write_pixels<P>(&mut self, pixels: P) -> DisplayResult<I>
    where
        P: IntoIterator<Item = u16>,
    {
        let mut buf = [0u8; PIXEL_CHUNK_BYTES];
        let mut len = 0;
        for pixel in pixels {
            let [hi, lo] = pixel.to_be_bytes();
            buf[len] = hi;
            buf[len + 1] = lo;
            len += 2;
            if len == buf.len() {
                self.send_data(&buf)?;
                len = 0;
            }
        }
        if len > 0 {
            self.send_data(&buf[..len])?;
        }
        Ok(())
    }

    /// Stream pre-encoded pixel bytes into the current window
    pub fn write_pixel_bytes(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.send_data(data)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8, args: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_command(cmd, args)
            .map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::PANEL
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether [`init`](Self::init) has completed
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Access the underlying interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }
}
