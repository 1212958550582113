//! Display configuration types and builder

use embedded_hal::spi::{MODE_0, Mode};

use crate::color::ColorOrder;
use crate::command::{MADCTL_BGR, MADCTL_MV, MADCTL_MX, MADCTL_MY};

/// Panel width in pixels
pub const WIDTH: u16 = 128;

/// Panel height in pixels
pub const HEIGHT: u16 = 160;

/// SPI clock used when none (or zero) is configured
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// SPI mode required by the controller (CPOL=0, CPHA=0)
pub const SPI_MODE: Mode = MODE_0;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (columns)
    pub width: u16,
    /// Height in pixels (rows)
    pub height: u16,
}

impl Dimensions {
    /// The 128x160 ILI9163 panel
    pub const PANEL: Self = Self {
        width: WIDTH,
        height: HEIGHT,
    };

    /// Number of pixels on the panel
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// SPI bus settings handed to the interface before init
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// SPI clock frequency in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            mode: SPI_MODE,
        }
    }
}

/// Active-area offset added to every addressing window
///
/// Some modules map the 128x160 glass into the controller's larger RAM
/// at a non-zero origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offsets {
    /// Column offset
    pub col: i8,
    /// Row offset
    pub row: i8,
}

/// Memory access order and color filter layout (MADCTL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    /// Reverse column address order
    pub mirror_x: bool,
    /// Reverse row address order
    pub mirror_y: bool,
    /// Exchange rows and columns
    pub swap_xy: bool,
    /// Subpixel order of the panel
    pub color_order: ColorOrder,
}

impl Default for Orientation {
    /// Mirrored in both axes on a BGR panel, the layout of 1.8" ILI9163 modules
    fn default() -> Self {
        Self {
            mirror_x: true,
            mirror_y: true,
            swap_xy: false,
            color_order: ColorOrder::Bgr,
        }
    }
}

impl Orientation {
    /// The MADCTL register value
    ///
    /// ```
    /// use ili9163::Orientation;
    ///
    /// assert_eq!(Orientation::default().madctl(), 0xC8);
    /// ```
    pub fn madctl(&self) -> u8 {
        let mut value = 0;
        if self.mirror_y {
            value |= MADCTL_MY;
        }
        if self.mirror_x {
            value |= MADCTL_MX;
        }
        if self.swap_xy {
            value |= MADCTL_MV;
        }
        if self.color_order == ColorOrder::Bgr {
            value |= MADCTL_BGR;
        }
        value
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// SPI bus settings
    pub bus: BusConfig,
    /// Active-area offsets
    pub offsets: Offsets,
    /// Orientation written after the init tables
    pub orientation: Orientation,
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ili9163::{Builder, DEFAULT_SPI_FREQUENCY_HZ};
///
/// let config = Builder::new().spi_frequency(0).offsets(2, 1).build();
/// assert_eq!(config.bus.frequency_hz, DEFAULT_SPI_FREQUENCY_HZ);
/// assert_eq!(config.offsets.col, 2);
/// assert_eq!(config.offsets.row, 1);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Requested SPI clock, 0 for the default
    spi_frequency_hz: u32,
    /// Active-area offsets
    offsets: Offsets,
    /// MADCTL layout
    orientation: Orientation,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SPI clock frequency in Hz
    ///
    /// Zero selects [`DEFAULT_SPI_FREQUENCY_HZ`].
    pub fn spi_frequency(mut self, hz: u32) -> Self {
        self.spi_frequency_hz = hz;
        self
    }

    /// Set the column and row offsets
    pub fn offsets(mut self, col: i8, row: i8) -> Self {
        self.offsets = Offsets { col, row };
        self
    }

    /// Set the orientation and color order
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        let frequency_hz = if self.spi_frequency_hz == 0 {
            DEFAULT_SPI_FREQUENCY_HZ
        } else {
            self.spi_frequency_hz
        };
        Config {
            bus: BusConfig {
                frequency_hz,
                mode: SPI_MODE,
            },
            offsets: self.offsets,
            orientation: self.orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bus.frequency_hz, DEFAULT_SPI_FREQUENCY_HZ);
        assert_eq!(config.bus.mode, MODE_0);
        assert_eq!(config.offsets, Offsets::default());
        assert_eq!(config.orientation.madctl(), 0xC8);
    }

    #[test]
    fn test_explicit_frequency_is_kept() {
        let config = Builder::new().spi_frequency(24_000_000).build();
        assert_eq!(config.bus.frequency_hz, 24_000_000);
    }

    #[test]
    fn test_madctl_bits() {
        let plain = Orientation {
            mirror_x: false,
            mirror_y: false,
            swap_xy: false,
            color_order: ColorOrder::Rgb,
        };
        assert_eq!(plain.madctl(), 0x00);

        let swapped = Orientation {
            swap_xy: true,
            ..plain
        };
        assert_eq!(swapped.madctl(), 0x20);

        let mirrored = Orientation {
            mirror_x: true,
            ..plain
        };
        assert_eq!(mirrored.madctl(), 0x40);
    }

    #[test]
    fn test_panel_dimensions() {
        assert_eq!(Dimensions::PANEL.width, 128);
        assert_eq!(Dimensions::PANEL.height, 160);
        assert_eq!(Dimensions::PANEL.pixel_count(), 20_480);
    }
}
