//! Panel color filter order
//!
//! The controller always receives 16-bit RGB565 words (COLMOD 0x05), sent
//! most significant byte first. Panels differ in the physical order of their
//! subpixels; the BGR bit of MADCTL tells the controller to swap the red and
//! blue channels so RGB565 data shows the intended colors either way.
//!
//! | Order | MADCTL bit 3 | Glass layout      |
//! |-------|--------------|-------------------|
//! | Rgb   | 0            | red first         |
//! | Bgr   | 1            | blue first        |

/// Subpixel order of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red (most ILI9163 1.8" modules)
    #[default]
    Bgr,
}
