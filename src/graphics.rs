//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with [`Rgb565`] colors directly.
//! There is no framebuffer: every draw call becomes address windows and
//! pixel writes on the bus.
//!
//! - `draw_iter` addresses a 1x1 window per pixel
//! - `fill_contiguous` streams the whole area through one window when it
//!   lies on the panel
//! - `fill_solid` and `clear` clip to the panel and use one window
//!
//! Pixels outside the 128x160 panel are skipped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use ili9163::{Config, Display, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! let mut display = Display::new(interface, Config::default());
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = display.clear(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(40, 80), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::GREEN, 2))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
    primitives::{PointsIter, Rectangle},
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Address a window matching an on-panel rectangle
    fn set_window(&mut self, area: &Rectangle) -> Result<(), Error<I>> {
        let Point { x, y } = area.top_left;
        self.set_address_window(
            x as u16,
            y as u16,
            area.size.width as u16,
            area.size.height as u16,
        )
    }
}

fn is_empty(area: &Rectangle) -> bool {
    area.size.width == 0 || area.size.height == 0
}

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();

        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            self.set_address_window(point.x as u16, point.y as u16, 1, 1)?;
            self.write_pixels(core::iter::once(color.into_storage()))?;
        }

        Ok(())
    }

    fn fill_contiguous<C>(&mut self, area: &Rectangle, colors: C) -> Result<(), Self::Error>
    where
        C: IntoIterator<Item = Self::Color>,
    {
        let drawn = area.intersection(&self.bounding_box());
        if is_empty(&drawn) {
            return Ok(());
        }

        if drawn == *area {
            let count = area.size.width as usize * area.size.height as usize;
            self.set_window(area)?;
            return self.write_pixels(
                colors
                    .into_iter()
                    .take(count)
                    .map(IntoStorage::into_storage),
            );
        }

        self.draw_iter(
            area.points()
                .zip(colors)
                .map(|(point, color)| Pixel(point, color)),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let drawn = area.intersection(&self.bounding_box());
        if is_empty(&drawn) {
            return Ok(());
        }

        let count = drawn.size.width as usize * drawn.size.height as usize;
        self.set_window(&drawn)?;
        self.write_pixels(core::iter::repeat_n(color.into_storage(), count))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let area = self.bounding_box();
        self.fill_solid(&area, color)
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}
