//! Demo scene rendered while no real UI is integrated
//!
//! A bouncing rectangle proves the timing generator and DMA path work;
//! the crosshair follows the first reported touch point. Drawing goes
//! through embedded-graphics over the raw RGB565 frame buffer.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

const BOX_SIZE: u32 = 48;
const CROSSHAIR: i32 = 14;

/// embedded-graphics target over the panel's little-endian RGB565 buffer
struct FrameSurface<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl OriginDimensions for FrameSurface<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameSurface<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= self.width as i32
                || point.y >= self.height as i32
            {
                continue;
            }
            let idx = 2 * (point.y as usize * self.width as usize + point.x as usize);
            let raw = RawU16::from(color).into_inner();
            self.buf[idx..idx + 2].copy_from_slice(&raw.to_le_bytes());
        }
        Ok(())
    }
}

/// Animated demo state
pub struct Scene {
    width: i32,
    height: i32,
    pos: Point,
    vel: Point,
    cursor: Option<(u16, u16)>,
}

impl Scene {
    pub fn new((width, height): (u16, u16)) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            pos: Point::new(40, 40),
            vel: Point::new(5, 3),
            cursor: None,
        }
    }

    /// Track the first touch contact, or clear the crosshair
    pub fn set_cursor(&mut self, cursor: Option<(u16, u16)>) {
        self.cursor = cursor;
    }

    /// Draw the next animation frame into `buf` and advance the motion
    pub fn draw(&mut self, buf: &mut [u8]) {
        let mut surface = FrameSurface {
            buf,
            width: self.width as u32,
            height: self.height as u32,
        };

        // Drawing into the frame surface cannot fail
        let _ = surface.clear(Rgb565::new(4, 8, 12));

        let _ = Rectangle::new(self.pos, Size::new(BOX_SIZE, BOX_SIZE))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::CSS_ORANGE))
            .draw(&mut surface);

        if let Some((x, y)) = self.cursor {
            let center = Point::new(x as i32, y as i32);
            let style = PrimitiveStyle::with_stroke(Rgb565::WHITE, 2);
            let _ = Line::new(
                center - Point::new(CROSSHAIR, 0),
                center + Point::new(CROSSHAIR, 0),
            )
            .into_styled(style)
            .draw(&mut surface);
            let _ = Line::new(
                center - Point::new(0, CROSSHAIR),
                center + Point::new(0, CROSSHAIR),
            )
            .into_styled(style)
            .draw(&mut surface);
        }

        self.advance();
    }

    fn advance(&mut self) {
        self.pos += self.vel;
        let max = Point::new(self.width - BOX_SIZE as i32, self.height - BOX_SIZE as i32);
        if self.pos.x <= 0 || self.pos.x >= max.x {
            self.pos.x = self.pos.x.clamp(0, max.x);
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0 || self.pos.y >= max.y {
            self.pos.y = self.pos.y.clamp(0, max.y);
            self.vel.y = -self.vel.y;
        }
    }
}
