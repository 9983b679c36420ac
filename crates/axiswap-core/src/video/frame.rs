use crate::error::{Error, Result};

/// One pixel's luma and chroma samples. Values are opaque bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Yuv {
    pub y: u8,
    pub u: u8,
    pub v: u8,
}

impl Yuv {
    pub const fn new(y: u8, u: u8, v: u8) -> Self {
        Self { y, u, v }
    }
}

/// A decoded frame: a row-major `width x height` grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Yuv>,
}

impl Frame {
    /// Create a frame with every pixel zeroed.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Yuv::default())
    }

    pub fn filled(width: u32, height: u32, pixel: Yuv) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![pixel; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Yuv] {
        &self.pixels
    }

    /// Read the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Yuv> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Result<&mut Yuv> {
        let idx = self.index(x, y)?;
        Ok(&mut self.pixels[idx])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Yuv) -> Result<()> {
        *self.pixel_mut(x, y)? = pixel;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::range(format!(
                "pixel ({x}, {y}) outside {}x{} frame",
                self.width, self.height
            )));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}
