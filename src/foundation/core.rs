use crate::foundation::error::{PrimitiveError, PrimitiveResult};

/// Pixel dimensions of a raster or surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Number of bytes of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }
}

/// Decoded pixel buffer: straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 samples, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// The canonical input raster handed to the engine.
pub type TargetBuffer = Raster;

impl Raster {
    /// Wrap RGBA8 samples, checking dimensions and sample length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PrimitiveResult<Self> {
        let raster = Self {
            width,
            height,
            data,
        };
        raster.check()?;
        Ok(raster)
    }

    /// A raster of `size` with every pixel set to `rgba`.
    pub fn filled(size: Size, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(size.rgba8_len());
        for _ in 0..size.pixel_count() {
            data.extend_from_slice(&rgba);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    /// A fully transparent raster of `size`.
    pub fn transparent(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.rgba8_len()],
        }
    }

    /// Dimensions of this raster.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Sample at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Dimension sanity check: positive width and height, sample length matching.
    pub fn check(&self) -> PrimitiveResult<()> {
        if self.size().is_empty() {
            return Err(PrimitiveError::validation(
                "raster",
                format!(
                    "width and height must be positive, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        let expected = self.size().rgba8_len();
        if self.data.len() != expected {
            return Err(PrimitiveError::validation(
                "raster",
                format!(
                    "expected {expected} rgba8 bytes for {}x{}, got {}",
                    self.width,
                    self.height,
                    self.data.len()
                ),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
