use image::imageops::FilterType;

use crate::{
    foundation::{
        core::{Raster, Size},
        error::{PrimitiveError, PrimitiveResult},
    },
    render::{
        blend,
        surface::{PaintContext, Surface},
    },
};

/// In-memory drawable: a straight RGBA8 raster with its own paint context.
///
/// Used as the scratch buffer of the compositor and as the drawable type of [`crate::LocalHost`].
#[derive(Clone, Debug)]
pub struct PixmapSurface {
    raster: Raster,
    smoothing: bool,
}

impl PixmapSurface {
    /// A transparent pixmap of `size`. Image smoothing starts disabled.
    pub fn new(size: Size) -> Self {
        Self {
            raster: Raster::transparent(size),
            smoothing: false,
        }
    }

    /// A pixmap initialised with `raster`'s contents.
    pub fn from_raster(raster: Raster) -> Self {
        Self {
            raster,
            smoothing: false,
        }
    }

    /// Current contents.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Consume the pixmap, returning its contents.
    pub fn into_raster(self) -> Raster {
        self.raster
    }

    /// Reallocate to `size`. Previous contents are discarded.
    pub fn resize(&mut self, size: Size) {
        self.raster = Raster::transparent(size);
    }

    /// Whether scaled draws interpolate (bilinear) rather than pick nearest samples.
    pub fn image_smoothing(&self) -> bool {
        self.smoothing
    }

    fn copy_rows(&mut self, src: &Raster, dx: u32, dy: u32, over: bool) -> PrimitiveResult<()> {
        let dst_w = self.raster.width as usize;
        let dst_h = self.raster.height as usize;
        let (dx, dy) = (dx as usize, dy as usize);
        if dx >= dst_w || dy >= dst_h {
            return Ok(());
        }

        let cols = (dst_w - dx).min(src.width as usize);
        let rows = (dst_h - dy).min(src.height as usize);
        let row_bytes = cols * 4;
        for y in 0..rows {
            let s = y * src.width as usize * 4;
            let d = ((dy + y) * dst_w + dx) * 4;
            let src_row = &src.data[s..s + row_bytes];
            let dst_row = &mut self.raster.data[d..d + row_bytes];
            if over {
                blend::over_in_place(dst_row, src_row)?;
            } else {
                dst_row.copy_from_slice(src_row);
            }
        }
        Ok(())
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        self.raster.size()
    }

    fn context(&mut self) -> Option<&mut dyn PaintContext> {
        Some(self)
    }
}

impl PaintContext for PixmapSurface {
    fn put_image_data(&mut self, src: &Raster, dx: u32, dy: u32) -> PrimitiveResult<()> {
        src.check()
            .map_err(|e| PrimitiveError::render(format!("put_image_data: {e}")))?;

        if dx == 0 && dy == 0 && src.size() == self.raster.size() {
            self.raster.data.copy_from_slice(&src.data);
            return Ok(());
        }
        self.copy_rows(src, dx, dy, false)
    }

    fn draw_image(&mut self, src: &Raster, dst: Size) -> PrimitiveResult<()> {
        src.check()
            .map_err(|e| PrimitiveError::render(format!("draw_image: {e}")))?;
        if dst.is_empty() {
            return Ok(());
        }

        if src.size() == dst {
            return self.copy_rows(src, 0, 0, true);
        }
        let scaled = Raster {
            width: dst.width,
            height: dst.height,
            data: scale_rgba8(src, dst, self.smoothing)?,
        };
        self.copy_rows(&scaled, 0, 0, true)
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }
}

// Interpolation runs on premultiplied samples so colour next to transparent pixels is not
// pulled towards black.
fn scale_rgba8(src: &Raster, dst: Size, smoothing: bool) -> PrimitiveResult<Vec<u8>> {
    let mut premul = Vec::with_capacity(src.data.len());
    for px in src.data.chunks_exact(4) {
        premul.extend_from_slice(&blend::premultiply([px[0], px[1], px[2], px[3]]));
    }
    let view = image::RgbaImage::from_raw(src.width, src.height, premul)
        .ok_or_else(|| PrimitiveError::render("source samples do not match dimensions"))?;
    let filter = if smoothing {
        FilterType::Triangle
    } else {
        FilterType::Nearest
    };

    let mut out = image::imageops::resize(&view, dst.width, dst.height, filter).into_raw();
    for px in out.chunks_exact_mut(4) {
        let straight = blend::unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&straight);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixmap.rs"]
mod tests;
