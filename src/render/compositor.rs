use crate::{
    foundation::{
        core::{Raster, Size},
        error::{PrimitiveError, PrimitiveResult},
    },
    render::{
        pixmap::PixmapSurface,
        surface::{PaintContext, ResolvedOutput},
    },
};

/// Counters describing which compositing paths were taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Steps copied directly onto an equally sized surface.
    pub fast_path_frames: u64,
    /// Steps drawn through the scratch buffer.
    pub slow_path_frames: u64,
    /// Times the scratch buffer was first allocated.
    pub scratch_allocs: u64,
    /// Times the scratch buffer was (re)sized, including the first allocation.
    pub scratch_resizes: u64,
}

/// Off-surface buffer used when the raster and the surface disagree in size.
///
/// Holds at most one pixmap. Every [`ScratchBuffer::resize`] discards previous contents.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    pixmap: Option<PixmapSurface>,
}

impl ScratchBuffer {
    /// Size the buffer to exactly `size`, allocating it on first use.
    ///
    /// Returns whether this call allocated.
    pub fn resize(&mut self, size: Size) -> (&mut PixmapSurface, bool) {
        let allocated = self.pixmap.is_none();
        let pixmap = self
            .pixmap
            .get_or_insert_with(|| PixmapSurface::new(size));
        if !allocated {
            pixmap.resize(size);
        }
        (pixmap, allocated)
    }

    /// The buffer, if it has been allocated.
    pub fn pixmap(&self) -> Option<&PixmapSurface> {
        self.pixmap.as_ref()
    }
}

/// Copies the engine's working raster onto the output surface after every step.
#[derive(Debug, Default)]
pub struct Compositor {
    scratch: ScratchBuffer,
    stats: CompositorStats,
}

impl Compositor {
    /// A compositor with no scratch buffer allocated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path counters accumulated so far.
    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// The scratch buffer, for inspection.
    pub fn scratch(&self) -> &ScratchBuffer {
        &self.scratch
    }

    /// Make `output` show `raster`.
    ///
    /// Equal sizes take the direct-copy path. Otherwise the raster is written into the scratch
    /// buffer at its own size and drawn scaled onto the whole surface. The surface size is read
    /// on every call.
    pub fn redraw(
        &mut self,
        raster: &Raster,
        output: &mut ResolvedOutput<'_>,
    ) -> PrimitiveResult<()> {
        let surface = match output {
            ResolvedOutput::Detached => return Ok(()),
            ResolvedOutput::Surface(surface) => surface,
        };

        let surface_size = surface.size();
        if surface_size.is_empty() {
            return Err(PrimitiveError::render(format!(
                "output surface is {}x{}",
                surface_size.width, surface_size.height
            )));
        }
        let ctx = surface
            .context()
            .ok_or_else(|| PrimitiveError::render("output surface lost its paint context"))?;

        let raster_size = raster.size();
        if surface_size == raster_size {
            tracing::trace!(
                width = raster_size.width,
                height = raster_size.height,
                "redraw fast path"
            );
            ctx.put_image_data(raster, 0, 0)?;
            self.stats.fast_path_frames += 1;
            return Ok(());
        }

        tracing::trace!(
            raster_width = raster_size.width,
            raster_height = raster_size.height,
            surface_width = surface_size.width,
            surface_height = surface_size.height,
            "redraw slow path"
        );
        let (scratch, allocated) = self.scratch.resize(raster_size);
        self.stats.scratch_resizes += 1;
        if allocated {
            self.stats.scratch_allocs += 1;
        }
        scratch.put_image_data(raster, 0, 0)?;
        ctx.draw_image(scratch.raster(), surface_size)?;
        self.stats.slow_path_frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
