use crate::{
    foundation::{
        core::{Raster, Size},
        error::{PrimitiveError, PrimitiveResult},
    },
    host::Host,
};

/// Paint operations available on a drawable.
pub trait PaintContext {
    /// Replace the pixels at `(dx, dy)` with `src`, unscaled and unblended. Clipped to bounds.
    fn put_image_data(&mut self, src: &Raster, dx: u32, dy: u32) -> PrimitiveResult<()>;

    /// Scale `src` into the rectangle `(0, 0, dst.width, dst.height)` and composite it
    /// source-over.
    fn draw_image(&mut self, src: &Raster, dst: Size) -> PrimitiveResult<()>;

    /// Rendering-quality hint for scaled draws.
    fn set_image_smoothing(&mut self, enabled: bool);
}

/// A host-provided paintable region.
///
/// The size may change between steps; callers re-read it instead of caching it.
pub trait Surface {
    /// Current dimensions in pixels.
    fn size(&self) -> Size;

    /// The paint context, if this surface can be drawn on.
    fn context(&mut self) -> Option<&mut dyn PaintContext>;
}

/// Where progressive results should be drawn.
#[derive(Default)]
pub enum OutputDescriptor<'a> {
    /// No rendering: the run is pure compute.
    #[default]
    None,
    /// A drawable registered in the host namespace under this name.
    Named(String),
    /// A drawable handle borrowed for the duration of the run.
    Surface(&'a mut dyn Surface),
}

impl std::fmt::Debug for OutputDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Named(id) => f.debug_tuple("Named").field(id).finish(),
            Self::Surface(s) => f.debug_tuple("Surface").field(&s.size()).finish(),
        }
    }
}

/// A resolved output target.
pub enum ResolvedOutput<'a> {
    /// No output was requested; compositing is a no-op.
    Detached,
    /// The surface every step is drawn onto.
    Surface(&'a mut dyn Surface),
}

impl ResolvedOutput<'_> {
    /// `true` for [`ResolvedOutput::Detached`].
    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached)
    }
}

/// Resolve an [`OutputDescriptor`] against `host`.
///
/// Unknown names fail with [`PrimitiveError::SurfaceNotFound`]; surfaces without a paint
/// context fail with [`PrimitiveError::InvalidSurface`].
pub fn resolve_output<'a, H: Host>(
    desc: OutputDescriptor<'a>,
    host: &'a mut H,
) -> PrimitiveResult<ResolvedOutput<'a>> {
    let surface = match desc {
        OutputDescriptor::None => return Ok(ResolvedOutput::Detached),
        OutputDescriptor::Named(id) => host.surface(&id).ok_or_else(|| {
            PrimitiveError::surface_not_found(format!("no drawable named '{id}'"))
        })?,
        OutputDescriptor::Surface(surface) => surface,
    };

    if surface.context().is_none() {
        return Err(PrimitiveError::invalid_surface(
            "output surface has no paint context",
        ));
    }
    Ok(ResolvedOutput::Surface(surface))
}

/// Turn on image smoothing for the output, if there is one.
///
/// Applied once per run before the first step.
pub fn enable_antialiasing(output: &mut ResolvedOutput<'_>) {
    if let ResolvedOutput::Surface(surface) = output
        && let Some(ctx) = surface.context()
    {
        ctx.set_image_smoothing(true);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
