//! primitive-canvas drives an image-approximation engine and shows its progress on a drawable.
//!
//! One call to [`primitive`] does the whole job:
//!
//! - Normalize the input ([`ImageDescriptor`]) into a straight-RGBA [`TargetBuffer`]
//! - Resolve the output ([`OutputDescriptor`]) against the [`Host`] and enable smoothing
//! - Run the [`Engine`], redrawing the surface after every step via the [`Compositor`]
//!
//! The engine itself is supplied by the caller through the [`Engine`] trait. Everything here is
//! runtime-agnostic: futures are plain [`std::future::Future`]s and nothing is spawned.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod engine;
mod foundation;
mod host;
mod options;
mod render;
mod run;
mod step;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use crate::foundation::core::{Raster, Size, TargetBuffer};
pub use crate::foundation::error::{PrimitiveError, PrimitiveResult};

pub use crate::assets::decode::{decode_image, raster_from_image};
pub use crate::assets::load::normalize_input;
pub use crate::assets::source::ImageDescriptor;
pub use crate::engine::{Engine, EngineModel};
pub use crate::host::{Host, LocalHost, normalize_rel_path};
pub use crate::options::opts::{EngineOptions, LogSink, PrimitiveOpts, ShapeType};
pub use crate::options::validate::{parse_opts_json, validate_opts};
pub use crate::render::compositor::{Compositor, CompositorStats, ScratchBuffer};
pub use crate::render::pixmap::PixmapSurface;
pub use crate::render::surface::{
    OutputDescriptor, PaintContext, ResolvedOutput, Surface, enable_antialiasing, resolve_output,
};
pub use crate::run::primitive;
pub use crate::step::pipeline::StepPipeline;
pub use crate::step::stage::{
    HookFn, RedrawStage, StepFuture, StepStage, SyncHook, hook_fn, sync_hook,
};
