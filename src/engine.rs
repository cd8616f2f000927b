use std::future::Future;

use crate::{
    foundation::{
        core::{Raster, TargetBuffer},
        error::PrimitiveResult,
    },
    options::opts::EngineOptions,
    step::stage::StepStage,
};

/// Progress snapshot produced by an engine.
///
/// The model is owned by the engine; this crate only reads its working raster.
pub trait EngineModel {
    /// The engine's current working raster.
    fn current(&self) -> &Raster;
}

/// An image-approximation engine that iteratively fits primitives to a target raster.
///
/// Implementations own the step loop. After every step they call `on_step` with the updated
/// model and await it before starting the next step; an error from `on_step` must end the run
/// with that error. Early termination (e.g. on reaching `min_energy`) is the engine's call.
pub trait Engine {
    /// Result and per-step snapshot type.
    type Model: EngineModel;

    /// Approximate `target`, notifying `on_step` after every step.
    fn run<'a>(
        &'a mut self,
        target: &'a TargetBuffer,
        opts: &'a EngineOptions,
        on_step: &'a mut dyn StepStage<Self::Model>,
    ) -> impl Future<Output = PrimitiveResult<Self::Model>> + 'a;
}
