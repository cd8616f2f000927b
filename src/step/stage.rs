use std::{future::Future, pin::Pin};

use crate::{
    engine::EngineModel,
    foundation::error::PrimitiveResult,
    render::{compositor::Compositor, surface::ResolvedOutput},
};

/// Future returned by a step stage.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = PrimitiveResult<()>> + 'a>>;

/// One unit of work run after every engine step.
///
/// This is also the step-notification contract handed to the engine: the engine awaits the
/// returned future before starting the next step.
pub trait StepStage<M: ?Sized> {
    /// Observe `model` after step `step`.
    fn on_step<'a>(&'a mut self, model: &'a M, step: usize) -> StepFuture<'a>;
}

/// Adapter for closures that return a [`StepFuture`].
pub struct HookFn<F>(F);

/// Wrap an asynchronous closure as a stage.
pub fn hook_fn<M, F>(f: F) -> HookFn<F>
where
    M: ?Sized,
    F: for<'a> FnMut(&'a M, usize) -> StepFuture<'a>,
{
    HookFn(f)
}

impl<M, F> StepStage<M> for HookFn<F>
where
    M: ?Sized,
    F: for<'a> FnMut(&'a M, usize) -> StepFuture<'a>,
{
    fn on_step<'a>(&'a mut self, model: &'a M, step: usize) -> StepFuture<'a> {
        (self.0)(model, step)
    }
}

/// Adapter for plain synchronous closures.
pub struct SyncHook<F>(F);

/// Wrap a synchronous closure as a stage.
pub fn sync_hook<M, F>(f: F) -> SyncHook<F>
where
    M: ?Sized,
    F: FnMut(&M, usize) -> PrimitiveResult<()>,
{
    SyncHook(f)
}

impl<M, F> StepStage<M> for SyncHook<F>
where
    M: ?Sized,
    F: FnMut(&M, usize) -> PrimitiveResult<()>,
{
    fn on_step<'a>(&'a mut self, model: &'a M, step: usize) -> StepFuture<'a> {
        Box::pin(std::future::ready((self.0)(model, step)))
    }
}

/// Stage that composites the model's current raster onto the resolved output.
pub struct RedrawStage<'s> {
    output: ResolvedOutput<'s>,
    compositor: Compositor,
}

impl<'s> RedrawStage<'s> {
    /// Redraw onto `output` with a fresh compositor.
    pub fn new(output: ResolvedOutput<'s>) -> Self {
        Self {
            output,
            compositor: Compositor::new(),
        }
    }

    /// The compositor, for its statistics.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

impl<M: EngineModel + ?Sized> StepStage<M> for RedrawStage<'_> {
    fn on_step<'a>(&'a mut self, model: &'a M, _step: usize) -> StepFuture<'a> {
        let res = self.compositor.redraw(model.current(), &mut self.output);
        Box::pin(std::future::ready(res))
    }
}
