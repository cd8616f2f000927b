use crate::{
    foundation::error::PrimitiveResult,
    step::stage::{StepFuture, StepStage},
};

/// Ordered list of named stages run after every engine step.
///
/// Stages run one after another in insertion order, each awaited to completion. The first
/// failing stage aborts the remaining ones for that step and its error is returned.
pub struct StepPipeline<'s, M: ?Sized> {
    stages: Vec<(&'static str, Box<dyn StepStage<M> + 's>)>,
}

impl<'s, M: ?Sized> StepPipeline<'s, M> {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage.
    pub fn push(&mut self, name: &'static str, stage: Box<dyn StepStage<M> + 's>) {
        self.stages.push((name, stage));
    }

    /// Builder-style [`StepPipeline::push`].
    pub fn with_stage(mut self, name: &'static str, stage: Box<dyn StepStage<M> + 's>) -> Self {
        self.push(name, stage);
        self
    }

    /// Stage names in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(name, _)| *name).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` when no stages were added.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage for one step.
    pub async fn run(&mut self, model: &M, step: usize) -> PrimitiveResult<()> {
        for (name, stage) in &mut self.stages {
            if let Err(e) = stage.on_step(model, step).await {
                tracing::debug!(stage = *name, step, error = %e, "step stage failed");
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<M: ?Sized> Default for StepPipeline<'_, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ?Sized> StepStage<M> for StepPipeline<'_, M> {
    fn on_step<'a>(&'a mut self, model: &'a M, step: usize) -> StepFuture<'a> {
        Box::pin(self.run(model, step))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/step/pipeline.rs"]
mod tests;
