use std::sync::Arc;

use crate::{
    assets::source::ImageDescriptor, render::surface::OutputDescriptor, step::stage::StepStage,
};

/// Diagnostic sink forwarded to the engine.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Primitive kind the engine fits to the target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    /// Triangles.
    #[default]
    Triangle,
    /// Axis-aligned ellipses.
    Ellipse,
    /// Rotated ellipses.
    RotatedEllipse,
    /// Axis-aligned rectangles.
    Rectangle,
    /// Rotated rectangles.
    RotatedRectangle,
    /// Any of the above, chosen per candidate.
    Random,
}

/// Options forwarded verbatim to the engine.
///
/// Nothing here is interpreted by this crate; defaults mirror the engine's documented ones.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Number of steps to run.
    pub num_steps: u32,
    /// Stop early once energy drops below this value.
    pub min_energy: Option<f64>,
    /// Alpha of drawn shapes.
    pub shape_alpha: u8,
    /// Primitive kind to fit.
    pub shape_type: ShapeType,
    /// Top-level candidates per step.
    pub num_candidates: u32,
    /// Random candidate shapes per step.
    pub num_candidate_shapes: u32,
    /// Candidate mutations per step.
    pub num_candidate_mutations: u32,
    /// Extra candidate shapes per step.
    pub num_candidate_extras: u32,
    /// Diagnostic sink.
    #[serde(skip)]
    pub log: Option<LogSink>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            num_steps: 200,
            min_energy: None,
            shape_alpha: 128,
            shape_type: ShapeType::Triangle,
            num_candidates: 1,
            num_candidate_shapes: 50,
            num_candidate_mutations: 100,
            num_candidate_extras: 0,
            log: None,
        }
    }
}

impl EngineOptions {
    /// Send `msg` to the log sink, if any.
    pub fn log(&self, msg: &str) {
        if let Some(log) = &self.log {
            log(msg);
        }
    }
}

impl std::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("num_steps", &self.num_steps)
            .field("min_energy", &self.min_energy)
            .field("shape_alpha", &self.shape_alpha)
            .field("shape_type", &self.shape_type)
            .field("num_candidates", &self.num_candidates)
            .field("num_candidate_shapes", &self.num_candidate_shapes)
            .field("num_candidate_mutations", &self.num_candidate_mutations)
            .field("num_candidate_extras", &self.num_candidate_extras)
            .field("log", &self.log.is_some())
            .finish()
    }
}

/// Top-level configuration of one run.
pub struct PrimitiveOpts<'a, M: ?Sized> {
    /// Image to approximate.
    pub input: ImageDescriptor,
    /// Where to draw progress; [`OutputDescriptor::None`] disables rendering.
    pub output: OutputDescriptor<'a>,
    /// Options forwarded to the engine.
    pub engine: EngineOptions,
    /// Caller hook run after every step, before the redraw.
    pub on_step: Option<Box<dyn StepStage<M> + 'a>>,
}

impl<'a, M: ?Sized> PrimitiveOpts<'a, M> {
    /// Options with `input`, no output, default engine options and no hook.
    pub fn new(input: impl Into<ImageDescriptor>) -> Self {
        Self {
            input: input.into(),
            output: OutputDescriptor::None,
            engine: EngineOptions::default(),
            on_step: None,
        }
    }

    /// Set the output descriptor.
    pub fn output(mut self, output: OutputDescriptor<'a>) -> Self {
        self.output = output;
        self
    }

    /// Replace the engine options.
    pub fn engine(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }

    /// Set the per-step caller hook.
    pub fn on_step(mut self, hook: impl StepStage<M> + 'a) -> Self {
        self.on_step = Some(Box::new(hook));
        self
    }
}

impl<M: ?Sized> std::fmt::Debug for PrimitiveOpts<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveOpts")
            .field("input", &self.input.kind())
            .field("output", &self.output)
            .field("engine", &self.engine)
            .field("on_step", &self.on_step.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/opts.rs"]
mod tests;
