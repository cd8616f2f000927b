use crate::{
    assets::load::normalize_input,
    engine::Engine,
    foundation::error::PrimitiveResult,
    host::Host,
    options::{opts::PrimitiveOpts, validate::validate_opts},
    render::surface::{enable_antialiasing, resolve_output},
    step::{pipeline::StepPipeline, stage::RedrawStage},
};

/// Run `engine` against the image described by `opts`, drawing every step onto the output.
///
/// Stages, in order:
/// 1. validate `opts` (no I/O on failure)
/// 2. normalize the input into the target raster
/// 3. resolve the output surface and enable image smoothing on it
/// 4. compose the caller hook (if any) followed by the redraw stage
/// 5. hand the target and the composed stage to the engine
///
/// The first error at any stage ends the run; an error from the caller hook skips that step's
/// redraw. On success the engine's final model is returned unchanged.
#[tracing::instrument(skip_all, fields(input = opts.input.kind(), steps = opts.engine.num_steps))]
pub async fn primitive<'a, E, H>(
    engine: &mut E,
    host: &'a mut H,
    opts: PrimitiveOpts<'a, E::Model>,
) -> PrimitiveResult<E::Model>
where
    E: Engine,
    H: Host,
{
    validate_opts(&opts)?;
    let PrimitiveOpts {
        input,
        output,
        engine: engine_opts,
        on_step,
    } = opts;

    let target = normalize_input(&input, &*host).await?;

    let mut output = resolve_output(output, host)?;
    enable_antialiasing(&mut output);
    let detached = output.is_detached();

    let mut pipeline: StepPipeline<'a, E::Model> = StepPipeline::new();
    if let Some(hook) = on_step {
        pipeline.push("user", hook);
    }
    pipeline.push("redraw", Box::new(RedrawStage::new(output)));
    tracing::debug!(stages = ?pipeline.stage_names(), detached, "step pipeline ready");

    let model = engine.run(&target, &engine_opts, &mut pipeline).await?;
    tracing::debug!("engine finished");
    Ok(model)
}

#[cfg(test)]
#[path = "../tests/unit/run.rs"]
mod tests;
