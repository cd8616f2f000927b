use serde::de::DeserializeOwned;

use crate::{
    assets::source::ImageDescriptor,
    foundation::{
        core::Raster,
        error::{PrimitiveError, PrimitiveResult},
    },
    options::opts::{EngineOptions, PrimitiveOpts},
    render::surface::OutputDescriptor,
};

/// Reject malformed top-level configuration before any resource is touched.
///
/// Only the input descriptor's shape is checked; engine options are forwarded as given.
pub fn validate_opts<M: ?Sized>(opts: &PrimitiveOpts<'_, M>) -> PrimitiveResult<()> {
    match &opts.input {
        ImageDescriptor::Locator(locator) if locator.is_empty() => Err(
            PrimitiveError::validation("input", "locator must be a non-empty string"),
        ),
        ImageDescriptor::Encoded(bytes) if bytes.is_empty() => Err(PrimitiveError::validation(
            "input",
            "encoded image must not be empty",
        )),
        ImageDescriptor::Pixels(raster) => raster.check().map_err(|e| match e {
            PrimitiveError::Validation { message, .. } => {
                PrimitiveError::validation("input", message)
            }
            other => other,
        }),
        _ => Ok(()),
    }
}

/// Build options from a JSON option document.
///
/// `input` is a locator string or a `{ "width", "height", "data" }` object with RGBA8 samples,
/// `output` is an optional drawable name, and the remaining keys are the camelCase engine
/// options. Hooks and log sinks cannot be expressed in JSON; attach them afterwards.
pub fn parse_opts_json<'a, M: ?Sized>(
    doc: &serde_json::Value,
) -> PrimitiveResult<PrimitiveOpts<'a, M>> {
    let obj = doc
        .as_object()
        .ok_or_else(|| PrimitiveError::validation("opts", "must be an object"))?;

    let input = obj
        .get("input")
        .ok_or_else(|| PrimitiveError::validation("input", "is required"))
        .and_then(parse_input)?;

    let mut output = OutputDescriptor::None;
    let mut engine = EngineOptions::default();
    for (key, value) in obj {
        match key.as_str() {
            "input" => {}
            "output" => {
                output = match value {
                    serde_json::Value::Null => OutputDescriptor::None,
                    serde_json::Value::String(id) if !id.is_empty() => {
                        OutputDescriptor::Named(id.clone())
                    }
                    _ => {
                        return Err(PrimitiveError::validation(
                            "output",
                            "must be a non-empty drawable name",
                        ));
                    }
                }
            }
            "numSteps" => engine.num_steps = field(key, value)?,
            "minEnergy" => engine.min_energy = field(key, value)?,
            "shapeAlpha" => engine.shape_alpha = field(key, value)?,
            "shapeType" => engine.shape_type = field(key, value)?,
            "numCandidates" => engine.num_candidates = field(key, value)?,
            "numCandidateShapes" => engine.num_candidate_shapes = field(key, value)?,
            "numCandidateMutations" => engine.num_candidate_mutations = field(key, value)?,
            "numCandidateExtras" => engine.num_candidate_extras = field(key, value)?,
            "onStep" | "step" | "log" => {
                return Err(PrimitiveError::validation(
                    key.as_str(),
                    "callbacks cannot be given in a JSON document",
                ));
            }
            _ => {
                return Err(PrimitiveError::validation(
                    key.as_str(),
                    "unrecognized option",
                ));
            }
        }
    }

    let opts = PrimitiveOpts {
        input,
        output,
        engine,
        on_step: None,
    };
    validate_opts(&opts)?;
    Ok(opts)
}

fn field<T: DeserializeOwned>(key: &str, value: &serde_json::Value) -> PrimitiveResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| PrimitiveError::validation(key, e.to_string()))
}

fn parse_input(value: &serde_json::Value) -> PrimitiveResult<ImageDescriptor> {
    #[derive(serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PixelsDoc {
        width: u32,
        height: u32,
        data: Vec<u8>,
    }

    match value {
        serde_json::Value::String(locator) => Ok(ImageDescriptor::Locator(locator.clone())),
        serde_json::Value::Object(_) => {
            let doc: PixelsDoc = field("input", value)?;
            Ok(ImageDescriptor::Pixels(Raster {
                width: doc.width,
                height: doc.height,
                data: doc.data,
            }))
        }
        _ => Err(PrimitiveError::validation(
            "input",
            "must be a locator string or a pixel buffer object",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/validate.rs"]
mod tests;
