use crate::{
    assets::{
        decode::{decode_image, raster_from_image},
        source::ImageDescriptor,
    },
    foundation::{
        core::TargetBuffer,
        error::{PrimitiveError, PrimitiveResult},
    },
    host::Host,
};

/// Resolve an [`ImageDescriptor`] into the canonical target raster.
///
/// Locators are fetched through `host` and decoded; any failure along that route is a
/// [`PrimitiveError::Load`]. In-memory images that fail to decode are
/// [`PrimitiveError::Decode`], and raw pixels with bad dimensions are
/// [`PrimitiveError::Validation`] labelled `input`.
#[tracing::instrument(skip_all, fields(kind = input.kind()))]
pub async fn normalize_input<H: Host>(
    input: &ImageDescriptor,
    host: &H,
) -> PrimitiveResult<TargetBuffer> {
    let target = match input {
        ImageDescriptor::Locator(locator) => {
            let bytes = host.fetch(locator).await?;
            decode_image(&bytes).map_err(|e| match e {
                PrimitiveError::Decode(msg) => PrimitiveError::load(format!("'{locator}': {msg}")),
                other => other,
            })?
        }
        ImageDescriptor::Image(img) => raster_from_image(img)?,
        ImageDescriptor::Encoded(bytes) => decode_image(bytes)?,
        ImageDescriptor::Pixels(raster) => {
            raster.check().map_err(|e| match e {
                PrimitiveError::Validation { message, .. } => {
                    PrimitiveError::validation("input", message)
                }
                other => other,
            })?;
            raster.clone()
        }
    };

    tracing::debug!(
        width = target.width,
        height = target.height,
        "target raster ready"
    );
    Ok(target)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
