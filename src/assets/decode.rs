use crate::foundation::{
    core::Raster,
    error::{PrimitiveError, PrimitiveResult},
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a straight RGBA8 [`Raster`].
pub fn decode_image(bytes: &[u8]) -> PrimitiveResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PrimitiveError::decode(format!("decode image from memory: {e}")))?;
    raster_from_image(&dyn_img)
}

/// Convert a decoded image handle into a straight RGBA8 [`Raster`].
pub fn raster_from_image(img: &image::DynamicImage) -> PrimitiveResult<Raster> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PrimitiveError::decode(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    Ok(Raster {
        width,
        height,
        data: rgba.into_raw(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
