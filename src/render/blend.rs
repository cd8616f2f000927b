use crate::foundation::error::{PrimitiveError, PrimitiveResult};

pub(crate) type Rgba8 = [u8; 4];

/// Source-over for straight-alpha pixels.
pub(crate) fn over_straight(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src[3] {
        255 => src,
        0 => dst,
        _ => unpremultiply(over_premul(premultiply(dst), premultiply(src))),
    }
}

/// Source-over of `src` onto `dst`, both straight RGBA8 buffers of equal length.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> PrimitiveResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PrimitiveError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_straight([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn over_premul(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn premultiply(px: Rgba8) -> Rgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub(crate) fn unpremultiply(px: Rgba8) -> Rgba8 {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
