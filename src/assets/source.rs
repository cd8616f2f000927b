use crate::foundation::core::Raster;

/// Where the target image comes from.
///
/// The descriptor is owned by the caller and only read during normalization.
#[derive(Clone, Debug)]
pub enum ImageDescriptor {
    /// Resource locator resolved through [`crate::Host::fetch`].
    Locator(String),
    /// An image that has already been decoded.
    Image(image::DynamicImage),
    /// Encoded image bytes held in memory.
    Encoded(Vec<u8>),
    /// Straight RGBA8 samples used as-is.
    Pixels(Raster),
}

impl ImageDescriptor {
    /// Short variant name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Locator(_) => "locator",
            Self::Image(_) => "image",
            Self::Encoded(_) => "encoded",
            Self::Pixels(_) => "pixels",
        }
    }
}

impl From<&str> for ImageDescriptor {
    fn from(locator: &str) -> Self {
        Self::Locator(locator.to_string())
    }
}

impl From<String> for ImageDescriptor {
    fn from(locator: String) -> Self {
        Self::Locator(locator)
    }
}

impl From<Raster> for ImageDescriptor {
    fn from(raster: Raster) -> Self {
        Self::Pixels(raster)
    }
}

impl From<image::DynamicImage> for ImageDescriptor {
    fn from(img: image::DynamicImage) -> Self {
        Self::Image(img)
    }
}
