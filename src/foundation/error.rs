/// Convenience result type used across the crate.
pub type PrimitiveResult<T> = Result<T, PrimitiveError>;

/// Top-level error taxonomy surfaced by [`crate::primitive`] and its building blocks.
///
/// Every failure rejects the whole run; nothing is retried or recovered locally.
#[derive(thiserror::Error, Debug)]
pub enum PrimitiveError {
    /// Malformed configuration, detected before any resource is touched.
    #[error("validation error: {field}: {message}")]
    Validation {
        /// Label of the offending option (`opts`, `input`, `numSteps`, ...).
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// An input locator could not be fetched or its bytes could not be decoded.
    #[error("load error: {0}")]
    Load(String),

    /// An in-memory image could not be decoded into pixel samples.
    #[error("decode error: {0}")]
    Decode(String),

    /// A named output surface does not exist in the host namespace.
    #[error("surface not found: {0}")]
    SurfaceNotFound(String),

    /// An output surface handle cannot be painted on.
    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    /// Compositing a step onto the output surface failed.
    #[error("render error: {0}")]
    Render(String),

    /// Failure raised by an engine implementation.
    #[error("engine error: {0}")]
    Engine(String),

    /// Failure raised by a caller-supplied step hook.
    #[error("step hook error: {0}")]
    Hook(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrimitiveError {
    /// Build a [`PrimitiveError::Validation`] value.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a [`PrimitiveError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`PrimitiveError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PrimitiveError::SurfaceNotFound`] value.
    pub fn surface_not_found(msg: impl Into<String>) -> Self {
        Self::SurfaceNotFound(msg.into())
    }

    /// Build a [`PrimitiveError::InvalidSurface`] value.
    pub fn invalid_surface(msg: impl Into<String>) -> Self {
        Self::InvalidSurface(msg.into())
    }

    /// Build a [`PrimitiveError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PrimitiveError::Engine`] value.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Build a [`PrimitiveError::Hook`] value.
    pub fn hook(msg: impl Into<String>) -> Self {
        Self::Hook(msg.into())
    }

    /// Label of the offending option for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
