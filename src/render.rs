pub(crate) mod blend;
pub(crate) mod compositor;
pub(crate) mod pixmap;
pub(crate) mod surface;
