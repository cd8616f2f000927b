use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{PrimitiveError, PrimitiveResult},
    render::{pixmap::PixmapSurface, surface::Surface},
};

/// The environment a run executes in: where input bytes come from and where named drawables
/// live.
pub trait Host {
    /// Fetch the raw bytes behind a resource locator.
    ///
    /// Failures are reported as [`PrimitiveError::Load`].
    fn fetch(&self, locator: &str) -> impl Future<Output = PrimitiveResult<Vec<u8>>>;

    /// Look up a drawable surface by name.
    fn surface(&mut self, id: &str) -> Option<&mut dyn Surface>;
}

/// Filesystem-backed host with an in-memory drawable namespace.
///
/// Locators are absolute paths, `file://` URLs, or paths relative to the assets root.
/// Relative locators are normalized and may not leave the root.
#[derive(Debug)]
pub struct LocalHost {
    root: PathBuf,
    surfaces: BTreeMap<String, PixmapSurface>,
}

impl LocalHost {
    /// Create a host resolving relative locators against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            surfaces: BTreeMap::new(),
        }
    }

    /// Builder-style [`LocalHost::insert_surface`].
    pub fn with_surface(mut self, id: impl Into<String>, surface: PixmapSurface) -> Self {
        self.insert_surface(id, surface);
        self
    }

    /// Register a named drawable, replacing any previous one with that name.
    pub fn insert_surface(&mut self, id: impl Into<String>, surface: PixmapSurface) {
        self.surfaces.insert(id.into(), surface);
    }

    /// Borrow a named drawable.
    pub fn pixmap(&self, id: &str) -> Option<&PixmapSurface> {
        self.surfaces.get(id)
    }

    /// Mutably borrow a named drawable, e.g. to resize it between runs.
    pub fn pixmap_mut(&mut self, id: &str) -> Option<&mut PixmapSurface> {
        self.surfaces.get_mut(id)
    }

    /// Root directory used for relative locators.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_path(&self, locator: &str) -> PrimitiveResult<PathBuf> {
        let locator = locator.strip_prefix("file://").unwrap_or(locator);
        let path = Path::new(locator);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(self.root.join(normalize_rel_path(locator)?))
    }
}

impl Host for LocalHost {
    fn fetch(&self, locator: &str) -> impl Future<Output = PrimitiveResult<Vec<u8>>> {
        let path = self.resolve_path(locator);
        async move {
            let path = path?;
            std::fs::read(&path)
                .map_err(|e| PrimitiveError::load(format!("read '{}': {e}", path.display())))
        }
    }

    fn surface(&mut self, id: &str) -> Option<&mut dyn Surface> {
        self.surfaces
            .get_mut(id)
            .map(|s| s as &mut dyn Surface)
    }
}

/// Normalize a relative locator into a `/`-separated path below the assets root.
///
/// Backslashes count as separators and `.` segments are dropped. Absolute paths, `..`
/// segments and locators without a file name fail with [`PrimitiveError::Load`].
pub fn normalize_rel_path(locator: &str) -> PrimitiveResult<String> {
    let unified = locator.replace('\\', "/");
    let reject = |why: &str| PrimitiveError::load(format!("cannot resolve '{locator}': {why}"));
    if unified.starts_with('/') {
        return Err(reject("path must be relative"));
    }

    let segments = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .map(|seg| match seg {
            ".." => Err(reject("path must not leave the assets root")),
            _ => Ok(seg),
        })
        .collect::<PrimitiveResult<Vec<_>>>()?;

    if segments.is_empty() {
        return Err(reject("path has no file name"));
    }
    Ok(segments.join("/"))
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
