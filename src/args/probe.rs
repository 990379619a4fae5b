//! Filesystem probing capability injected into the router.

use std::io;
use std::path::Path;

/// Synchronous, side-effect-free questions about paths.
///
/// The router only asks; it never touches the filesystem itself. Errors are
/// surfaced to the caller with the attempted path attached.
pub trait PathProbe {
    fn is_directory(&self, path: &Path) -> io::Result<bool>;
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        (**self).is_directory(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        (**self).exists(path)
    }
}
