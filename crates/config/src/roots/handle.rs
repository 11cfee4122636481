//! Shared, reloadable access to the current root registry.
//!
//! Readers take cheap `Arc` snapshots; a reload builds the replacement
//! registry completely before swapping it in, so readers never observe a
//! partially loaded set of roots.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::error::LoadError;
use super::loader::RootLoader;
use super::registry::RootRegistry;

/// Publishes one `RootRegistry` at a time to any number of readers.
pub struct RegistryHandle {
    current: ArcSwap<RootRegistry>,
}

impl RegistryHandle {
    pub fn new(registry: RootRegistry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Loads `path` with `loader` and publishes the result.
    ///
    /// # Errors
    /// Returns the loader's error; no handle is created.
    pub fn load(loader: &RootLoader, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        loader.load(path).map(Self::new)
    }

    /// Snapshot of the registry published right now.
    ///
    /// The snapshot stays valid after later reloads.
    pub fn current(&self) -> Arc<RootRegistry> {
        self.current.load_full()
    }

    /// Rebuilds the registry from `path` and swaps it in.
    ///
    /// # Errors
    /// Returns the loader's error and leaves the previous registry published.
    pub fn reload(&self, loader: &RootLoader, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        match loader.load(path) {
            Ok(registry) => {
                self.replace(registry);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Root reload failed, keeping previous registry"
                );
                Err(e)
            }
        }
    }

    /// Publishes `registry`, returning the one it replaced.
    pub fn replace(&self, registry: RootRegistry) -> Arc<RootRegistry> {
        self.current.swap(Arc::new(registry))
    }
}

impl std::fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("roots", &self.current.load().len())
            .finish()
    }
}
