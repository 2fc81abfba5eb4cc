//! Lazily-attached registry handles.

use std::sync::{Arc, OnceLock, Weak};

/// A write-once, weakly-held reference to a shared registry.
///
/// Adapters are registered into the same registry they delegate through, so
/// they cannot hold a strong reference without creating a cycle. The feature
/// registrar attaches the handle after the registry is frozen; attachment is
/// idempotent and safe under concurrent use.
pub(crate) struct RegistryHandle<T> {
    slot: OnceLock<Weak<T>>,
}

impl<T> RegistryHandle<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Attaches the registry. Later calls are ignored.
    pub(crate) fn attach(&self, registry: &Arc<T>) {
        let _ = self.slot.set(Arc::downgrade(registry));
    }

    /// Returns the registry, or `None` when unattached or already dropped.
    pub(crate) fn get(&self) -> Option<Arc<T>> {
        self.slot.get()?.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_is_idempotent() {
        let handle = RegistryHandle::new();
        let first = Arc::new(1_u32);
        let second = Arc::new(2_u32);

        handle.attach(&first);
        handle.attach(&second);
        assert_eq!(handle.get().as_deref(), Some(&1));
    }

    #[test]
    fn test_unattached_handle_is_empty() {
        let handle: RegistryHandle<u32> = RegistryHandle::new();
        assert!(handle.get().is_none());
    }

    #[test]
    fn test_dropped_registry_is_gone() {
        let handle = RegistryHandle::new();
        let registry = Arc::new(1_u32);
        handle.attach(&registry);
        drop(registry);
        assert!(handle.get().is_none());
    }
}
