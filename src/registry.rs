//! The owned [`Registry`] handle and the process-wide registry.
//!
//! The free functions in this module operate on a single registry that lives for the
//! whole process and is initialized on first use.
//!
//! # Examples
//!
//! ```
//! use service_locator::{register, register_factory, resolve};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserRepository {
//!     db: Arc<Database>,
//! }
//!
//! register(Database {
//!     url: "postgres://localhost".to_string(),
//! });
//! register_factory(|| UserRepository {
//!     db: service_locator::must_resolve(),
//! });
//!
//! let repo: Arc<UserRepository> = resolve().unwrap();
//! assert_eq!(repo.db.url, "postgres://localhost");
//! ```

use std::{
    fmt,
    sync::{Arc, LazyLock, PoisonError},
};

use crate::{
    registry_trait::{FactoryMap, InstanceMap, TraceSlot},
    RegistryApi, RegistryError, RegistryEvent,
};

/// A registry of instances and lazy factories keyed by type.
///
/// Create one at the composition root of an application and pass it where it is
/// needed, or use the process-wide registry through this module's free functions.
///
/// ```
/// use service_locator::{Registry, RegistryApi};
///
/// let registry = Registry::new();
/// registry.register_factory(|| vec![1u8, 2, 3]);
///
/// assert_eq!(*registry.must_resolve::<Vec<u8>>(), vec![1, 2, 3]);
/// ```
#[derive(Default)]
pub struct Registry {
    instances: InstanceMap,
    factories: FactoryMap,
    trace: TraceSlot,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryApi for Registry {
    fn instances(&self) -> &InstanceMap {
        &self.instances
    }

    fn factories(&self) -> &FactoryMap {
        &self.factories
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        let factories = self
            .factories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();

        f.debug_struct("Registry")
            .field("instances", &instances)
            .field("factories", &factories)
            .finish_non_exhaustive()
    }
}

/// Process-wide registry, initialized on first access and never dropped.
static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Returns the process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

// -------------------------------------------------------------------------------------------------
// Process-wide free functions
// -------------------------------------------------------------------------------------------------

/// Registers `value` as the process-wide instance for `T`.
///
/// Replaces a previous instance of `T`. A factory registered for `T` is kept but is
/// shadowed by the instance.
///
/// # Examples
///
/// ```
/// use service_locator::{register, resolve};
/// use std::sync::Arc;
///
/// register(42i32);
/// register("Hello".to_string());
///
/// let num: Arc<i32> = resolve().expect("Failed to resolve i32");
/// let s: Arc<String> = resolve().expect("Failed to resolve String");
///
/// assert_eq!(*num, 42);
/// assert_eq!(&*s, "Hello");
/// ```
pub fn register<T: Send + Sync + 'static>(value: T) {
    GLOBAL_REGISTRY.register(value);
}

/// Registers an `Arc<T>` as the process-wide instance for `T`.
pub fn register_arc<T: Send + Sync + 'static>(value: Arc<T>) {
    GLOBAL_REGISTRY.register_arc(value);
}

/// Registers a factory for `T` in the process-wide registry without invoking it.
///
/// # Examples
///
/// ```
/// use service_locator::{register_factory, resolve};
/// use std::sync::Arc;
///
/// #[derive(Debug, PartialEq)]
/// struct Settings {
///     retries: u32,
/// }
///
/// register_factory(|| Settings { retries: 3 });
///
/// let first: Arc<Settings> = resolve().unwrap();
/// let second: Arc<Settings> = resolve().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub fn register_factory<T, F>(factory: F)
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    GLOBAL_REGISTRY.register_factory(factory);
}

/// Resolves `T` from the process-wide registry.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if `T` has neither an instance nor a factory.
///
/// ```
/// use service_locator::resolve;
/// use std::sync::Arc;
///
/// struct NeverRegistered;
///
/// let result: Result<Arc<NeverRegistered>, _> = resolve();
/// assert!(result.is_err());
/// ```
pub fn resolve<T: Send + Sync + 'static>() -> Result<Arc<T>, RegistryError> {
    GLOBAL_REGISTRY.resolve()
}

/// Resolves `T` from the process-wide registry, panicking if it is not registered.
#[track_caller]
pub fn must_resolve<T: Send + Sync + 'static>() -> Arc<T> {
    GLOBAL_REGISTRY.must_resolve()
}

/// Resolves `T` from the process-wide registry and returns an owned clone.
pub fn resolve_cloned<T: Send + Sync + Clone + 'static>() -> Result<T, RegistryError> {
    GLOBAL_REGISTRY.resolve_cloned()
}

/// Checks whether `T` has an instance or a factory in the process-wide registry.
pub fn contains<T: Send + Sync + 'static>() -> bool {
    GLOBAL_REGISTRY.contains::<T>()
}

/// Removes the instance and the factory for `T` from the process-wide registry.
pub fn unregister<T: Send + Sync + 'static>() {
    GLOBAL_REGISTRY.unregister::<T>();
}

/// Clears the process-wide registry. Mostly useful between tests.
pub fn reset() {
    GLOBAL_REGISTRY.reset();
}

/// Sets a tracing callback on the process-wide registry.
///
/// # Example
/// ```rust
/// use service_locator::set_trace_callback;
///
/// set_trace_callback(|event| println!("[registry-trace] {}", event));
/// # service_locator::clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    GLOBAL_REGISTRY.set_trace_callback(callback);
}

/// Clears the tracing callback of the process-wide registry.
pub fn clear_trace_callback() {
    GLOBAL_REGISTRY.clear_trace_callback();
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    struct Service {
        name: &'static str,
    }

    #[test]
    #[serial]
    fn test_factory_invoked_once_over_sequential_resolves() {
        reset();

        static CALLS: AtomicUsize = AtomicUsize::new(0);
        CALLS.store(0, Ordering::SeqCst);

        register_factory(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Service { name: "svc" }
        });

        let first: Arc<Service> = resolve().unwrap();
        for _ in 0..4 {
            let again: Arc<Service> = resolve().unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }

        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(first.name, "svc");
    }

    #[test]
    #[serial]
    fn test_resolve_unregistered() {
        reset();

        let result: Result<Arc<Service>, _> = resolve();
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    #[serial]
    fn test_register_then_unregister() {
        reset();

        register(Service { name: "a" });
        unregister::<Service>();

        assert!(!contains::<Service>());
        assert!(resolve::<Service>().is_err());
    }

    #[test]
    #[serial]
    fn test_reset_clears_every_registration() {
        reset();

        register(Service { name: "a" });
        register(7u64);
        register_factory(|| "lazy".to_string());

        reset();

        assert!(resolve::<Service>().is_err());
        assert!(resolve::<u64>().is_err());
        assert!(resolve::<String>().is_err());
    }

    #[test]
    #[serial]
    fn test_must_resolve_success() {
        reset();

        register(Service { name: "must" });
        assert_eq!(must_resolve::<Service>().name, "must");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "no instance or factory registered for type")]
    fn test_must_resolve_panics() {
        reset();

        let _ = must_resolve::<Service>();
    }

    #[test]
    #[serial]
    fn test_global_handle_shares_state_with_free_functions() {
        reset();

        register(5u8);
        assert_eq!(*global().resolve::<u8>().unwrap(), 5);

        global().register(6u8);
        assert_eq!(resolve_cloned::<u8>().unwrap(), 6);
    }

    #[test]
    #[serial]
    fn test_register_arc_shares_allocation() {
        reset();

        let shared = Arc::new(Service { name: "shared" });
        register_arc(shared.clone());

        assert!(Arc::ptr_eq(&shared, &resolve::<Service>().unwrap()));
    }

    #[test]
    #[serial]
    fn test_trace_callback_invoked() {
        reset();

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        set_trace_callback(move |e| events_clone.lock().unwrap().push(e.clone()));

        register(5u8);
        clear_trace_callback();
        register(6u8);

        assert_eq!(
            *events.lock().unwrap(),
            vec![RegistryEvent::RegisterInstance { type_name: "u8" }]
        );
    }

    #[test]
    fn test_owned_registries_are_independent() {
        let a = Registry::new();
        let b = Registry::default();

        a.register(1i32);

        assert!(a.contains::<i32>());
        assert!(!b.contains::<i32>());
    }

    #[test]
    fn test_debug_shows_counts() {
        let registry = Registry::new();
        registry.register(1i32);
        registry.register_factory(|| 2i64);
        registry.register_factory(|| 3u8);

        assert_eq!(
            format!("{:?}", registry),
            "Registry { instances: 1, factories: 2, .. }"
        );
    }
}
