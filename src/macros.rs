//! Macros for declaring isolated, process-wide registries.

/// Declares an isolated, process-wide registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily initialized [`Registry`](crate::Registry) static (hidden)
/// - `registry()`, returning that registry for trait-based access
/// - Free functions mirroring the crate's process-wide API
///
/// # Examples
///
/// ```rust
/// use service_locator::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(services);
///
/// struct Clock;
///
/// services::register(42i32);
/// services::register_factory(|| Clock);
///
/// let num: Arc<i32> = services::resolve().unwrap();
/// let _clock: Arc<Clock> = services::must_resolve();
///
/// assert_eq!(*num, 42);
/// ```
///
/// # Multiple Registries
///
/// Every invocation owns separate storage:
///
/// ```rust
/// use service_locator::define_registry;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::register("db_connection".to_string());
///
/// assert!(database::contains::<String>());
/// assert!(!cache::contains::<String>());
/// ```
///
/// # Trait-Based Usage
///
/// ```rust
/// use service_locator::{define_registry, RegistryApi};
/// use std::sync::Arc;
///
/// define_registry!(app);
///
/// app::registry().register(100i32);
/// let value: Arc<i32> = app::registry().resolve().unwrap();
/// assert_eq!(*value, 100);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            use $crate::RegistryApi as _;

            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// The registry behind this module's functions.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Register a value as the instance for `T`.
            pub fn register<T: Send + Sync + 'static>(value: T) {
                REGISTRY.register(value)
            }

            /// Register an Arc-wrapped value as the instance for `T`.
            pub fn register_arc<T: Send + Sync + 'static>(value: Arc<T>) {
                REGISTRY.register_arc(value)
            }

            /// Register a lazy factory for `T`.
            pub fn register_factory<T, F>(factory: F)
            where
                T: Send + Sync + 'static,
                F: Fn() -> T + Send + Sync + 'static,
            {
                REGISTRY.register_factory(factory)
            }

            /// Resolve `T`, constructing it from its factory on first use.
            pub fn resolve<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::RegistryError> {
                REGISTRY.resolve()
            }

            /// Resolve `T`, panicking if it is not registered.
            #[track_caller]
            pub fn must_resolve<T: Send + Sync + 'static>() -> Arc<T> {
                REGISTRY.must_resolve()
            }

            /// Resolve `T` and return an owned clone.
            pub fn resolve_cloned<T: Send + Sync + Clone + 'static>() -> Result<T, $crate::RegistryError> {
                REGISTRY.resolve_cloned()
            }

            /// Check whether `T` has an instance or a factory.
            pub fn contains<T: Send + Sync + 'static>() -> bool {
                REGISTRY.contains::<T>()
            }

            /// Remove the instance and factory for `T`.
            pub fn unregister<T: Send + Sync + 'static>() {
                REGISTRY.unregister::<T>()
            }

            /// Remove every instance and factory.
            pub fn reset() {
                REGISTRY.reset()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
