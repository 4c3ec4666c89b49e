//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! registering instances and lazy factories, resolving them by type, and tracing.
//!
//! The registry is type-based: each [`TypeKey`] can have at most one instance and at
//! most one factory stored. Registering again for the same type replaces the previous
//! entry. An instance always takes precedence over a factory.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{RegistryError, RegistryEvent, TypeKey};

/// Type-erased value stored for a key.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased zero-argument constructor stored for a key.
pub type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Instances by type.
pub type InstanceMap = Mutex<HashMap<TypeKey, Instance>>;

/// Factories by type.
pub type FactoryMap = Mutex<HashMap<TypeKey, Factory>>;

/// The user-supplied tracing callback.
///
/// It must be thread-safe because registries are shared between threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Slot holding the optional tracing callback of a registry.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// Locks a registry map, recovering the guard if a previous holder panicked.
///
/// Every critical section is a single map operation, so a poisoned map is still
/// consistent.
fn lock<M>(mutex: &Mutex<M>) -> MutexGuard<'_, M> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the three storage accessors to be implemented.
///
/// Each accessor's map is locked only for the duration of a single load, store or
/// delete. In particular no lock is held while a factory runs, so a factory may
/// resolve its own dependencies from the same registry.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Storage
    // -------------------------------------------------------------------------------------------------

    fn instances(&self) -> &InstanceMap;

    fn factories(&self) -> &FactoryMap;

    fn trace(&self) -> &TraceSlot;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations, replacing any previous one.
    ///
    /// The callback is invoked for every registry operation. It runs after the
    /// trace lock has been released, so it may use the registry it observes.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *lock(self.trace()) = Some(Arc::new(callback));
    }

    /// Clear the tracing callback. Registered values are not affected.
    fn clear_trace_callback(&self) {
        *lock(self.trace()) = None;
    }

    /// Emit a registry event to the current callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller. No
    /// registry lock is held at that point.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = lock(self.trace()).clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register a value as the instance for `T`.
    ///
    /// Takes ownership of the value and wraps it in an `Arc`. A previous instance
    /// of `T` is replaced; a factory registered for `T` is left untouched.
    fn register<T: Send + Sync + 'static>(&self, value: T) {
        self.register_arc(Arc::new(value));
    }

    /// Register an Arc-wrapped value as the instance for `T`.
    ///
    /// Avoids a second allocation when the caller already shares the value.
    fn register_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        let key = TypeKey::of::<T>();
        self.emit_event(&RegistryEvent::RegisterInstance {
            type_name: key.name(),
        });
        debug!(type_name = key.name(), "registered instance");

        lock(self.instances()).insert(key, value);
    }

    /// Register a zero-argument factory for `T`.
    ///
    /// The factory is not invoked here. It runs on the first [`resolve`](Self::resolve)
    /// that finds no instance for `T`, and its product becomes the instance.
    ///
    /// Concurrent first resolutions may each invoke the factory; the last stored
    /// product wins. Factories on contended paths must tolerate repeated calls.
    fn register_factory<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        self.emit_event(&RegistryEvent::RegisterFactory {
            type_name: key.name(),
        });
        debug!(type_name = key.name(), "registered factory");

        let factory: Factory = Arc::new(move || Arc::new(factory()) as Instance);
        lock(self.factories()).insert(key, factory);
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve the value registered for `T`.
    ///
    /// Returns the stored instance if there is one. Otherwise invokes the factory
    /// for `T`, caches its product as the instance and returns it. A product such as
    /// `None` is a valid instance and is cached like any other.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if neither an instance nor a factory exists for `T`
    fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let key = TypeKey::of::<T>();

        let result = match lookup_or_construct(self, key) {
            Some(instance) => instance
                .downcast::<T>()
                .map_err(|_| RegistryError::TypeMismatch {
                    type_name: key.name(),
                }),
            None => Err(RegistryError::NotFound {
                type_name: key.name(),
            }),
        };

        self.emit_event(&RegistryEvent::Resolve {
            type_name: key.name(),
            found: result.is_ok(),
        });

        result
    }

    /// Resolve the value registered for `T`, panicking if there is none.
    ///
    /// For call sites where a missing registration is a programming error.
    ///
    /// # Panics
    ///
    /// Panics with the [`RegistryError::NotFound`] message if `T` is not registered.
    #[track_caller]
    fn must_resolve<T: Send + Sync + 'static>(&self) -> Arc<T> {
        match self.resolve::<T>() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resolve the value registered for `T` and return an owned clone of it.
    ///
    /// Useful for `Arc<dyn Trait>` registrations, where cloning is a reference-count
    /// increment.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    fn resolve_cloned<T: Send + Sync + Clone + 'static>(&self) -> Result<T, RegistryError> {
        let arc = self.resolve::<T>()?;
        Ok((*arc).clone())
    }

    /// Check whether an instance or a factory is registered for `T`.
    ///
    /// Never invokes a factory.
    fn contains<T: Send + Sync + 'static>(&self) -> bool {
        let key = TypeKey::of::<T>();

        let has_instance = lock(self.instances()).contains_key(&key);
        let found = has_instance || lock(self.factories()).contains_key(&key);

        self.emit_event(&RegistryEvent::Contains {
            type_name: key.name(),
            found,
        });

        found
    }

    // -------------------------------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------------------------------

    /// Remove both the instance and the factory registered for `T`.
    ///
    /// Does nothing if `T` was not registered. `Arc<T>` handles already returned
    /// by `resolve` remain valid.
    fn unregister<T: Send + Sync + 'static>(&self) {
        let key = TypeKey::of::<T>();
        self.emit_event(&RegistryEvent::Unregister {
            type_name: key.name(),
        });
        debug!(type_name = key.name(), "unregistered");

        // Factory first, so a concurrent resolve cannot rebuild from it once the
        // instance is gone.
        lock(self.factories()).remove(&key);
        lock(self.instances()).remove(&key);
    }

    /// Remove every instance and factory from the registry.
    ///
    /// Intended for isolating tests that share a registry. The tracing callback is
    /// kept (use `clear_trace_callback()` to remove it).
    fn reset(&self) {
        self.emit_event(&RegistryEvent::Reset);
        debug!("registry reset");

        lock(self.factories()).clear();
        lock(self.instances()).clear();
    }
}

/// Returns the cached instance for `key`, building and caching it from the
/// registered factory on a miss.
///
/// The instance map lock is released before the factory map is consulted and
/// neither is held while the factory runs.
fn lookup_or_construct<R>(registry: &R, key: TypeKey) -> Option<Instance>
where
    R: RegistryApi + ?Sized,
{
    let cached = lock(registry.instances()).get(&key).cloned();
    if cached.is_some() {
        return cached;
    }

    let factory = lock(registry.factories()).get(&key).cloned()?;

    registry.emit_event(&RegistryEvent::FactoryInvoked {
        type_name: key.name(),
    });
    debug!(type_name = key.name(), "invoking factory");

    let instance = factory();
    lock(registry.instances()).insert(key, Arc::clone(&instance));
    Some(instance)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
