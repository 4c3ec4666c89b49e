//! # Service Locator
//!
//! A thread-safe, type-keyed registry for storing and retrieving shared instances.
//!
//! Values are registered either directly, as instances, or as zero-argument factories
//! that run on the first lookup and whose product is cached from then on. Lookups are
//! keyed by the caller's declared type, so `Database`, `Arc<dyn Storage>` and
//! `Option<Database>` never see each other's registrations.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_locator::{register, register_factory, resolve};
//! use std::sync::Arc;
//!
//! // Register a value
//! register("Hello, World!".to_string());
//!
//! // Register a factory, built on first resolve
//! register_factory(|| vec![1u32, 2, 3]);
//!
//! let message: Arc<String> = resolve().unwrap();
//! let numbers: Arc<Vec<u32>> = resolve().unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! assert_eq!(numbers.len(), 3);
//! ```
//!
//! ## Concurrency
//!
//! Every map operation is atomic, but the lookup-then-construct sequence of
//! [`resolve`] is not serialized. Concurrent first resolutions of the same type may
//! each invoke its factory, and the last product stored is the one that stays cached.
//! Use idempotent factories on contended paths, or [`register`] the value up front
//! when construction must happen exactly once.
//!
//! ## Main Functions
//!
//! - [`register`] / [`register_arc`] - Store an instance
//! - [`register_factory`] - Store a lazy factory
//! - [`resolve`] - Retrieve a value as `Arc<T>`
//! - [`must_resolve`] - Retrieve a value, panicking if it is missing
//! - [`resolve_cloned`] - Retrieve a cloned value (requires `Clone`)
//! - [`contains`] - Check if a type is registered
//! - [`unregister`] / [`reset`] - Remove registrations
//! - [`set_trace_callback`] - Observe registry operations
//!
//! [`Registry`] offers the same operations on an explicitly owned handle, and
//! [`define_registry!`] declares further isolated process-wide registries.

mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod type_key;

pub use registry::{
    clear_trace_callback, contains, global, must_resolve, register, register_arc,
    register_factory, reset, resolve, resolve_cloned, set_trace_callback, unregister, Registry,
};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{
    Factory, FactoryMap, Instance, InstanceMap, RegistryApi, TraceCallback, TraceSlot,
};
pub use type_key::TypeKey;
