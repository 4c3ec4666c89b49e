//! Basic usage example for service-locator.
//!
//! Demonstrates:
//! - Registering instances and lazy factories in the process-wide registry
//! - Resolving values with `resolve()` (returns `Arc<T>`)
//! - Resolving owned copies with `resolve_cloned()` (returns `T`)
//! - Checking registration status with `contains()`
//! - Removing registrations with `unregister()` and `reset()`
//!
//! Run with: `cargo run --example basic_usage`

use service_locator::{
    contains, register, register_factory, reset, resolve, resolve_cloned, unregister,
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

#[derive(Debug)]
struct Greeter {
    greeting: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== service-locator: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register instances
    // -------------------------------------------------------------------------
    println!("1. Registering instances...");

    register(42i32);
    register(AppConfig {
        name: "MyApp".to_string(),
        version: 1,
        debug_mode: true,
    });

    println!("   Registered: i32(42), AppConfig");

    // -------------------------------------------------------------------------
    // 2. Register a factory (nothing is built yet)
    // -------------------------------------------------------------------------
    println!("\n2. Registering a factory for Greeter...");

    register_factory(|| {
        let config: Arc<AppConfig> = service_locator::must_resolve();
        println!("   (building Greeter from {} v{})", config.name, config.version);
        Greeter {
            greeting: format!("Hello from {}!", config.name),
        }
    });

    // -------------------------------------------------------------------------
    // 3. Check registration status
    // -------------------------------------------------------------------------
    println!("\n3. Checking registration status with contains()...");

    println!("   contains::<i32>()       = {}", contains::<i32>());
    println!("   contains::<AppConfig>() = {}", contains::<AppConfig>());
    println!("   contains::<Greeter>()   = {}", contains::<Greeter>());
    println!("   contains::<Vec<u8>>()   = {}", contains::<Vec<u8>>());

    // -------------------------------------------------------------------------
    // 4. Resolve values
    // -------------------------------------------------------------------------
    println!("\n4. Resolving values...");

    let number: Arc<i32> = resolve().unwrap();
    let greeter: Arc<Greeter> = resolve().unwrap();
    let again: Arc<Greeter> = resolve().unwrap();
    let cfg_owned: AppConfig = resolve_cloned().unwrap();

    println!("   i32:        {}", *number);
    println!("   Greeter:    {}", greeter.greeting);
    println!("   Same Greeter on second resolve? {}", Arc::ptr_eq(&greeter, &again));
    println!("   AppConfig (owned): {:?}", cfg_owned);

    // -------------------------------------------------------------------------
    // 5. Handle missing types
    // -------------------------------------------------------------------------
    println!("\n5. Handling missing types...");

    match resolve::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 6. Remove registrations
    // -------------------------------------------------------------------------
    println!("\n6. Removing registrations...");

    unregister::<Greeter>();
    println!("   After unregister, contains::<Greeter>() = {}", contains::<Greeter>());

    reset();
    println!("   After reset, contains::<i32>() = {}", contains::<i32>());

    println!("\n=== Example Complete ===");
}
