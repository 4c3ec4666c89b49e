//! Lazy factories example for service-locator.
//!
//! Demonstrates:
//! - Wiring a small service graph with factories on an explicit `Registry`
//! - Factories resolving their own dependencies on first use
//! - What happens when many threads resolve a fresh factory at the same time
//! - Pre-registering an instance when construction must happen exactly once
//!
//! Run with: `cargo run --example lazy_factories`

use service_locator::{Registry, RegistryApi};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

struct Config {
    dsn: String,
}

struct Pool {
    dsn: String,
}

struct UserRepository {
    pool: Arc<Pool>,
}

/// Builds the application's registry. Nothing is constructed here.
fn compose() -> Arc<Registry> {
    let registry = Arc::new(Registry::new());

    registry.register(Config {
        dsn: "postgres://localhost/app".to_string(),
    });

    let handle = Arc::clone(&registry);
    registry.register_factory(move || {
        println!("   (opening pool)");
        Pool {
            dsn: handle.must_resolve::<Config>().dsn.clone(),
        }
    });

    let handle = Arc::clone(&registry);
    registry.register_factory(move || {
        println!("   (building repository)");
        UserRepository {
            pool: handle.must_resolve(),
        }
    });

    registry
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== service-locator: Lazy Factories ===\n");

    // -------------------------------------------------------------------------
    // 1. Compose and resolve
    // -------------------------------------------------------------------------
    println!("1. Composing the registry...");

    let registry = compose();
    println!("   {:?}", registry);

    println!("\n2. Resolving UserRepository...");
    let repo = registry.must_resolve::<UserRepository>();
    println!("   Repository uses pool at {}", repo.pool.dsn);
    println!("   {:?}", registry);

    // -------------------------------------------------------------------------
    // 3. Contended first resolution
    // -------------------------------------------------------------------------
    println!("\n3. Resolving a fresh factory from 16 threads at once...");

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let contended = Registry::new();
    contended.register_factory(|| BUILDS.fetch_add(1, Ordering::SeqCst));

    thread::scope(|s| {
        for _ in 0..16 {
            s.spawn(|| contended.must_resolve::<usize>());
        }
    });

    println!(
        "   Factory ran {} time(s); the cached value is build #{}",
        BUILDS.load(Ordering::SeqCst),
        contended.must_resolve::<usize>()
    );

    // -------------------------------------------------------------------------
    // 4. Exactly-once construction
    // -------------------------------------------------------------------------
    println!("\n4. Pre-registering an instance before threads start...");

    let once = Registry::new();
    once.register(Arc::new(String::from("built once")));

    thread::scope(|s| {
        for _ in 0..16 {
            s.spawn(|| once.must_resolve::<Arc<String>>());
        }
    });

    println!("   Value: {}", once.must_resolve::<Arc<String>>());

    println!("\n=== Example Complete ===");
}
