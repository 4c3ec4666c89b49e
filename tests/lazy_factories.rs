//! Integration tests for lazy factories.
//!
//! Factories can be closures capturing state, plain functions, or constructors of
//! callable values. Each test declares its own registry.

use service_locator::define_registry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_function_as_factory() {
    define_registry!(fn_factory);

    fn default_port() -> u16 {
        8080
    }

    fn_factory::register_factory(default_port);
    assert_eq!(*fn_factory::must_resolve::<u16>(), 8080);
}

#[test]
fn test_closure_factory_with_captured_state() {
    define_registry!(captured);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let greeting = "Hello".to_string();

    captured::register_factory(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        format!("{greeting}, World!")
    });

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(&**captured::must_resolve::<String>(), "Hello, World!");
    assert_eq!(&**captured::must_resolve::<String>(), "Hello, World!");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_factory_producing_a_callable() {
    define_registry!(callables);

    type Doubler = Box<dyn Fn(i32) -> i32 + Send + Sync>;

    callables::register_factory(|| -> Doubler { Box::new(|x| x * 2) });

    let doubler = callables::must_resolve::<Doubler>();
    assert_eq!(doubler(21), 42);
}

#[test]
fn test_function_pointer_instance_and_factory_keys_differ() {
    define_registry!(fn_pointers);

    fn greet(name: &str) -> String {
        format!("Hello, {}!", name)
    }

    let int_func: fn(i32) -> i32 = |x| x + 1;
    fn_pointers::register(int_func);
    fn_pointers::register_factory(|| greet as fn(&str) -> String);

    let f1 = fn_pointers::must_resolve::<fn(i32) -> i32>();
    let f2 = fn_pointers::must_resolve::<fn(&str) -> String>();

    assert_eq!(f1(41), 42);
    assert_eq!(f2("World"), "Hello, World!");
}

#[test]
fn test_replacing_a_factory_before_first_resolve() {
    define_registry!(replaced);

    replaced::register_factory(|| 1u8);
    replaced::register_factory(|| 2u8);

    assert_eq!(*replaced::must_resolve::<u8>(), 2);
}

#[test]
fn test_factory_runs_again_after_unregister_and_reregister() {
    define_registry!(rebuilt);

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let factory = || BUILDS.fetch_add(1, Ordering::SeqCst);

    rebuilt::register_factory(factory);
    let first = rebuilt::must_resolve::<usize>();

    rebuilt::unregister::<usize>();
    rebuilt::register_factory(factory);
    let second = rebuilt::must_resolve::<usize>();

    assert_eq!((*first, *second), (0, 1));
    assert_eq!(BUILDS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_producing_none_is_a_value() {
    define_registry!(absent);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    absent::register_factory(move || -> Option<Arc<str>> {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        None
    });

    assert!(absent::contains::<Option<Arc<str>>>());
    assert!(absent::must_resolve::<Option<Arc<str>>>().is_none());
    assert_eq!(absent::resolve_cloned::<Option<Arc<str>>>().unwrap(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Option<T> and T are different keys.
    assert!(absent::resolve::<Arc<str>>().is_err());
}

#[test]
fn test_panicking_factory_leaves_registry_usable() {
    define_registry!(fragile);

    let attempts = Arc::new(Mutex::new(0));
    let attempts_clone = attempts.clone();

    fragile::register_factory(move || {
        let mut attempts = attempts_clone.lock().unwrap();
        *attempts += 1;
        if *attempts == 1 {
            drop(attempts);
            panic!("first construction fails");
        }
        "second try".to_string()
    });

    let first = std::panic::catch_unwind(|| fragile::resolve::<String>());
    assert!(first.is_err());

    // The failed construction cached nothing, so the factory runs again.
    assert_eq!(&**fragile::must_resolve::<String>(), "second try");
    assert_eq!(*attempts.lock().unwrap(), 2);
}
