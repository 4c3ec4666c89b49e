//! Canonical identity of a registered type.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key under which instances and factories are stored.
///
/// Equality and hashing use only the [`TypeId`]; the type name is carried for
/// error messages and trace events. `Foo`, `Arc<Foo>`, `Option<Foo>` and
/// `Arc<dyn Trait>` all produce different keys.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of the declared type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `alloc::string::String`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    #[test]
    fn test_same_type_same_key() {
        assert_eq!(TypeKey::of::<English>(), TypeKey::of::<English>());
        assert_eq!(TypeKey::of::<String>().name(), "alloc::string::String");
    }

    #[test]
    fn test_distinct_types_distinct_keys() {
        let keys = [
            TypeKey::of::<English>(),
            TypeKey::of::<Arc<English>>(),
            TypeKey::of::<Option<English>>(),
            TypeKey::of::<dyn Greeter>(),
            TypeKey::of::<Arc<dyn Greeter>>(),
            TypeKey::of::<Box<dyn Greeter>>(),
        ];

        let unique: HashSet<TypeKey> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_concrete_differs_from_trait_object() {
        let concrete = TypeKey::of::<English>();
        let contract = TypeKey::of::<dyn Greeter>();
        assert_ne!(concrete, contract);
        assert_ne!(concrete.id(), contract.id());
        assert_eq!(English.greet(), "hello");
    }

    #[test]
    fn test_display_and_debug() {
        let key = TypeKey::of::<u8>();
        assert_eq!(key.to_string(), "u8");
        assert_eq!(format!("{:?}", key), "TypeKey(\"u8\")");
    }
}
