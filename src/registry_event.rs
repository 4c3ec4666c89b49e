/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
///
/// # Examples
///
/// ```rust
/// use service_locator::RegistryEvent;
///
/// let event = RegistryEvent::RegisterFactory { type_name: "i32" };
/// assert_eq!(event.to_string(), "register_factory { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An instance was stored.
    RegisterInstance {
        /// The type name of the registered value (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// A factory was stored. It has not been invoked.
    RegisterFactory { type_name: &'static str },

    /// A factory is about to run because no instance was cached.
    FactoryInvoked { type_name: &'static str },

    /// A value was requested.
    Resolve {
        type_name: &'static str,
        /// Whether an instance was returned
        found: bool,
    },

    /// A registration check was performed.
    Contains { type_name: &'static str, found: bool },

    /// Instance and factory were removed for a type.
    Unregister { type_name: &'static str },

    /// The registry was cleared.
    Reset,
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::RegisterInstance { type_name } => {
                write!(f, "register {{ type_name: {} }}", type_name)
            }
            RegistryEvent::RegisterFactory { type_name } => {
                write!(f, "register_factory {{ type_name: {} }}", type_name)
            }
            RegistryEvent::FactoryInvoked { type_name } => {
                write!(f, "factory_invoked {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Unregister { type_name } => {
                write!(f, "unregister {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Reset => write!(f, "Resetting the Registry"),
        }
    }
}
