use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Neither an instance nor a factory is registered for the type.
    #[error("no instance or factory registered for type: {type_name}")]
    NotFound { type_name: &'static str },

    /// A stored value could not be downcast to the type it was keyed under.
    #[error("type mismatch in registry for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl RegistryError {
    /// Name of the type the failed lookup was made for.
    pub fn type_name(&self) -> &'static str {
        match self {
            RegistryError::NotFound { type_name } | RegistryError::TypeMismatch { type_name } => {
                type_name
            }
        }
    }
}
