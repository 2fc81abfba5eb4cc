//! Runtime entity type descriptors.
//!
//! Providers are registered and looked up dynamically, so the declared type
//! of a body or parameter travels through the pipeline as an [`EntityType`]
//! value rather than as a compile-time type parameter.

use std::any::{Any, TypeId};
use std::fmt;

/// A type-erased entity value flowing through the marshalling pipeline.
///
/// Readers produce entities, writers and converters consume them. Handlers
/// recover the concrete type with [`Box::downcast`].
pub type Entity = Box<dyn Any + Send>;

/// Runtime descriptor of a declared entity type.
///
/// An `EntityType` pairs the raw [`TypeId`] of a declared type with the
/// descriptors of its generic type arguments, so that container-aware
/// providers can recover the wrapped type of a parameterized declaration.
///
/// # Example
///
/// ```rust
/// use lumen_marshal::EntityType;
///
/// let string = EntityType::of::<String>();
/// assert!(string.is::<String>());
/// assert!(string.args().is_empty());
///
/// let list = EntityType::parameterized::<Vec<String>>(vec![EntityType::of::<String>()]);
/// assert_eq!(list.args().len(), 1);
/// assert!(list.args()[0].is::<String>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    raw: TypeId,
    name: &'static str,
    args: Vec<EntityType>,
}

impl EntityType {
    /// Creates a descriptor for a plain, unparameterized type.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            raw: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            args: Vec::new(),
        }
    }

    /// Creates a descriptor for a parameterized declaration of `T`.
    ///
    /// The raw type is `T` itself; `args` describe the type arguments the
    /// declaration binds. A declaration with no resolvable arguments is
    /// expressed by [`EntityType::of`] instead.
    #[must_use]
    pub fn parameterized<T: Any>(args: Vec<EntityType>) -> Self {
        Self {
            raw: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            args,
        }
    }

    /// Returns the raw [`TypeId`] of the declared type.
    #[must_use]
    pub fn raw(&self) -> TypeId {
        self.raw
    }

    /// Returns the full name of the declared type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the descriptors of the bound generic type arguments.
    #[must_use]
    pub fn args(&self) -> &[EntityType] {
        &self.args
    }

    /// Returns true if the raw declared type is exactly `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.raw == TypeId::of::<T>()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_descriptor() {
        let ty = EntityType::of::<i32>();
        assert!(ty.is::<i32>());
        assert!(!ty.is::<i64>());
        assert!(ty.args().is_empty());
        assert_eq!(ty.raw(), TypeId::of::<i32>());
    }

    #[test]
    fn test_parameterized_descriptor() {
        let ty = EntityType::parameterized::<Vec<i32>>(vec![EntityType::of::<i32>()]);
        assert!(ty.is::<Vec<i32>>());
        assert_eq!(ty.args().len(), 1);
        assert!(ty.args()[0].is::<i32>());
    }

    #[test]
    fn test_equality_ignores_nothing() {
        assert_eq!(EntityType::of::<String>(), EntityType::of::<String>());
        assert_ne!(
            EntityType::of::<String>(),
            EntityType::parameterized::<String>(vec![EntityType::of::<i32>()]),
        );
    }

    #[test]
    fn test_display_includes_args() {
        let ty = EntityType::parameterized::<Vec<i32>>(vec![EntityType::of::<i32>()]);
        let rendered = ty.to_string();
        assert!(rendered.contains("Vec"));
        assert!(rendered.contains("<i32>"));
    }
}
