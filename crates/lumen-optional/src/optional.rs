//! The type-erased optional container.
//!
//! [`Optional`] is the container type handlers declare when a body or
//! parameter may legitimately be missing. It is a true sum type over a
//! type-erased value — present-with-entity or absent — so that
//! `present("")` and absent stay distinguishable, which a nullable
//! convention could not guarantee.

use lumen_marshal::{Entity, EntityType};
use std::any::Any;
use std::fmt;

/// A present-or-absent wrapper around a type-erased entity.
///
/// Constructed fresh on every read or convert operation and never mutated
/// afterwards. Handlers recover the wrapped value with
/// [`downcast`](Self::downcast) or substitute a default with
/// [`unwrap_or`](Self::unwrap_or).
///
/// # Example
///
/// ```rust
/// use lumen_optional::Optional;
///
/// let present = Optional::present(42_i32);
/// assert!(present.is_present());
/// assert_eq!(present.unwrap_or(23), 42);
///
/// let absent = Optional::absent();
/// assert_eq!(absent.unwrap_or(23), 23);
/// ```
#[derive(Default)]
pub struct Optional {
    value: Option<Entity>,
}

impl Optional {
    /// Wraps a value as present.
    #[must_use]
    pub fn present<T: Any + Send>(value: T) -> Self {
        Self {
            value: Some(Box::new(value)),
        }
    }

    /// Wraps an already type-erased entity as present.
    #[must_use]
    pub fn of_entity(entity: Entity) -> Self {
        Self {
            value: Some(entity),
        }
    }

    /// The absent container.
    #[must_use]
    pub fn absent() -> Self {
        Self { value: None }
    }

    /// Returns true when a value is present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns true when no value is present.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Borrows the wrapped value untyped, if present.
    #[must_use]
    pub fn as_any(&self) -> Option<&dyn Any> {
        let value: &dyn Any = self.value.as_ref()?.as_ref();
        Some(value)
    }

    /// Borrows the wrapped value as `T`, if present and of that type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }

    /// Unwraps into the wrapped value, if present and of type `T`.
    #[must_use]
    pub fn downcast<T: Any>(self) -> Option<T> {
        let boxed = self.value?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }

    /// Unwraps into the wrapped value, substituting `default` when absent
    /// (or when the wrapped value is not a `T`).
    #[must_use]
    pub fn unwrap_or<T: Any>(self, default: T) -> T {
        self.downcast::<T>().unwrap_or(default)
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(_) => f.write_str("Optional::present(..)"),
            None => f.write_str("Optional::absent()"),
        }
    }
}

/// Descriptor for a declaration of "optional of `T`".
///
/// ```rust
/// use lumen_optional::{optional_of, Optional};
///
/// let declared = optional_of::<i32>();
/// assert!(declared.is::<Optional>());
/// assert!(declared.args()[0].is::<i32>());
/// ```
#[must_use]
pub fn optional_of<T: Any>() -> EntityType {
    EntityType::parameterized::<Optional>(vec![EntityType::of::<T>()])
}

/// Descriptor for a raw optional declaration with no resolvable wrapped
/// type.
#[must_use]
pub fn optional_raw() -> EntityType {
    EntityType::of::<Optional>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_and_absent() {
        assert!(Optional::present("foo".to_string()).is_present());
        assert!(Optional::absent().is_absent());
        assert!(Optional::default().is_absent());
    }

    #[test]
    fn test_downcast() {
        let opt = Optional::present(42_i32);
        assert_eq!(opt.downcast_ref::<i32>(), Some(&42));
        assert_eq!(opt.downcast::<i32>(), Some(42));

        assert_eq!(Optional::present(42_i32).downcast::<String>(), None);
        assert_eq!(Optional::absent().downcast::<i32>(), None);
    }

    #[test]
    fn test_empty_string_is_still_present() {
        // present("") and absent are different outcomes.
        let opt = Optional::present(String::new());
        assert!(opt.is_present());
        assert_eq!(opt.unwrap_or("fallback".to_string()), "");
    }

    #[test]
    fn test_unwrap_or_substitutes_default_when_absent() {
        assert_eq!(Optional::absent().unwrap_or(23_i32), 23);
        assert_eq!(Optional::present(42_i32).unwrap_or(23_i32), 42);
    }

    #[test]
    fn test_descriptors() {
        let declared = optional_of::<String>();
        assert!(declared.is::<Optional>());
        assert_eq!(declared.args().len(), 1);

        let raw = optional_raw();
        assert!(raw.is::<Optional>());
        assert!(raw.args().is_empty());
    }
}
