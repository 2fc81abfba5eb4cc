//! Parameter converter traits and the [`ParamConverters`] registry.
//!
//! Query, path, header and form parameters arrive as strings. A
//! [`ParamConverter`] turns a raw string into a typed [`Entity`] and back; a
//! [`ParamConverterProvider`] supplies converters for the declared types it
//! understands. Providers are enumerated in registration order and the first
//! one to supply a converter wins.

use crate::{Entity, EntityType, ParamError};
use std::any::Any;
use std::sync::Arc;

/// Converts a parameter between its string representation and an entity of
/// the declared type.
pub trait ParamConverter: Send + Sync {
    /// Parses the raw parameter value into an entity.
    ///
    /// `raw` is `None` when the parameter was not supplied at all, as
    /// opposed to `Some("")` for a supplied-but-empty value. Converters for
    /// required types report `None` as [`ParamError::Missing`];
    /// container-aware converters may translate it into absence instead.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] when the value cannot be converted.
    fn parse(&self, raw: Option<&str>) -> Result<Entity, ParamError>;

    /// Renders the entity back to its string representation.
    ///
    /// Returns `None` when the entity has no renderable value (an absent
    /// container, or an entity of an unexpected type).
    fn render(&self, value: &dyn Any) -> Option<String>;
}

/// Supplies [`ParamConverter`]s for the declared types a provider
/// understands.
pub trait ParamConverterProvider: Send + Sync {
    /// Returns a converter for the declared type, or `None` when this
    /// provider is not applicable to it.
    fn converter_for(&self, declared: &EntityType) -> Option<Arc<dyn ParamConverter>>;
}

/// Registry of parameter converter providers.
///
/// This is the converter-provider lookup service consumed by
/// container-aware adapters: an enumerable, ordered set of providers where
/// the first provider to supply a converter for a declared type wins.
///
/// # Example
///
/// ```rust
/// use lumen_marshal::{EntityType, ParamConverters, StdConverterProvider};
/// use std::sync::Arc;
///
/// let mut converters = ParamConverters::new();
/// converters.register(Arc::new(StdConverterProvider));
///
/// let converter = converters.converter_for(&EntityType::of::<i32>()).unwrap();
/// let entity = converter.parse(Some("42")).unwrap();
/// assert_eq!(entity.downcast_ref::<i32>(), Some(&42));
/// ```
#[derive(Default)]
pub struct ParamConverters {
    providers: Vec<Arc<dyn ParamConverterProvider>>,
}

impl ParamConverters {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider. Registration order determines precedence.
    pub fn register(&mut self, provider: Arc<dyn ParamConverterProvider>) {
        self.providers.push(provider);
    }

    /// Returns all registered providers in registration order.
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn ParamConverterProvider>] {
        &self.providers
    }

    /// Returns the first converter any registered provider supplies for the
    /// declared type, if any.
    #[must_use]
    pub fn converter_for(&self, declared: &EntityType) -> Option<Arc<dyn ParamConverter>> {
        self.providers
            .iter()
            .find_map(|p| p.converter_for(declared))
    }
}
