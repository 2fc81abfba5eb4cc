//! Body reader and writer traits and the [`BodyWorkers`] registry.
//!
//! A [`BodyReader`] deserializes a byte body into a type-erased [`Entity`];
//! a [`BodyWriter`] serializes an entity back to bytes. Providers are
//! registered once at startup and shared across concurrent requests, so both
//! traits require `Send + Sync` and hold no per-request state.

use crate::{Entity, EntityType, ReadError, WriteError};
use bytes::Bytes;
use http::HeaderMap;
use mime::Mime;
use std::any::Any;
use std::sync::Arc;

/// A provider that deserializes a body into an instance of a declared type.
///
/// Readers are looked up by (declared type, media type); the first registered
/// reader whose [`is_readable`](Self::is_readable) returns true wins.
pub trait BodyReader: Send + Sync {
    /// Returns true if this reader can produce the declared type from a body
    /// of the given media type.
    fn is_readable(&self, declared: &EntityType, media_type: &Mime) -> bool;

    /// Reads an entity of the declared type from the body.
    ///
    /// An empty body for a type with no empty representation is signalled
    /// with [`ReadError::NoContent`] rather than a parse failure.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] when the body cannot be deserialized.
    fn read_from(
        &self,
        declared: &EntityType,
        media_type: &Mime,
        headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Entity, ReadError>;
}

/// A provider that serializes an instance of a declared type into a body.
pub trait BodyWriter: Send + Sync {
    /// Returns true if this writer can render the declared type as a body of
    /// the given media type.
    fn is_writeable(&self, declared: &EntityType, media_type: &Mime) -> bool;

    /// Writes the entity as a body.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] when the entity cannot be serialized.
    fn write_to(
        &self,
        entity: &dyn Any,
        declared: &EntityType,
        media_type: &Mime,
    ) -> Result<Bytes, WriteError>;
}

/// Registry of body readers and writers.
///
/// This is the body-provider lookup service consumed by container-aware
/// adapters: given a declared type and media type it returns the first
/// registered provider that declares itself applicable. Providers are
/// registered during startup and the registry is then shared immutably
/// behind an [`Arc`].
///
/// # Example
///
/// ```rust
/// use lumen_marshal::{BodyWorkers, EntityType, StringProvider};
/// use bytes::Bytes;
/// use http::HeaderMap;
/// use std::sync::Arc;
///
/// let mut workers = BodyWorkers::new();
/// workers.register_reader(Arc::new(StringProvider));
///
/// let entity = workers
///     .read(&EntityType::of::<String>(), &mime::TEXT_PLAIN, &HeaderMap::new(), &Bytes::from("hi"))
///     .unwrap();
/// assert_eq!(entity.downcast_ref::<String>().map(String::as_str), Some("hi"));
/// ```
#[derive(Default)]
pub struct BodyWorkers {
    readers: Vec<Arc<dyn BodyReader>>,
    writers: Vec<Arc<dyn BodyWriter>>,
}

impl BodyWorkers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body reader. Registration order determines precedence.
    pub fn register_reader(&mut self, reader: Arc<dyn BodyReader>) {
        self.readers.push(reader);
    }

    /// Registers a body writer. Registration order determines precedence.
    pub fn register_writer(&mut self, writer: Arc<dyn BodyWriter>) {
        self.writers.push(writer);
    }

    /// Returns the first registered reader applicable to the lookup key, if
    /// any.
    #[must_use]
    pub fn reader_for(
        &self,
        declared: &EntityType,
        media_type: &Mime,
    ) -> Option<Arc<dyn BodyReader>> {
        self.readers
            .iter()
            .find(|r| r.is_readable(declared, media_type))
            .cloned()
    }

    /// Returns the first registered writer applicable to the lookup key, if
    /// any.
    #[must_use]
    pub fn writer_for(
        &self,
        declared: &EntityType,
        media_type: &Mime,
    ) -> Option<Arc<dyn BodyWriter>> {
        self.writers
            .iter()
            .find(|w| w.is_writeable(declared, media_type))
            .cloned()
    }

    /// Reads an entity of the declared type from the body using the first
    /// applicable reader.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NoReader`] when no registered reader is
    /// applicable, or whatever the selected reader returns.
    pub fn read(
        &self,
        declared: &EntityType,
        media_type: &Mime,
        headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Entity, ReadError> {
        let reader = self
            .reader_for(declared, media_type)
            .ok_or_else(|| ReadError::no_reader(declared, media_type))?;
        reader.read_from(declared, media_type, headers, body)
    }

    /// Writes the entity as a body using the first applicable writer.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::NoWriter`] when no registered writer is
    /// applicable, or whatever the selected writer returns.
    pub fn write(
        &self,
        entity: &dyn Any,
        declared: &EntityType,
        media_type: &Mime,
    ) -> Result<Bytes, WriteError> {
        let writer = self
            .writer_for(declared, media_type)
            .ok_or_else(|| WriteError::no_writer(declared, media_type))?;
        writer.write_to(entity, declared, media_type)
    }
}
