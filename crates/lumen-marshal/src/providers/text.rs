//! Plain-text body providers.
//!
//! [`StringProvider`] handles `String` entities directly; an empty body
//! reads as the empty string. [`FromStrProvider`] adapts any
//! `FromStr`/`Display` type to a text body; types handled this way have no
//! empty representation, so an empty body is reported as
//! [`ReadError::NoContent`].

use crate::{BodyReader, BodyWriter, Entity, EntityType, ReadError, WriteError};
use bytes::Bytes;
use http::HeaderMap;
use mime::Mime;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Returns true for `text/*` and wildcard media types.
fn is_text(media_type: &Mime) -> bool {
    media_type.type_() == mime::TEXT || media_type.type_() == mime::STAR
}

/// Body reader and writer for plain `String` entities.
///
/// The whole body is the value: reading an empty body yields `""`, not an
/// error, which is what distinguishes strings from the `FromStr` types.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringProvider;

impl BodyReader for StringProvider {
    fn is_readable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<String>() && is_text(media_type)
    }

    fn read_from(
        &self,
        _declared: &EntityType,
        _media_type: &Mime,
        _headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Entity, ReadError> {
        let text = String::from_utf8(body.to_vec())?;
        Ok(Box::new(text))
    }
}

impl BodyWriter for StringProvider {
    fn is_writeable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<String>() && is_text(media_type)
    }

    fn write_to(
        &self,
        entity: &dyn Any,
        declared: &EntityType,
        _media_type: &Mime,
    ) -> Result<Bytes, WriteError> {
        let text = entity
            .downcast_ref::<String>()
            .ok_or_else(|| WriteError::failed(declared, "entity is not a String"))?;
        Ok(Bytes::from(text.clone()))
    }
}

/// Body reader and writer for a `FromStr`/`Display` type `T` over text
/// bodies.
///
/// Register one instance per concrete type:
///
/// ```rust
/// use lumen_marshal::{BodyWorkers, FromStrProvider};
/// use std::sync::Arc;
///
/// let mut workers = BodyWorkers::new();
/// workers.register_reader(Arc::new(FromStrProvider::<i32>::new()));
/// workers.register_writer(Arc::new(FromStrProvider::<i32>::new()));
/// ```
pub struct FromStrProvider<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrProvider<T> {
    /// Creates a provider for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FromStrProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromStrProvider")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> BodyReader for FromStrProvider<T>
where
    T: FromStr + Any + Send,
    T::Err: fmt::Display,
{
    fn is_readable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<T>() && is_text(media_type)
    }

    fn read_from(
        &self,
        declared: &EntityType,
        _media_type: &Mime,
        _headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Entity, ReadError> {
        if body.is_empty() {
            return Err(ReadError::NoContent);
        }
        let text = String::from_utf8(body.to_vec())?;
        let value: T = text
            .trim()
            .parse()
            .map_err(|e| ReadError::malformed(declared, e))?;
        Ok(Box::new(value))
    }
}

impl<T> BodyWriter for FromStrProvider<T>
where
    T: fmt::Display + Any,
{
    fn is_writeable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<T>() && is_text(media_type)
    }

    fn write_to(
        &self,
        entity: &dyn Any,
        declared: &EntityType,
        _media_type: &Mime,
    ) -> Result<Bytes, WriteError> {
        let value = entity.downcast_ref::<T>().ok_or_else(|| {
            WriteError::failed(declared, "entity does not match the declared type")
        })?;
        Ok(Bytes::from(value.to_string()))
    }
}
