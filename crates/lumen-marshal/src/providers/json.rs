//! JSON body provider backed by serde.
//!
//! [`JsonProvider`] is registered once per concrete entity type, the same
//! way the text providers are. It handles `application/json` bodies (and
//! `+json` suffixed media types) for that type only.

use crate::{BodyReader, BodyWriter, Entity, EntityType, ReadError, WriteError};
use bytes::Bytes;
use http::HeaderMap;
use mime::Mime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Returns true for `application/json`, `+json` suffixed and wildcard media
/// types.
fn is_json(media_type: &Mime) -> bool {
    media_type.subtype() == mime::JSON
        || media_type.suffix() == Some(mime::JSON)
        || media_type.type_() == mime::STAR
}

/// Body reader and writer for a serde-serializable type `T` over JSON
/// bodies.
///
/// ```rust
/// use lumen_marshal::{BodyWorkers, JsonProvider};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Serialize, Deserialize)]
/// struct ValueHolder {
///     value: String,
/// }
///
/// let mut workers = BodyWorkers::new();
/// workers.register_reader(Arc::new(JsonProvider::<ValueHolder>::new()));
/// workers.register_writer(Arc::new(JsonProvider::<ValueHolder>::new()));
/// ```
pub struct JsonProvider<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonProvider<T> {
    /// Creates a provider for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonProvider")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> BodyReader for JsonProvider<T>
where
    T: DeserializeOwned + Any + Send,
{
    fn is_readable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<T>() && is_json(media_type)
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
        let value: T =
            serde_json::from_slice(body).map_err(|e| ReadError::malformed(declared, e))?;
        Ok(Box::new(value))
    }
}

impl<T> BodyWriter for JsonProvider<T>
where
    T: Serialize + Any,
{
    fn is_writeable(&self, declared: &EntityType, media_type: &Mime) -> bool {
        declared.is::<T>() && is_json(media_type)
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
        let bytes = serde_json::to_vec(value).map_err(|e| WriteError::failed(declared, e))?;
        Ok(Bytes::from(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct ValueHolder {
        value: String,
    }

    #[test]
    fn test_json_round_trip() {
        let provider = JsonProvider::<ValueHolder>::new();
        let declared = EntityType::of::<ValueHolder>();
        let holder = ValueHolder {
            value: "bar".into(),
        };

        let bytes = provider
            .write_to(&holder, &declared, &mime::APPLICATION_JSON)
            .unwrap();
        let entity = provider
            .read_from(
                &declared,
                &mime::APPLICATION_JSON,
                &HeaderMap::new(),
                &bytes,
            )
            .unwrap();
        assert_eq!(entity.downcast_ref::<ValueHolder>(), Some(&holder));
    }

    #[test]
    fn test_json_empty_body_is_no_content() {
        let provider = JsonProvider::<ValueHolder>::new();
        let result = provider.read_from(
            &EntityType::of::<ValueHolder>(),
            &mime::APPLICATION_JSON,
            &HeaderMap::new(),
            &Bytes::new(),
        );
        assert!(matches!(result, Err(ReadError::NoContent)));
    }

    #[test]
    fn test_json_malformed_body() {
        let provider = JsonProvider::<ValueHolder>::new();
        let result = provider.read_from(
            &EntityType::of::<ValueHolder>(),
            &mime::APPLICATION_JSON,
            &HeaderMap::new(),
            &Bytes::from("{not json"),
        );
        assert!(matches!(result, Err(ReadError::Malformed { .. })));
    }

    #[test]
    fn test_json_media_type_applicability() {
        let provider = JsonProvider::<ValueHolder>::new();
        let declared = EntityType::of::<ValueHolder>();
        assert!(provider.is_readable(&declared, &mime::APPLICATION_JSON));
        assert!(!provider.is_readable(&declared, &mime::TEXT_PLAIN));
        assert!(!provider.is_readable(&EntityType::of::<String>(), &mime::APPLICATION_JSON));
    }
}
