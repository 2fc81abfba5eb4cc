//! Body reader for optional declarations.

use crate::arg;
use crate::handle::RegistryHandle;
use crate::Optional;
use bytes::Bytes;
use http::HeaderMap;
use lumen_marshal::{BodyReader, BodyWorkers, Entity, EntityType, ReadError};
use mime::Mime;
use std::sync::Arc;
use tracing::warn;

/// Body reader for values declared as "optional of `X`".
///
/// Delegates the actual deserialization to the reader registered for the
/// bare wrapped type and wraps the result in [`Optional`]. Three conditions
/// deliberately degrade to absence instead of failing:
///
/// - no reader is registered for the wrapped type (logged as a warning —
///   missing support is silently treated as business-level absence, which
///   is a deliberate and possibly surprising policy);
/// - the delegate reports an empty stream ([`ReadError::NoContent`]);
/// - the delegate produces an empty string entity (raw optional
///   declarations resolve the wrapped type to `String`, and an absent body
///   reads as the empty string there).
///
/// Any other delegate failure propagates unchanged.
///
/// The adapter is a framework-managed singleton shared across concurrent
/// requests; its only state is the lazily-attached registry handle.
pub struct OptionalBodyReader {
    workers: RegistryHandle<BodyWorkers>,
}

impl OptionalBodyReader {
    /// Creates an unattached reader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: RegistryHandle::new(),
        }
    }

    /// Attaches the body-provider registry this reader delegates through.
    pub fn attach(&self, workers: &Arc<BodyWorkers>) {
        self.workers.attach(workers);
    }

    fn absent() -> Entity {
        Box::new(Optional::absent())
    }
}

impl Default for OptionalBodyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyReader for OptionalBodyReader {
    fn is_readable(&self, declared: &EntityType, _media_type: &Mime) -> bool {
        declared.is::<Optional>()
    }

    fn read_from(
        &self,
        declared: &EntityType,
        media_type: &Mime,
        headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Entity, ReadError> {
        let wrapped = arg::wrapped_type(declared);

        let reader = self
            .workers
            .get()
            .and_then(|workers| workers.reader_for(&wrapped, media_type));
        let Some(reader) = reader else {
            warn!(
                wrapped = %wrapped,
                media_type = %media_type,
                "no body reader for wrapped type, treating entity as absent"
            );
            return Ok(Self::absent());
        };

        match reader.read_from(&wrapped, media_type, headers, body) {
            Ok(entity) => {
                // An empty string entity stands for an absent body.
                if entity
                    .downcast_ref::<String>()
                    .is_some_and(String::is_empty)
                {
                    Ok(Self::absent())
                } else {
                    Ok(Box::new(Optional::of_entity(entity)))
                }
            }
            Err(ReadError::NoContent) => Ok(Self::absent()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_marshal::{FromStrProvider, StringProvider};

    fn workers() -> Arc<BodyWorkers> {
        let mut workers = BodyWorkers::new();
        workers.register_reader(Arc::new(StringProvider));
        workers.register_reader(Arc::new(FromStrProvider::<i32>::new()));
        Arc::new(workers)
    }

    fn attached() -> (OptionalBodyReader, Arc<BodyWorkers>) {
        let reader = OptionalBodyReader::new();
        let workers = workers();
        reader.attach(&workers);
        (reader, workers)
    }

    fn read(reader: &OptionalBodyReader, declared: &EntityType, body: &[u8]) -> Optional {
        let entity = reader
            .read_from(
                declared,
                &mime::TEXT_PLAIN,
                &HeaderMap::new(),
                &Bytes::copy_from_slice(body),
            )
            .unwrap();
        *entity.downcast::<Optional>().unwrap()
    }

    #[test]
    fn test_applicability() {
        let reader = OptionalBodyReader::new();
        assert!(reader.is_readable(&crate::optional_of::<i32>(), &mime::TEXT_PLAIN));
        assert!(reader.is_readable(&crate::optional_raw(), &mime::TEXT_PLAIN));
        assert!(!reader.is_readable(&EntityType::of::<i32>(), &mime::TEXT_PLAIN));
    }

    #[test]
    fn test_present_value_delegates_to_wrapped_reader() {
        let (reader, _workers) = attached();
        let opt = read(&reader, &crate::optional_of::<i32>(), b"42");
        assert_eq!(opt.downcast::<i32>(), Some(42));
    }

    #[test]
    fn test_empty_stream_reads_as_absent() {
        let (reader, _workers) = attached();
        let opt = read(&reader, &crate::optional_of::<i32>(), b"");
        assert!(opt.is_absent());
    }

    #[test]
    fn test_empty_string_entity_reads_as_absent() {
        let (reader, _workers) = attached();
        // Raw declaration: the wrapped type falls back to String, and the
        // string reader turns an empty body into "".
        let opt = read(&reader, &crate::optional_raw(), b"");
        assert!(opt.is_absent());

        let opt = read(&reader, &crate::optional_of::<String>(), b"");
        assert!(opt.is_absent());
    }

    #[test]
    fn test_missing_reader_degrades_to_absent() {
        let (reader, _workers) = attached();
        // No f64 reader is registered.
        let opt = read(&reader, &crate::optional_of::<f64>(), b"1.5");
        assert!(opt.is_absent());
    }

    #[test]
    fn test_unattached_reader_degrades_to_absent() {
        let reader = OptionalBodyReader::new();
        let entity = reader
            .read_from(
                &crate::optional_of::<i32>(),
                &mime::TEXT_PLAIN,
                &HeaderMap::new(),
                &Bytes::from("42"),
            )
            .unwrap();
        assert!(entity.downcast::<Optional>().unwrap().is_absent());
    }

    #[test]
    fn test_delegate_failure_propagates() {
        let (reader, _workers) = attached();
        let result = reader.read_from(
            &crate::optional_of::<i32>(),
            &mime::TEXT_PLAIN,
            &HeaderMap::new(),
            &Bytes::from("foo"),
        );
        assert!(matches!(result, Err(ReadError::Malformed { .. })));
    }
}
