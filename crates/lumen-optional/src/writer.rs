//! Body writer for optional declarations.

use crate::arg;
use crate::handle::RegistryHandle;
use crate::Optional;
use bytes::Bytes;
use lumen_marshal::{BodyWorkers, BodyWriter, EntityType, WriteError};
use mime::Mime;
use std::any::Any;
use std::sync::Arc;

/// Body writer for values declared as "optional of `X`".
///
/// An absent container writes as an empty body, which the host maps to a
/// response without content. A present value delegates to the writer
/// registered for the bare wrapped type; unlike the read side, a missing
/// writer here is a genuine error ([`WriteError::NoWriter`]) — the handler
/// produced a value the application cannot serialize.
pub struct OptionalBodyWriter {
    workers: RegistryHandle<BodyWorkers>,
}

impl OptionalBodyWriter {
    /// Creates an unattached writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: RegistryHandle::new(),
        }
    }

    /// Attaches the body-provider registry this writer delegates through.
    pub fn attach(&self, workers: &Arc<BodyWorkers>) {
        self.workers.attach(workers);
    }
}

impl Default for OptionalBodyWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyWriter for OptionalBodyWriter {
    fn is_writeable(&self, declared: &EntityType, _media_type: &Mime) -> bool {
        declared.is::<Optional>()
    }

    fn write_to(
        &self,
        entity: &dyn Any,
        declared: &EntityType,
        media_type: &Mime,
    ) -> Result<Bytes, WriteError> {
        let optional = entity
            .downcast_ref::<Optional>()
            .ok_or_else(|| WriteError::failed(declared, "entity is not an Optional"))?;

        let Some(value) = optional.as_any() else {
            return Ok(Bytes::new());
        };

        let wrapped = arg::wrapped_type(declared);
        let writer = self
            .workers
            .get()
            .and_then(|workers| workers.writer_for(&wrapped, media_type))
            .ok_or_else(|| WriteError::no_writer(&wrapped, media_type))?;
        writer.write_to(value, &wrapped, media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_marshal::{FromStrProvider, StringProvider};

    fn attached() -> (OptionalBodyWriter, Arc<BodyWorkers>) {
        let mut workers = BodyWorkers::new();
        workers.register_writer(Arc::new(StringProvider));
        workers.register_writer(Arc::new(FromStrProvider::<i32>::new()));
        let workers = Arc::new(workers);

        let writer = OptionalBodyWriter::new();
        writer.attach(&workers);
        (writer, workers)
    }

    #[test]
    fn test_applicability() {
        let writer = OptionalBodyWriter::new();
        assert!(writer.is_writeable(&crate::optional_of::<i32>(), &mime::TEXT_PLAIN));
        assert!(!writer.is_writeable(&EntityType::of::<i32>(), &mime::TEXT_PLAIN));
    }

    #[test]
    fn test_present_value_delegates_to_wrapped_writer() {
        let (writer, _workers) = attached();
        let bytes = writer
            .write_to(
                &Optional::present(42_i32),
                &crate::optional_of::<i32>(),
                &mime::TEXT_PLAIN,
            )
            .unwrap();
        assert_eq!(&bytes[..], b"42");
    }

    #[test]
    fn test_absent_writes_empty_body() {
        let (writer, _workers) = attached();
        let bytes = writer
            .write_to(
                &Optional::absent(),
                &crate::optional_of::<i32>(),
                &mime::TEXT_PLAIN,
            )
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_missing_writer_is_an_error() {
        let (writer, _workers) = attached();
        let result = writer.write_to(
            &Optional::present(1.5_f64),
            &crate::optional_of::<f64>(),
            &mime::TEXT_PLAIN,
        );
        assert!(matches!(result, Err(WriteError::NoWriter { .. })));
    }

    #[test]
    fn test_non_optional_entity_is_an_error() {
        let (writer, _workers) = attached();
        let result = writer.write_to(
            &42_i32,
            &crate::optional_of::<i32>(),
            &mime::TEXT_PLAIN,
        );
        assert!(matches!(result, Err(WriteError::Failed { .. })));
    }
}
