//! Feature registering the optional-type adapters.

use crate::{OptionalBodyReader, OptionalBodyWriter, OptionalConverterProvider};
use lumen_marshal::{Feature, MarshallingBuilder};
use std::sync::Arc;

/// Feature enabling optional-value support for bodies and parameters.
///
/// Registers the optional body reader and writer and the optional parameter
/// converter provider, and wires their registry handles once the
/// configuration is built.
///
/// # Example
///
/// ```rust
/// use lumen_marshal::{Marshalling, StdConverterProvider, StringProvider};
/// use lumen_optional::OptionalTypes;
/// use std::sync::Arc;
///
/// let mut builder = Marshalling::builder();
/// builder.register_reader(Arc::new(StringProvider));
/// builder.register_writer(Arc::new(StringProvider));
/// builder.register_provider(Arc::new(StdConverterProvider));
/// builder.register_feature(&OptionalTypes);
/// let marshalling = builder.build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalTypes;

impl Feature for OptionalTypes {
    fn configure(&self, builder: &mut MarshallingBuilder) {
        let reader = Arc::new(OptionalBodyReader::new());
        let writer = Arc::new(OptionalBodyWriter::new());
        let provider = Arc::new(OptionalConverterProvider::new());

        builder.register_reader(reader.clone());
        builder.register_writer(writer.clone());
        builder.register_provider(provider.clone());

        builder.on_build(move |marshalling| {
            reader.attach(marshalling.body_workers());
            writer.attach(marshalling.body_workers());
            provider.attach(marshalling.param_converters());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optional_of, Optional};
    use bytes::Bytes;
    use http::HeaderMap;
    use lumen_marshal::{Marshalling, StdConverterProvider, StringProvider};

    #[test]
    fn test_feature_wires_adapters() {
        let mut builder = Marshalling::builder();
        builder.register_reader(Arc::new(StringProvider));
        builder.register_writer(Arc::new(StringProvider));
        builder.register_provider(Arc::new(StdConverterProvider));
        builder.register_feature(&OptionalTypes);
        let marshalling = builder.build();

        // The body side can read an optional string through the registry.
        let entity = marshalling
            .body_workers()
            .read(
                &optional_of::<String>(),
                &mime::TEXT_PLAIN,
                &HeaderMap::new(),
                &Bytes::from("foo"),
            )
            .unwrap();
        let opt = entity.downcast::<Optional>().unwrap();
        assert_eq!(opt.downcast::<String>().as_deref(), Some("foo"));

        // The parameter side finds a delegating converter.
        let converter = marshalling
            .param_converters()
            .converter_for(&optional_of::<i32>())
            .unwrap();
        let entity = converter.parse(Some("42")).unwrap();
        let opt = entity.downcast::<Optional>().unwrap();
        assert_eq!(opt.downcast::<i32>(), Some(42));
    }
}
