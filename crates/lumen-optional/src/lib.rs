//! # Lumen Optional
//!
//! First-class optional-value support for Lumen's marshalling pipeline.
//!
//! This crate lets handlers declare request/response bodies and
//! query/path/header parameters as "optional of `X`". The adapters here do
//! no deserialization or string conversion of their own: they resolve the
//! wrapped type `X`, look up the provider already registered for bare `X`
//! in the [`lumen_marshal`] registries, delegate to it, and wrap or unwrap
//! the [`Optional`] container around its result.
//!
//! ## Pieces
//!
//! | Item | Role |
//! |------|------|
//! | [`Optional`] | Type-erased present-or-absent container |
//! | [`wrapped_type`] / [`wrapped_type_or`] | Resolve `X` from a declaration |
//! | [`OptionalBodyReader`] | Read "optional of `X`" bodies |
//! | [`OptionalBodyWriter`] | Write "optional of `X`" bodies |
//! | [`OptionalConverterProvider`] | Convert "optional of `X`" parameters |
//! | [`OptionalTypes`] | Feature registering the three adapters |
//!
//! ## Absence is not an error
//!
//! Two body-read conditions deliberately degrade to an absent container
//! instead of failing: an empty body, and a wrapped type with no registered
//! reader (the latter with a logged warning). Genuine delegate failures —
//! a malformed integer, a broken JSON document — always propagate
//! unchanged. See [`OptionalBodyReader`] for the full policy.
//!
//! ## Example
//!
//! ```rust
//! use lumen_marshal::{Marshalling, FromStrProvider, StdConverterProvider, StringProvider};
//! use lumen_optional::{optional_of, Optional, OptionalTypes};
//! use std::sync::Arc;
//!
//! let mut builder = Marshalling::builder();
//! builder.register_reader(Arc::new(StringProvider));
//! builder.register_reader(Arc::new(FromStrProvider::<i32>::new()));
//! builder.register_provider(Arc::new(StdConverterProvider));
//! builder.register_feature(&OptionalTypes);
//! let marshalling = builder.build();
//!
//! // A supplied query parameter parses to a present container.
//! let converter = marshalling
//!     .param_converters()
//!     .converter_for(&optional_of::<String>())
//!     .unwrap();
//! let entity = converter.parse(Some("bar")).unwrap();
//! let opt = entity.downcast::<Optional>().unwrap();
//! assert_eq!(opt.unwrap_or("baz".to_string()), "bar");
//!
//! // A missing one is absent, and the handler picks the default.
//! let entity = converter.parse(None).unwrap();
//! let opt = entity.downcast::<Optional>().unwrap();
//! assert_eq!(opt.unwrap_or("baz".to_string()), "baz");
//! ```

#![doc(html_root_url = "https://docs.rs/lumen-optional/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arg;
mod converter;
mod feature;
mod handle;
mod optional;
mod reader;
mod writer;

pub use arg::{wrapped_type, wrapped_type_or};
pub use converter::OptionalConverterProvider;
pub use feature::OptionalTypes;
pub use optional::{optional_of, optional_raw, Optional};
pub use reader::OptionalBodyReader;
pub use writer::OptionalBodyWriter;
