//! # Lumen Marshal
//!
//! Entity marshalling SPI and provider registries for the Lumen HTTP
//! framework.
//!
//! This crate defines how request and response bodies and string-valued
//! parameters are converted to and from typed values. Concrete conversions
//! are performed by *providers* — [`BodyReader`]s, [`BodyWriter`]s and
//! [`ParamConverter`]s — registered at startup and looked up at request time
//! by declared type and media type.
//!
//! ## Providers and registries
//!
//! | Trait | Registry | Looked up by |
//! |-------|----------|--------------|
//! | [`BodyReader`] | [`BodyWorkers`] | declared type + media type |
//! | [`BodyWriter`] | [`BodyWorkers`] | declared type + media type |
//! | [`ParamConverterProvider`] | [`ParamConverters`] | declared type |
//!
//! Because providers are registered dynamically, declared types travel as
//! runtime [`EntityType`] descriptors and values as type-erased [`Entity`]
//! boxes. Registration order determines precedence: the first applicable
//! provider wins.
//!
//! ## Example
//!
//! ```rust
//! use lumen_marshal::{BodyWorkers, EntityType, FromStrProvider, StringProvider};
//! use bytes::Bytes;
//! use http::HeaderMap;
//! use std::sync::Arc;
//!
//! let mut workers = BodyWorkers::new();
//! workers.register_reader(Arc::new(StringProvider));
//! workers.register_reader(Arc::new(FromStrProvider::<i32>::new()));
//!
//! let entity = workers
//!     .read(&EntityType::of::<i32>(), &mime::TEXT_PLAIN, &HeaderMap::new(), &Bytes::from("42"))
//!     .unwrap();
//! assert_eq!(entity.downcast_ref::<i32>(), Some(&42));
//! ```
//!
//! ## Features
//!
//! Extensions bundle their providers behind the [`Feature`] trait and are
//! registered into a [`MarshallingBuilder`]; the built [`Marshalling`] holds
//! the frozen registries shared across requests.

#![doc(html_root_url = "https://docs.rs/lumen-marshal/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod entity;
mod error;
mod feature;
mod param;
mod providers;

pub use body::{BodyReader, BodyWorkers, BodyWriter};
pub use entity::{Entity, EntityType};
pub use error::{ParamError, ReadError, WriteError};
pub use feature::{Feature, Marshalling, MarshallingBuilder};
pub use param::{ParamConverter, ParamConverterProvider, ParamConverters};
pub use providers::{FromStrConverter, FromStrProvider, JsonProvider, StdConverterProvider, StringProvider};
