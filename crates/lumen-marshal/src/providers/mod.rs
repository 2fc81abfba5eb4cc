//! Standard delegate providers.
//!
//! These are the providers applications register for the concrete types
//! their handlers use; container-aware extensions delegate to them through
//! the registries.

mod convert;
mod json;
mod text;

pub use convert::{FromStrConverter, StdConverterProvider};
pub use json::JsonProvider;
pub use text::{FromStrProvider, StringProvider};
