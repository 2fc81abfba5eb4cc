//! Standard parameter converters.
//!
//! [`FromStrConverter`] adapts any `FromStr`/`Display` type to the
//! [`ParamConverter`] contract; [`StdConverterProvider`] supplies such
//! converters for `String`, the numeric primitives, `bool` and `char`.

use crate::{Entity, EntityType, ParamConverter, ParamConverterProvider, ParamError};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// Parameter converter for a `FromStr`/`Display` type `T`.
///
/// A missing parameter (`parse(None)`) is an error for these types; only
/// container-aware converters translate it into absence.
pub struct FromStrConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrConverter<T> {
    /// Creates a converter for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FromStrConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromStrConverter")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> ParamConverter for FromStrConverter<T>
where
    T: FromStr + fmt::Display + Any + Send,
    T::Err: fmt::Display,
{
    fn parse(&self, raw: Option<&str>) -> Result<Entity, ParamError> {
        let declared = EntityType::of::<T>();
        let raw = raw.ok_or_else(|| ParamError::missing(&declared))?;
        let value: T = raw.parse().map_err(|e| ParamError::invalid(&declared, e))?;
        Ok(Box::new(value))
    }

    fn render(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(ToString::to_string)
    }
}

/// Provider of [`FromStrConverter`]s for the standard scalar types.
///
/// Covers `String`, `bool`, `char`, the signed and unsigned integers and
/// the floats. Applications register it once; extensions that wrap other
/// converters find these through the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConverterProvider;

impl ParamConverterProvider for StdConverterProvider {
    fn converter_for(&self, declared: &EntityType) -> Option<Arc<dyn ParamConverter>> {
        macro_rules! converter {
            ($($ty:ty),* $(,)?) => {
                $(
                    if declared.is::<$ty>() {
                        return Some(Arc::new(FromStrConverter::<$ty>::new()));
                    }
                )*
            };
        }

        converter!(
            String, bool, char, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64,
        );
        None
    }
}
