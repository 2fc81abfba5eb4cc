//! Parameter converter provider for optional declarations.

use crate::arg;
use crate::handle::RegistryHandle;
use crate::Optional;
use lumen_marshal::{
    Entity, EntityType, ParamConverter, ParamConverterProvider, ParamConverters, ParamError,
};
use std::any::Any;
use std::sync::{Arc, OnceLock};

/// Converter provider for parameters declared as "optional of `X`".
///
/// A parameter that was not supplied converts to the absent container; a
/// supplied value is parsed by the converter registered for the bare
/// wrapped type and wrapped as present. When the wrapped type is `String`
/// (including raw declarations, where it is the fallback), no delegate is
/// needed and the raw value is wrapped directly — so a supplied-but-empty
/// value stays `present("")`, distinct from absent.
///
/// For any other wrapped type the provider searches the other registered
/// providers, in registration order and excluding itself, for the first one
/// that supplies a converter. If none does, this provider declares itself
/// not applicable and returns `None`; rejecting the parameter is left to
/// the host. Parse failures from the delegate propagate unchanged.
///
/// The set of other providers is discovered from the attached registry
/// lazily, at most once, and reused for the provider's lifetime.
pub struct OptionalConverterProvider {
    registry: RegistryHandle<ParamConverters>,
    others: OnceLock<Vec<Arc<dyn ParamConverterProvider>>>,
}

impl OptionalConverterProvider {
    /// Creates an unattached provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RegistryHandle::new(),
            others: OnceLock::new(),
        }
    }

    /// Attaches the converter registry this provider searches for delegate
    /// converters.
    pub fn attach(&self, converters: &Arc<ParamConverters>) {
        self.registry.attach(converters);
    }

    /// Returns every registered provider except this one, resolving the set
    /// on first use.
    fn other_providers(&self) -> &[Arc<dyn ParamConverterProvider>] {
        self.others.get_or_init(|| {
            let Some(registry) = self.registry.get() else {
                return Vec::new();
            };
            registry
                .providers()
                .iter()
                .filter(|p| !self.is_self(p))
                .cloned()
                .collect()
        })
    }

    fn is_self(&self, other: &Arc<dyn ParamConverterProvider>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(other).cast::<u8>(),
            (self as *const Self).cast::<u8>(),
        )
    }
}

impl Default for OptionalConverterProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamConverterProvider for OptionalConverterProvider {
    fn converter_for(&self, declared: &EntityType) -> Option<Arc<dyn ParamConverter>> {
        if !declared.is::<Optional>() {
            return None;
        }

        let wrapped = arg::wrapped_type(declared);

        // String is handled directly, also covering raw declarations where
        // the wrapped type could not be determined.
        if wrapped.is::<String>() {
            return Some(Arc::new(StringOptionalConverter));
        }

        for provider in self.other_providers() {
            if let Some(inner) = provider.converter_for(&wrapped) {
                return Some(Arc::new(WrappingConverter { inner }));
            }
        }

        None
    }
}

/// Converter for "optional of String": wraps the raw value without
/// delegation.
struct StringOptionalConverter;

impl ParamConverter for StringOptionalConverter {
    fn parse(&self, raw: Option<&str>) -> Result<Entity, ParamError> {
        Ok(Box::new(match raw {
            Some(value) => Optional::present(value.to_string()),
            None => Optional::absent(),
        }))
    }

    fn render(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<Optional>()?.downcast_ref::<String>().cloned()
    }
}

/// Converter that wraps a delegate converter for the wrapped type.
struct WrappingConverter {
    inner: Arc<dyn ParamConverter>,
}

impl ParamConverter for WrappingConverter {
    fn parse(&self, raw: Option<&str>) -> Result<Entity, ParamError> {
        match raw {
            None => Ok(Box::new(Optional::absent())),
            Some(value) => {
                let entity = self.inner.parse(Some(value))?;
                Ok(Box::new(Optional::of_entity(entity)))
            }
        }
    }

    fn render(&self, value: &dyn Any) -> Option<String> {
        let optional = value.downcast_ref::<Optional>()?;
        optional.as_any().and_then(|inner| self.inner.render(inner))
    }
}
