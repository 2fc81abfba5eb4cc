//! Marshalling configuration and the feature registration surface.
//!
//! A [`Marshalling`] bundles the two provider registries and is built once
//! at application startup via [`MarshallingBuilder`]. Extensions register
//! their providers through the [`Feature`] trait; providers that need a
//! handle back to a registry (to delegate to other providers) schedule the
//! wiring with [`MarshallingBuilder::on_build`], which runs after the
//! registries are frozen behind [`Arc`]s.

use crate::{BodyReader, BodyWorkers, BodyWriter, ParamConverterProvider, ParamConverters};
use std::sync::Arc;

/// A bundle of providers registered together, typically by an extension.
///
/// # Example
///
/// ```rust
/// use lumen_marshal::{Feature, Marshalling, MarshallingBuilder, StringProvider};
/// use std::sync::Arc;
///
/// struct TextTypes;
///
/// impl Feature for TextTypes {
///     fn configure(&self, builder: &mut MarshallingBuilder) {
///         builder.register_reader(Arc::new(StringProvider));
///         builder.register_writer(Arc::new(StringProvider));
///     }
/// }
///
/// let mut builder = Marshalling::builder();
/// builder.register_feature(&TextTypes);
/// let marshalling = builder.build();
/// ```
pub trait Feature {
    /// Registers this feature's providers into the builder.
    fn configure(&self, builder: &mut MarshallingBuilder);
}

/// The frozen marshalling configuration shared across requests.
///
/// Holds the body-provider registry and the parameter-converter registry
/// behind [`Arc`]s. Both are immutable after [`MarshallingBuilder::build`],
/// so the configuration is safe to share across worker threads without
/// locking.
pub struct Marshalling {
    workers: Arc<BodyWorkers>,
    converters: Arc<ParamConverters>,
}

impl Marshalling {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> MarshallingBuilder {
        MarshallingBuilder::default()
    }

    /// Returns the body-provider registry.
    #[must_use]
    pub fn body_workers(&self) -> &Arc<BodyWorkers> {
        &self.workers
    }

    /// Returns the parameter-converter registry.
    #[must_use]
    pub fn param_converters(&self) -> &Arc<ParamConverters> {
        &self.converters
    }
}

type BuildHook = Box<dyn FnOnce(&Marshalling)>;

/// Builder for a [`Marshalling`] configuration.
#[derive(Default)]
pub struct MarshallingBuilder {
    workers: BodyWorkers,
    converters: ParamConverters,
    hooks: Vec<BuildHook>,
}

impl MarshallingBuilder {
    /// Registers a body reader. Registration order determines precedence.
    pub fn register_reader(&mut self, reader: Arc<dyn BodyReader>) {
        self.workers.register_reader(reader);
    }

    /// Registers a body writer. Registration order determines precedence.
    pub fn register_writer(&mut self, writer: Arc<dyn BodyWriter>) {
        self.workers.register_writer(writer);
    }

    /// Registers a parameter converter provider. Registration order
    /// determines precedence.
    pub fn register_provider(&mut self, provider: Arc<dyn ParamConverterProvider>) {
        self.converters.register(provider);
    }

    /// Registers every provider a feature contributes.
    pub fn register_feature(&mut self, feature: &dyn Feature) {
        feature.configure(self);
    }

    /// Schedules a hook to run once the registries are built.
    ///
    /// Providers that delegate to other providers use this to obtain their
    /// registry handle, keeping construction free of circular references.
    pub fn on_build(&mut self, hook: impl FnOnce(&Marshalling) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Freezes the registries and runs the scheduled hooks.
    #[must_use]
    pub fn build(self) -> Marshalling {
        let marshalling = Marshalling {
            workers: Arc::new(self.workers),
            converters: Arc::new(self.converters),
        };
        for hook in self.hooks {
            hook(&marshalling);
        }
        marshalling
    }
}
