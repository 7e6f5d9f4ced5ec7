//! Mapping configuration: the builder surface and the frozen snapshot.
//!
//! Configuration happens exactly once, inside the callback passed to
//! [`Mapper::new`](crate::Mapper::new). The callback receives a mutable
//! [`MapperConfiguration`]; every method returns `&mut Self` (or the scoped
//! [`MappingBuilder`]) so calls chain. When the callback returns, the builder
//! is frozen into a [`ConfigurationSnapshot`] the mapper owns for its
//! lifetime.

use crate::extractor::{ConstructorExtractor, DefaultConstructorExtractor};
use crate::resolver::{
    CompositeParameterNameResolver, DefaultParameterNameResolver, ParameterNameResolver,
};
use crate::value::{ToDynamic, Value};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Identity key of a (source type, destination type) pair.
///
/// Rules are looked up against the source's *actual* runtime type, carried by
/// its dynamic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePair {
    source: TypeId,
    destination: TypeId,
}

impl TypePair {
    /// The pair for source type `S` and destination type `D`.
    #[must_use]
    pub fn of<S: 'static, D: 'static>() -> Self {
        Self {
            source: TypeId::of::<S>(),
            destination: TypeId::of::<D>(),
        }
    }

    pub(crate) fn new(source: TypeId, destination: TypeId) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Errors raised while registering configuration.
///
/// Registration failures are recorded during the configuration callback and
/// surfaced from [`Mapper::new`](crate::Mapper::new), before any mapping runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Property overrides and a whole-type transform were both registered for
    /// one type pair.
    #[error(
        "conflicting rules for `{source_type}` -> `{destination}`: \
         a whole-type transform is already registered, property overrides cannot be added"
    )]
    ConflictingRule {
        /// Source type name.
        source_type: &'static str,
        /// Destination type name.
        destination: &'static str,
    },
}

pub(crate) type RuleFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

pub(crate) enum MappingRule {
    Properties(HashMap<String, RuleFn>),
    Transform(RuleFn),
}

/// The mutable configuration builder passed to the `Mapper::new` callback.
pub struct MapperConfiguration {
    constructor_extractor: Box<dyn ConstructorExtractor>,
    parameter_name_resolver: Box<dyn ParameterNameResolver>,
    rules: HashMap<TypePair, MappingRule>,
    error: Option<ConfigError>,
}

impl MapperConfiguration {
    pub(crate) fn new() -> Self {
        Self {
            constructor_extractor: Box::new(DefaultConstructorExtractor),
            parameter_name_resolver: Box::new(DefaultParameterNameResolver),
            rules: HashMap::new(),
            error: None,
        }
    }

    /// Replaces the active constructor extractor.
    pub fn set_constructor_extractor(
        &mut self,
        extractor: impl ConstructorExtractor + 'static,
    ) -> &mut Self {
        self.constructor_extractor = Box::new(extractor);
        self
    }

    /// Replaces the active parameter name resolver chain.
    pub fn set_parameter_name_resolver(
        &mut self,
        resolver: impl ParameterNameResolver + 'static,
    ) -> &mut Self {
        self.parameter_name_resolver = Box::new(resolver);
        self
    }

    /// Composes a resolver in front of the current chain.
    ///
    /// This is the integration hook for adapters: the new resolver is tried
    /// first, and the previous chain remains the fallback.
    pub fn prepend_parameter_name_resolver(
        &mut self,
        resolver: impl ParameterNameResolver + 'static,
    ) -> &mut Self {
        let current = std::mem::replace(
            &mut self.parameter_name_resolver,
            Box::new(DefaultParameterNameResolver),
        );
        self.parameter_name_resolver = Box::new(CompositeParameterNameResolver::new(vec![
            Box::new(resolver),
            current,
        ]));
        self
    }

    /// Opens a [`MappingBuilder`] scoped to the pair `(S, D)` and registers
    /// the overrides it collects.
    ///
    /// Repeated calls for the same pair accumulate; a later override for the
    /// same property name replaces the earlier one. Registering overrides for
    /// a pair that already holds a whole-type transform is a configuration
    /// error, surfaced from [`Mapper::new`](crate::Mapper::new).
    pub fn add_mapping<S, D, F>(&mut self, configure: F) -> &mut Self
    where
        S: 'static,
        D: 'static,
        F: FnOnce(&mut MappingBuilder),
    {
        let pair = TypePair::of::<S, D>();

        if let Some(MappingRule::Transform(_)) = self.rules.get(&pair) {
            self.error.get_or_insert(ConfigError::ConflictingRule {
                source_type: type_name::<S>(),
                destination: type_name::<D>(),
            });
            return self;
        }

        let mut builder = MappingBuilder {
            entries: Vec::new(),
        };
        configure(&mut builder);

        let rule = self
            .rules
            .entry(pair)
            .or_insert_with(|| MappingRule::Properties(HashMap::new()));
        if let MappingRule::Properties(overrides) = rule {
            for (name, function) in builder.entries {
                overrides.insert(name, function);
            }
        }

        self
    }

    /// Registers a whole-type transform for the pair `(S, D)`.
    ///
    /// The transform fully replaces constructor-based resolution for that
    /// pair, and replaces any previously registered rule of either kind.
    pub fn add_transform<S, D, R, F>(&mut self, transform: F) -> &mut Self
    where
        S: 'static,
        D: 'static,
        R: ToDynamic,
        F: Fn(&Value) -> R + Send + Sync + 'static,
    {
        let function: RuleFn = Arc::new(move |source| transform(source).to_dynamic());
        self.rules
            .insert(TypePair::of::<S, D>(), MappingRule::Transform(function));
        self
    }

    pub(crate) fn freeze(self) -> Result<ConfigurationSnapshot, ConfigError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(ConfigurationSnapshot {
                constructor_extractor: self.constructor_extractor,
                parameter_name_resolver: self.parameter_name_resolver,
                rules: self.rules,
            }),
        }
    }
}

/// Builder scoped to one type pair, collecting per-property overrides.
pub struct MappingBuilder {
    entries: Vec<(String, RuleFn)>,
}

impl MappingBuilder {
    /// Registers an override for one destination property.
    ///
    /// The function receives the dynamic view of the source object; its
    /// result is placed into the destination parameter verbatim, with no
    /// further mapping applied. A later `set` for the same property name
    /// replaces the earlier one.
    pub fn set<R: ToDynamic>(
        &mut self,
        property: impl Into<String>,
        compute: impl Fn(&Value) -> R + Send + Sync + 'static,
    ) -> &mut Self {
        let function: RuleFn = Arc::new(move |source| compute(source).to_dynamic());
        self.entries.push((property.into(), function));
        self
    }
}

/// The resolver chain, extractor and rule table frozen at mapper construction.
///
/// Immutable for the owning mapper's lifetime; safe for concurrent read-only
/// use.
pub(crate) struct ConfigurationSnapshot {
    constructor_extractor: Box<dyn ConstructorExtractor>,
    parameter_name_resolver: Box<dyn ParameterNameResolver>,
    rules: HashMap<TypePair, MappingRule>,
}

impl std::fmt::Debug for ConfigurationSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationSnapshot")
            .finish_non_exhaustive()
    }
}

impl ConfigurationSnapshot {
    pub(crate) fn constructor_extractor(&self) -> &dyn ConstructorExtractor {
        self.constructor_extractor.as_ref()
    }

    pub(crate) fn parameter_name_resolver(&self) -> &dyn ParameterNameResolver {
        self.parameter_name_resolver.as_ref()
    }

    pub(crate) fn transform(&self, pair: TypePair) -> Option<&RuleFn> {
        match self.rules.get(&pair) {
            Some(MappingRule::Transform(function)) => Some(function),
            _ => None,
        }
    }

    pub(crate) fn override_for(&self, pair: TypePair, property: &str) -> Option<&RuleFn> {
        match self.rules.get(&pair) {
            Some(MappingRule::Properties(overrides)) => overrides.get(property),
            _ => None,
        }
    }

    pub(crate) fn has_override(&self, pair: TypePair, property: &str) -> bool {
        self.override_for(pair, property).is_some()
    }
}
