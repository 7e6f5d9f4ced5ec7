//! Destination type descriptors.
//!
//! A [`TypeDescriptor`] is the destination-side capability the engine queries
//! at mapping time: which constructors exist, and for each constructor the
//! ordered parameter list with declared shapes. Descriptors are plain data
//! supplied by destination types through [`Described`]; adapters read the
//! extra metadata fields ([`ConstructorSpec::is_canonical`],
//! [`ParamSpec::recorded_name`]) that the base engine ignores.

use crate::value::SimpleKind;
use std::any::TypeId;

/// Describes a destination type: identity plus candidate constructors.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    constructors: Vec<ConstructorSpec>,
}

impl TypeDescriptor {
    /// Starts a descriptor for type `T`.
    #[must_use]
    pub fn of<T: 'static>(type_name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            constructors: Vec::new(),
        }
    }

    /// Adds a constructor.
    #[must_use]
    pub fn constructor(mut self, spec: ConstructorSpec) -> Self {
        self.constructors.push(spec);
        self
    }

    /// The described type's `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The described type's name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All declared constructors, in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }
}

/// One constructor of a destination type: its ordered parameters plus
/// adapter-visible metadata.
#[derive(Debug, Clone, Default)]
pub struct ConstructorSpec {
    params: Vec<ParamSpec>,
    canonical: bool,
    allows_omitted_defaults: bool,
}

impl ConstructorSpec {
    /// Starts an empty constructor spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Marks this constructor as the type's canonical constructor.
    ///
    /// The base engine ignores the flag; narrowing extractors (such as the
    /// record adapter) use it to disambiguate.
    #[must_use]
    pub fn canonical(mut self) -> Self {
        self.canonical = true;
        self
    }

    /// Declares that parameters with defaults may be omitted entirely.
    ///
    /// Default usage is a declared capability of the constructor, never
    /// inferred by the engine. Without this flag, `has_default` parameters
    /// are treated like any other required parameter.
    #[must_use]
    pub fn with_omitted_defaults(mut self) -> Self {
        self.allows_omitted_defaults = true;
        self
    }

    /// Whether this is the canonical constructor.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    /// Whether defaulted parameters may be omitted.
    #[must_use]
    pub fn allows_omitted_defaults(&self) -> bool {
        self.allows_omitted_defaults
    }

    /// The parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// One constructor parameter: optional name metadata plus its declared shape.
///
/// `declared_name` models directly available parameter names; it is absent
/// when that metadata has been stripped, in which case only a resolver with
/// access to richer metadata (for example the recorded name table) can name
/// the parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    declared_name: Option<&'static str>,
    recorded_name: Option<&'static str>,
    shape: ParamShape,
    has_default: bool,
}

impl ParamSpec {
    /// A named parameter of a simple kind.
    #[must_use]
    pub fn simple(name: &'static str, kind: SimpleKind) -> Self {
        Self::named(name, ParamShape::Simple(kind))
    }

    /// A named parameter of a complex type, mapped by recursive construction.
    #[must_use]
    pub fn complex(name: &'static str, descriptor: fn() -> TypeDescriptor) -> Self {
        Self::named(name, ParamShape::Complex(descriptor))
    }

    /// A named sequence parameter whose elements have the given shape.
    #[must_use]
    pub fn sequence(name: &'static str, element: ParamShape) -> Self {
        Self::named(name, ParamShape::Sequence(Box::new(element)))
    }

    /// A named parameter of an arbitrary shape.
    #[must_use]
    pub fn named(name: &'static str, shape: ParamShape) -> Self {
        Self {
            declared_name: Some(name),
            recorded_name: None,
            shape,
            has_default: false,
        }
    }

    /// A parameter whose declared name is unavailable.
    #[must_use]
    pub fn unnamed(shape: ParamShape) -> Self {
        Self {
            declared_name: None,
            recorded_name: None,
            shape,
            has_default: false,
        }
    }

    /// Attaches a recorded name (the annotation-table analog), readable only
    /// by resolvers that look for it.
    #[must_use]
    pub fn recorded_as(mut self, name: &'static str) -> Self {
        self.recorded_name = Some(name);
        self
    }

    /// Marks this parameter as having a declared default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// The directly declared name, if present.
    #[must_use]
    pub fn declared_name(&self) -> Option<&'static str> {
        self.declared_name
    }

    /// The recorded name, if present.
    #[must_use]
    pub fn recorded_name(&self) -> Option<&'static str> {
        self.recorded_name
    }

    /// The declared shape.
    #[must_use]
    pub fn shape(&self) -> &ParamShape {
        &self.shape
    }

    /// Whether the parameter declares a default value.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.has_default
    }
}

/// The declared shape of a constructor parameter.
#[derive(Debug, Clone)]
pub enum ParamShape {
    /// A simple value, copied verbatim from the source.
    Simple(SimpleKind),
    /// A complex type, mapped by recursive construction against the returned
    /// descriptor.
    Complex(fn() -> TypeDescriptor),
    /// An ordered collection whose elements have the inner shape.
    Sequence(Box<ParamShape>),
}

/// Destination capability: supply the [`TypeDescriptor`] for `Self`.
///
/// Descriptors are pure of any source value; implementations may build them
/// fresh on every call.
pub trait Described {
    /// The descriptor for `Self`.
    fn descriptor() -> TypeDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shipment;

    fn shipment_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Shipment>("Shipment")
            .constructor(
                ConstructorSpec::new()
                    .param(ParamSpec::simple("recipient", SimpleKind::Str))
                    .param(ParamSpec::simple("express", SimpleKind::Bool).with_default())
                    .canonical()
                    .with_omitted_defaults(),
            )
            .constructor(ConstructorSpec::new())
    }

    #[test]
    fn descriptor_preserves_constructor_and_param_order() {
        let descriptor = shipment_descriptor();
        assert_eq!(descriptor.constructors().len(), 2);
        let params = descriptor.constructors()[0].params();
        assert_eq!(params[0].declared_name(), Some("recipient"));
        assert_eq!(params[1].declared_name(), Some("express"));
    }

    #[test]
    fn metadata_flags_are_off_by_default() {
        let descriptor = shipment_descriptor();
        let plain = &descriptor.constructors()[1];
        assert!(!plain.is_canonical());
        assert!(!plain.allows_omitted_defaults());
        assert_eq!(plain.arity(), 0);
    }

    #[test]
    fn default_capability_is_declared_per_constructor() {
        let descriptor = shipment_descriptor();
        let canonical = &descriptor.constructors()[0];
        assert!(canonical.allows_omitted_defaults());
        assert!(canonical.params()[1].has_default());
        assert!(!canonical.params()[0].has_default());
    }
}
