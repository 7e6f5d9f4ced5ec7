//! The mapping resolution and construction engine.
//!
//! For each `(source value, destination descriptor)` pair the engine applies,
//! in order: whole-type transform short-circuit, constructor selection,
//! per-parameter name resolution, and value resolution with the precedence
//! *override → same-named source property → recursive sub-mapping → omitted
//! default*. The output is an object value in constructor-parameter order;
//! typed materialization happens once, at the public entry point.

use crate::config::{ConfigurationSnapshot, TypePair};
use crate::descriptor::{ConstructorSpec, ParamShape, TypeDescriptor};
use crate::value::{ObjectView, SimpleKind, Value};
use thiserror::Error;
use tracing::{debug, trace};

/// Maximum recursion depth before a mapping is treated as cyclic.
///
/// The dynamic view is an owned tree, so a genuinely cyclic source graph
/// cannot be represented in it; what the limit bounds is descriptor-level
/// self-reference over deeply nested views, which would otherwise exhaust the
/// call stack.
pub const MAX_DEPTH: usize = 64;

/// Errors raised during a `map` call.
///
/// All errors are raised synchronously at the point of first detection and
/// abort the whole call; a failed mapping yields no destination instance.
#[derive(Debug, Error)]
pub enum MapError {
    /// The destination type exposes zero eligible constructors.
    #[error("`{type_name}` has no eligible constructor")]
    NoConstructor {
        /// Destination type name.
        type_name: &'static str,
    },

    /// More than one eligible constructor remained and nothing disambiguated.
    #[error("`{type_name}` has {candidates} eligible constructors, mapping requires exactly one")]
    AmbiguousConstructor {
        /// Destination type name.
        type_name: &'static str,
        /// Number of constructors that remained eligible.
        candidates: usize,
    },

    /// No resolver in the chain could name a constructor parameter.
    #[error("cannot resolve the name of parameter {index} of `{type_name}`")]
    ParameterNameResolution {
        /// Destination type name.
        type_name: &'static str,
        /// Zero-based position of the unnamed parameter.
        index: usize,
    },

    /// A required parameter has no override, no matching source property, and
    /// no usable default.
    #[error("no source property matches parameter `{property}` of `{type_name}`")]
    UnmappableProperty {
        /// Destination type name.
        type_name: &'static str,
        /// Resolved name of the parameter.
        property: String,
    },

    /// Recursion exceeded [`MAX_DEPTH`]; the source graph is treated as
    /// cyclic.
    #[error("mapping depth limit {limit} exceeded while constructing `{type_name}`")]
    CyclicGraph {
        /// Destination type name at which the limit was hit.
        type_name: &'static str,
        /// The limit that was exceeded.
        limit: usize,
    },

    /// A value's kind does not fit where it was placed.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The kind that was required.
        expected: &'static str,
        /// The kind that was found.
        found: &'static str,
    },

    /// Constructor-based resolution was attempted against a source that has
    /// no decomposable fields.
    #[error("`{type_name}` cannot be constructed from a {found} source, an object is required")]
    NotAnObject {
        /// Destination type name.
        type_name: &'static str,
        /// Kind of the offending source value.
        found: &'static str,
    },
}

pub(crate) struct MappingEngine<'a> {
    snapshot: &'a ConfigurationSnapshot,
}

impl<'a> MappingEngine<'a> {
    pub(crate) fn new(snapshot: &'a ConfigurationSnapshot) -> Self {
        Self { snapshot }
    }

    pub(crate) fn map_value(
        &self,
        source: &Value,
        destination: &TypeDescriptor,
    ) -> Result<Value, MapError> {
        self.map_at(source, destination, 0)
    }

    fn map_at(
        &self,
        source: &Value,
        destination: &TypeDescriptor,
        depth: usize,
    ) -> Result<Value, MapError> {
        if depth > MAX_DEPTH {
            return Err(MapError::CyclicGraph {
                type_name: destination.type_name(),
                limit: MAX_DEPTH,
            });
        }

        if matches!(source, Value::Null) {
            return Ok(Value::Null);
        }

        let pair = source
            .as_object()
            .map(|object| TypePair::new(object.type_id(), destination.type_id()));

        if let Some(pair) = pair {
            if let Some(transform) = self.snapshot.transform(pair) {
                debug!(
                    destination = destination.type_name(),
                    "whole-type transform short-circuits construction"
                );
                return Ok(transform(source));
            }
        }

        let constructor = self.select_constructor(source, destination, pair)?;
        self.construct(source, destination, constructor, pair, depth)
    }

    /// Selects the single constructor to bind.
    ///
    /// A lone candidate is taken as-is so that its precise resolution error
    /// can surface. With several candidates, those whose every parameter is
    /// resolvable are kept: exactly one wins, several fail as ambiguous, and
    /// none falls back to the widest candidate for diagnostics.
    fn select_constructor<'d>(
        &self,
        source: &Value,
        destination: &'d TypeDescriptor,
        pair: Option<TypePair>,
    ) -> Result<&'d ConstructorSpec, MapError> {
        let type_name = destination.type_name();
        let candidates = self.snapshot.constructor_extractor().extract(destination);

        if candidates.is_empty() {
            return Err(MapError::NoConstructor { type_name });
        }
        if candidates.len() == 1 {
            return Ok(candidates[0]);
        }

        let resolvable: Vec<&ConstructorSpec> = candidates
            .iter()
            .copied()
            .filter(|constructor| self.fully_resolvable(source, constructor, pair))
            .collect();

        match resolvable.len() {
            1 => {
                debug!(
                    destination = type_name,
                    arity = resolvable[0].arity(),
                    "disambiguated by parameter resolvability"
                );
                Ok(resolvable[0])
            }
            0 => candidates
                .into_iter()
                .max_by_key(|constructor| constructor.arity())
                .ok_or(MapError::NoConstructor { type_name }),
            candidates => Err(MapError::AmbiguousConstructor {
                type_name,
                candidates,
            }),
        }
    }

    fn fully_resolvable(
        &self,
        source: &Value,
        constructor: &ConstructorSpec,
        pair: Option<TypePair>,
    ) -> bool {
        constructor.params().iter().all(|param| {
            let Some(name) = self
                .snapshot
                .parameter_name_resolver()
                .try_resolve_name(param)
            else {
                return false;
            };

            if pair.is_some_and(|pair| self.snapshot.has_override(pair, &name)) {
                return true;
            }

            match source.get(&name) {
                Some(value) => value_fits(param.shape(), value),
                None => param.has_default() && constructor.allows_omitted_defaults(),
            }
        })
    }

    fn construct(
        &self,
        source: &Value,
        destination: &TypeDescriptor,
        constructor: &ConstructorSpec,
        pair: Option<TypePair>,
        depth: usize,
    ) -> Result<Value, MapError> {
        let type_name = destination.type_name();
        let mut object = ObjectView::from_parts(destination.type_id(), type_name);

        for (index, param) in constructor.params().iter().enumerate() {
            let name = self
                .snapshot
                .parameter_name_resolver()
                .try_resolve_name(param)
                .ok_or(MapError::ParameterNameResolution { type_name, index })?;

            if let Some(function) = pair.and_then(|pair| self.snapshot.override_for(pair, &name)) {
                trace!(destination = type_name, parameter = %name, "resolved from override");
                object.push(name, function(source));
                continue;
            }

            match source.get(&name) {
                Some(value) => {
                    trace!(destination = type_name, parameter = %name, "resolved from source property");
                    let resolved = self.resolve_field(value, param.shape(), depth)?;
                    object.push(name, resolved);
                }
                None if param.has_default() && constructor.allows_omitted_defaults() => {
                    trace!(destination = type_name, parameter = %name, "omitted, declared default applies");
                }
                None => {
                    return Err(match source.as_object() {
                        Some(_) => MapError::UnmappableProperty {
                            type_name,
                            property: name,
                        },
                        None => MapError::NotAnObject {
                            type_name,
                            found: source.kind_name(),
                        },
                    });
                }
            }
        }

        Ok(Value::Object(object))
    }

    fn resolve_field(
        &self,
        value: &Value,
        shape: &ParamShape,
        depth: usize,
    ) -> Result<Value, MapError> {
        match shape {
            ParamShape::Simple(_) => Ok(value.clone()),
            ParamShape::Complex(descriptor) => self.map_at(value, &descriptor(), depth + 1),
            ParamShape::Sequence(element) => match value {
                Value::Null => Ok(Value::Null),
                Value::Seq(items) => items
                    .iter()
                    .map(|item| self.resolve_field(item, element, depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Seq),
                other => Err(MapError::TypeMismatch {
                    expected: "seq",
                    found: other.kind_name(),
                }),
            },
        }
    }
}

fn value_fits(shape: &ParamShape, value: &Value) -> bool {
    match (shape, value) {
        (_, Value::Null) => true,
        (ParamShape::Simple(kind), value) => matches!(
            (kind, value),
            (SimpleKind::Bool, Value::Bool(_))
                | (SimpleKind::Int, Value::Int(_))
                | (SimpleKind::Float, Value::Float(_) | Value::Int(_))
                | (SimpleKind::Str, Value::Str(_))
        ),
        (ParamShape::Complex(_), Value::Object(_)) => true,
        (ParamShape::Sequence(element), Value::Seq(items)) => {
            items.iter().all(|item| value_fits(element, item))
        }
        _ => false,
    }
}
