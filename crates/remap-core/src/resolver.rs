//! Parameter name resolution.
//!
//! Compiled artifacts may not retain constructor parameter names, so naming
//! is pluggable: resolvers are tried in order and the first success wins.
//! Adapters prepend resolvers that read richer metadata before the default
//! one falls back to directly declared names.

use crate::descriptor::ParamSpec;

/// Attempts to recover the logical name of a constructor parameter.
pub trait ParameterNameResolver: Send + Sync {
    /// Returns the parameter's name, or `None` if this resolver cannot
    /// determine it.
    fn try_resolve_name(&self, parameter: &ParamSpec) -> Option<String>;
}

/// Resolves from the directly declared parameter name, when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParameterNameResolver;

impl ParameterNameResolver for DefaultParameterNameResolver {
    fn try_resolve_name(&self, parameter: &ParamSpec) -> Option<String> {
        parameter.declared_name().map(str::to_owned)
    }
}

/// Tries an ordered sequence of resolvers; the first non-empty result wins.
pub struct CompositeParameterNameResolver {
    resolvers: Vec<Box<dyn ParameterNameResolver>>,
}

impl CompositeParameterNameResolver {
    /// Creates a composite over the given resolvers, tried in order.
    #[must_use]
    pub fn new(resolvers: Vec<Box<dyn ParameterNameResolver>>) -> Self {
        Self { resolvers }
    }
}

impl ParameterNameResolver for CompositeParameterNameResolver {
    fn try_resolve_name(&self, parameter: &ParamSpec) -> Option<String> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.try_resolve_name(parameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SimpleKind;

    struct Fixed(&'static str);

    impl ParameterNameResolver for Fixed {
        fn try_resolve_name(&self, _: &ParamSpec) -> Option<String> {
            Some(self.0.to_owned())
        }
    }

    struct Never;

    impl ParameterNameResolver for Never {
        fn try_resolve_name(&self, _: &ParamSpec) -> Option<String> {
            None
        }
    }

    #[test]
    fn default_resolver_reads_declared_name() {
        let param = ParamSpec::simple("quantity", SimpleKind::Int);
        let name = DefaultParameterNameResolver.try_resolve_name(&param);
        assert_eq!(name.as_deref(), Some("quantity"));
    }

    #[test]
    fn default_resolver_yields_nothing_for_unnamed_params() {
        let param = ParamSpec::unnamed(crate::descriptor::ParamShape::Simple(SimpleKind::Int));
        assert_eq!(DefaultParameterNameResolver.try_resolve_name(&param), None);
    }

    #[test]
    fn composite_returns_first_success() {
        let composite = CompositeParameterNameResolver::new(vec![
            Box::new(Never),
            Box::new(Fixed("first")),
            Box::new(Fixed("second")),
        ]);
        let param = ParamSpec::unnamed(crate::descriptor::ParamShape::Simple(SimpleKind::Int));
        assert_eq!(composite.try_resolve_name(&param).as_deref(), Some("first"));
    }

    #[test]
    fn composite_of_failures_yields_nothing() {
        let composite =
            CompositeParameterNameResolver::new(vec![Box::new(Never), Box::new(Never)]);
        let param = ParamSpec::unnamed(crate::descriptor::ParamShape::Simple(SimpleKind::Int));
        assert_eq!(composite.try_resolve_name(&param), None);
    }
}
