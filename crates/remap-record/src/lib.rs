//! Record-style adapter for `remap`.
//!
//! Teaches the engine how to handle record-style destination types: types
//! whose descriptor marks one constructor as canonical and carries a recorded
//! parameter-name table (the stand-in for names available only through richer
//! metadata). Installing the adapter narrows extraction to canonical
//! constructors and tries recorded names before the base resolver chain.
//!
//! ```ignore
//! use remap::record::RecordSupport;
//!
//! let mapper = remap::Mapper::new(|config| {
//!     config.use_records();
//! })?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use remap_core::{
    ConstructorExtractor, ConstructorSpec, MapperConfiguration, ParamSpec, ParameterNameResolver,
    TypeDescriptor,
};

/// Keeps only constructors marked canonical.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordConstructorExtractor;

impl ConstructorExtractor for RecordConstructorExtractor {
    fn extract<'a>(&self, destination: &'a TypeDescriptor) -> Vec<&'a ConstructorSpec> {
        destination
            .constructors()
            .iter()
            .filter(|constructor| constructor.is_canonical())
            .collect()
    }
}

/// Resolves parameter names from the recorded name table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordNameResolver;

impl ParameterNameResolver for RecordNameResolver {
    fn try_resolve_name(&self, parameter: &ParamSpec) -> Option<String> {
        parameter.recorded_name().map(str::to_owned)
    }
}

/// Configuration extension installing record support.
pub trait RecordSupport {
    /// Replaces the constructor extractor with [`RecordConstructorExtractor`]
    /// and prepends [`RecordNameResolver`] to the resolver chain.
    fn use_records(&mut self) -> &mut Self;
}

impl RecordSupport for MapperConfiguration {
    fn use_records(&mut self) -> &mut Self {
        self.set_constructor_extractor(RecordConstructorExtractor);
        self.prepend_parameter_name_resolver(RecordNameResolver);
        self
    }
}
