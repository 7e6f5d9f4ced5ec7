//! Constructor extraction.
//!
//! The extractor decides which of a destination type's constructors are
//! candidates for mapping. The default accepts every declared constructor;
//! adapters narrow the set (for example to canonical constructors only) to
//! avoid ambiguity.

use crate::descriptor::{ConstructorSpec, TypeDescriptor};

/// Returns the candidate constructors of a destination type.
pub trait ConstructorExtractor: Send + Sync {
    /// Extracts the constructors eligible for mapping, in declaration order.
    fn extract<'a>(&self, destination: &'a TypeDescriptor) -> Vec<&'a ConstructorSpec>;
}

/// Accepts all declared constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConstructorExtractor;

impl ConstructorExtractor for DefaultConstructorExtractor {
    fn extract<'a>(&self, destination: &'a TypeDescriptor) -> Vec<&'a ConstructorSpec> {
        destination.constructors().iter().collect()
    }
}
