//! # remap
//!
//! Object-to-object mapping for Rust: construct a destination instance from a
//! source instance by binding constructor parameters to same-named source
//! fields, with declarative overrides and whole-type transforms.
//!
//! This is the main facade crate, re-exporting the core engine and the
//! bundled adapters.
//!
//! ## Quick start
//!
//! ```ignore
//! use remap::{Mapper, Value};
//!
//! let mapper = Mapper::new(|config| {
//!     config.add_mapping::<Pricing, PricingView, _>(|m| {
//!         m.set("sale_price", |s| {
//!             s.get("list_price").and_then(Value::as_f64).unwrap_or(0.0)
//!                 - s.get("discount").and_then(Value::as_f64).unwrap_or(0.0)
//!         });
//!     });
//! })?;
//!
//! let view: PricingView = mapper.map(&pricing)?;
//! ```
//!
//! ## Adapters
//!
//! Language- or convention-specific adapters integrate by installing a
//! replacement [`ConstructorExtractor`] and prepending a
//! [`ParameterNameResolver`]:
//!
//! ```ignore
//! use remap::record::RecordSupport;
//!
//! let mapper = remap::Mapper::new(|config| {
//!     config.use_records();
//! })?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use remap_core::*;

/// Record-style adapter: canonical constructors and recorded parameter names.
pub mod record {
    pub use remap_record::*;
}
