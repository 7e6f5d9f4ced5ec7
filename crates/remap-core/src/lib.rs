//! # remap-core
//!
//! Core engine for object-to-object mapping: given a source instance and a
//! declared destination type, construct a new destination instance whose
//! fields are populated from the source's corresponding fields.
//!
//! This crate provides the foundational traits and types:
//!
//! - [`Value`] / [`ToDynamic`] / [`FromDynamic`] — the dynamic value model
//!   sources decompose into and destinations materialize from
//! - [`TypeDescriptor`] / [`Described`] — destination constructor metadata
//! - [`ParameterNameResolver`] and [`ConstructorExtractor`] — the pluggable
//!   resolution seams adapters hook into
//! - [`Mapper`] / [`MapperConfiguration`] — the public entry point and its
//!   one-shot configuration surface
//!
//! ## Example
//!
//! ```ignore
//! use remap_core::Mapper;
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

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod descriptor;
mod engine;
mod extractor;
mod mapper;
mod resolver;
mod value;

pub use config::{ConfigError, MapperConfiguration, MappingBuilder, TypePair};
pub use descriptor::{ConstructorSpec, Described, ParamShape, ParamSpec, TypeDescriptor};
pub use engine::{MapError, MAX_DEPTH};
pub use extractor::{ConstructorExtractor, DefaultConstructorExtractor};
pub use mapper::Mapper;
pub use resolver::{
    CompositeParameterNameResolver, DefaultParameterNameResolver, ParameterNameResolver,
};
pub use value::{FromDynamic, ObjectView, SimpleKind, ToDynamic, Value};
