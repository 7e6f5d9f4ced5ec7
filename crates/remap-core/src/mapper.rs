//! The public mapper.

use crate::config::{ConfigError, ConfigurationSnapshot, MapperConfiguration};
use crate::descriptor::{Described, TypeDescriptor};
use crate::engine::{MapError, MappingEngine};
use crate::value::{FromDynamic, ToDynamic, Value};

/// Maps source objects onto freshly constructed destination objects.
///
/// A mapper owns an immutable configuration snapshot taken at construction
/// time; `map` is a pure function of the source view, the destination
/// descriptor and that snapshot, so a single `Mapper` may be shared freely
/// across threads.
///
/// ```
/// use remap_core::{Mapper, Value};
/// # use remap_core::{ConstructorSpec, Described, FromDynamic, MapError, ObjectView,
/// #     ParamSpec, SimpleKind, ToDynamic, TypeDescriptor};
/// # struct Pricing { list_price: f64, discount: f64 }
/// # impl ToDynamic for Pricing {
/// #     fn to_dynamic(&self) -> Value {
/// #         ObjectView::new::<Self>("Pricing")
/// #             .field("list_price", self.list_price)
/// #             .field("discount", self.discount)
/// #             .into()
/// #     }
/// # }
/// # struct PricingView { list_price: f64, discount: f64, sale_price: f64 }
/// # impl Described for PricingView {
/// #     fn descriptor() -> TypeDescriptor {
/// #         TypeDescriptor::of::<Self>("PricingView").constructor(
/// #             ConstructorSpec::new()
/// #                 .param(ParamSpec::simple("list_price", SimpleKind::Float))
/// #                 .param(ParamSpec::simple("discount", SimpleKind::Float))
/// #                 .param(ParamSpec::simple("sale_price", SimpleKind::Float)),
/// #         )
/// #     }
/// # }
/// # impl FromDynamic for PricingView {
/// #     fn from_dynamic(value: &Value) -> Result<Self, MapError> {
/// #         Ok(Self {
/// #             list_price: f64::from_dynamic(value.require("PricingView", "list_price")?)?,
/// #             discount: f64::from_dynamic(value.require("PricingView", "discount")?)?,
/// #             sale_price: f64::from_dynamic(value.require("PricingView", "sale_price")?)?,
/// #         })
/// #     }
/// # }
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mapper = Mapper::new(|config| {
///     config.add_mapping::<Pricing, PricingView, _>(|m| {
///         m.set("sale_price", |s| {
///             s.get("list_price").and_then(Value::as_f64).unwrap_or(0.0)
///                 - s.get("discount").and_then(Value::as_f64).unwrap_or(0.0)
///         });
///     });
/// })?;
///
/// let source = Pricing { list_price: 100.0, discount: 20.0 };
/// let view: PricingView = mapper.map(&source)?;
/// assert_eq!(view.sale_price, 80.0);
/// # Ok(())
/// # }
/// ```
pub struct Mapper {
    snapshot: ConfigurationSnapshot,
}

impl Mapper {
    /// Creates a mapper, running the configuration callback exactly once.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] recorded during the callback.
    pub fn new<F: FnOnce(&mut MapperConfiguration)>(configure: F) -> Result<Self, ConfigError> {
        let mut configuration = MapperConfiguration::new();
        configure(&mut configuration);
        Ok(Self {
            snapshot: configuration.freeze()?,
        })
    }

    /// Maps `source` onto a freshly constructed `D`.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] at the first unresolvable constructor,
    /// parameter name, or parameter value; a failed mapping yields no
    /// destination instance.
    pub fn map<S, D>(&self, source: &S) -> Result<D, MapError>
    where
        S: ToDynamic + ?Sized,
        D: Described + FromDynamic,
    {
        let view = source.to_dynamic();
        let descriptor = D::descriptor();
        let mapped = MappingEngine::new(&self.snapshot).map_value(&view, &descriptor)?;
        D::from_dynamic(&mapped)
    }

    /// Maps a dynamic source value against an explicit destination
    /// descriptor, staying in the dynamic domain.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Mapper::map`], without the final typed
    /// materialization.
    pub fn map_value(
        &self,
        source: &Value,
        destination: &TypeDescriptor,
    ) -> Result<Value, MapError> {
        MappingEngine::new(&self.snapshot).map_value(source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ConstructorSpec, ParamSpec};
    use crate::value::{ObjectView, SimpleKind};

    #[derive(Debug, Clone, PartialEq)]
    struct Price {
        amount: f64,
        currency: String,
    }

    impl ToDynamic for Price {
        fn to_dynamic(&self) -> Value {
            ObjectView::new::<Self>("Price")
                .field("amount", self.amount)
                .field("currency", &self.currency)
                .into()
        }
    }

    impl Described for Price {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>("Price").constructor(
                ConstructorSpec::new()
                    .param(ParamSpec::simple("amount", SimpleKind::Float))
                    .param(ParamSpec::simple("currency", SimpleKind::Str)),
            )
        }
    }

    impl FromDynamic for Price {
        fn from_dynamic(value: &Value) -> Result<Self, MapError> {
            Ok(Self {
                amount: f64::from_dynamic(value.require("Price", "amount")?)?,
                currency: String::from_dynamic(value.require("Price", "currency")?)?,
            })
        }
    }

    #[test]
    fn identity_round_trip_over_simple_fields() {
        let mapper = Mapper::new(|_| {}).unwrap();
        let source = Price {
            amount: 19.99,
            currency: "KRW".into(),
        };
        let mapped: Price = mapper.map(&source).unwrap();
        assert_eq!(mapped, source);
    }

    #[test]
    fn mapper_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mapper>();
    }

    #[test]
    fn concurrent_maps_share_one_mapper() {
        let mapper = Mapper::new(|_| {}).unwrap();
        let source = Price {
            amount: 1.0,
            currency: "EUR".into(),
        };
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mapped: Price = mapper.map(&source).unwrap();
                    assert_eq!(mapped.currency, "EUR");
                });
            }
        });
    }

    #[test]
    fn configuration_errors_surface_from_new() {
        let result = Mapper::new(|config| {
            config
                .add_transform::<Price, Price, _, _>(|source| source.clone())
                .add_mapping::<Price, Price, _>(|m| {
                    m.set("amount", |_| 0.0);
                });
        });
        assert!(result.is_err());
    }

    #[test]
    fn dynamic_entry_point_matches_typed_mapping() {
        let mapper = Mapper::new(|_| {}).unwrap();
        let source = Price {
            amount: 5.0,
            currency: "USD".into(),
        };
        let mapped = mapper
            .map_value(&source.to_dynamic(), &Price::descriptor())
            .unwrap();
        assert_eq!(mapped.get("amount"), Some(&Value::Float(5.0)));
        assert_eq!(Price::from_dynamic(&mapped).unwrap(), source);
    }
}
