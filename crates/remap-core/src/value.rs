//! Dynamic value model.
//!
//! The engine never touches concrete source or destination types directly.
//! Sources are decomposed into a [`Value`] tree via [`ToDynamic`], the engine
//! rearranges that tree, and destinations are materialized from the result via
//! [`FromDynamic`]. This is the capability layer that stands in for runtime
//! reflection.

use crate::engine::MapError;
use serde::Serialize;
use std::any::TypeId;

/// Classification of values that are copied directly instead of being mapped
/// recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleKind {
    /// Boolean values.
    Bool,
    /// Integer values (stored as `i64`).
    Int,
    /// Floating-point values (stored as `f64`).
    Float,
    /// Text values.
    Str,
}

/// A dynamic view of a value.
///
/// `Null`, `Bool`, `Int`, `Float` and `Str` are simple: the engine copies them
/// verbatim. `Object` is complex and is mapped by recursive construction;
/// `Seq` is mapped elementwise into a fresh sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    /// Absence of a value. Maps to `Null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A text value.
    Str(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// A decomposed object with named fields.
    Object(ObjectView),
}

impl Value {
    /// Returns a short name for this value's kind, for error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Seq(_) => "seq",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` if this value has no decomposable structure.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !matches!(self, Self::Seq(_) | Self::Object(_))
    }

    /// Returns the boolean if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is a `Float` or an `Int`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the text if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a `Seq`.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object view if this is an `Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectView> {
        match self {
            Self::Object(view) => Some(view),
            _ => None,
        }
    }

    /// Looks up a field by name if this is an `Object`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|view| view.get(name))
    }

    /// Looks up a required field, for [`FromDynamic`] implementations.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnmappableProperty`] when the field is absent.
    pub fn require(&self, type_name: &'static str, name: &str) -> Result<&Value, MapError> {
        self.get(name).ok_or_else(|| MapError::UnmappableProperty {
            type_name,
            property: name.to_owned(),
        })
    }
}

/// A source object decomposed into named fields.
///
/// Carries the concrete type's identity so that per-type-pair rules can be
/// looked up against the *actual* runtime type of the source, not a declared
/// supertype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectView {
    #[serde(skip)]
    type_id: TypeId,
    type_name: &'static str,
    fields: Vec<(String, Value)>,
}

impl ObjectView {
    /// Creates an empty view of type `T`.
    #[must_use]
    pub fn new<T: 'static>(type_name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            fields: Vec::new(),
        }
    }

    pub(crate) fn from_parts(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            type_id,
            type_name,
            fields: Vec::new(),
        }
    }

    /// Appends a field, consuming and returning the view for chaining.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl ToDynamic) -> Self {
        self.fields.push((name.into(), value.to_dynamic()));
        self
    }

    pub(crate) fn push(&mut self, name: String, value: Value) {
        self.fields.push((name, value));
    }

    /// The `TypeId` of the concrete type this view was taken from.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the concrete type this view was taken from.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

impl From<ObjectView> for Value {
    fn from(view: ObjectView) -> Self {
        Self::Object(view)
    }
}

/// Source capability: decompose `self` into a dynamic [`Value`].
///
/// Implementations for user types list each mapped field:
///
/// ```
/// use remap_core::{ObjectView, ToDynamic, Value};
///
/// struct Address { city: String, zip_code: String }
///
/// impl ToDynamic for Address {
///     fn to_dynamic(&self) -> Value {
///         ObjectView::new::<Self>("Address")
///             .field("city", &self.city)
///             .field("zip_code", &self.zip_code)
///             .into()
///     }
/// }
/// ```
pub trait ToDynamic {
    /// Produces the dynamic view of `self`.
    fn to_dynamic(&self) -> Value;
}

impl<T: ToDynamic + ?Sized> ToDynamic for &T {
    fn to_dynamic(&self) -> Value {
        (**self).to_dynamic()
    }
}

impl ToDynamic for Value {
    fn to_dynamic(&self) -> Value {
        self.clone()
    }
}

impl ToDynamic for ObjectView {
    fn to_dynamic(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToDynamic for bool {
    fn to_dynamic(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToDynamic for str {
    fn to_dynamic(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl ToDynamic for String {
    fn to_dynamic(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToDynamic for f64 {
    fn to_dynamic(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToDynamic for f32 {
    fn to_dynamic(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

macro_rules! to_dynamic_int {
    ($($ty:ty),*) => {
        $(
            impl ToDynamic for $ty {
                fn to_dynamic(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

to_dynamic_int!(i8, i16, i32, i64, u8, u16, u32);

impl<T: ToDynamic> ToDynamic for Option<T> {
    fn to_dynamic(&self) -> Value {
        match self {
            Some(inner) => inner.to_dynamic(),
            None => Value::Null,
        }
    }
}

impl<T: ToDynamic> ToDynamic for Vec<T> {
    fn to_dynamic(&self) -> Value {
        Value::Seq(self.iter().map(ToDynamic::to_dynamic).collect())
    }
}

/// Destination capability: materialize `Self` from a mapped [`Value`].
///
/// For user types this is the constructor-invocation step: the engine hands
/// over an object value whose fields are the resolved constructor arguments,
/// and the implementation builds the instance from them.
pub trait FromDynamic: Sized {
    /// Builds `Self` from a dynamic value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::TypeMismatch`] when the value's kind does not fit
    /// `Self`, or [`MapError::UnmappableProperty`] when a required field is
    /// absent.
    fn from_dynamic(value: &Value) -> Result<Self, MapError>;
}

fn mismatch<T>(expected: &'static str, value: &Value) -> Result<T, MapError> {
    Err(MapError::TypeMismatch {
        expected,
        found: value.kind_name(),
    })
}

impl FromDynamic for bool {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        value.as_bool().map_or_else(|| mismatch("bool", value), Ok)
    }
}

impl FromDynamic for i64 {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        value.as_i64().map_or_else(|| mismatch("int", value), Ok)
    }
}

impl FromDynamic for i32 {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        let wide = i64::from_dynamic(value)?;
        Self::try_from(wide).or_else(|_| mismatch("32-bit int", value))
    }
}

impl FromDynamic for u32 {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        let wide = i64::from_dynamic(value)?;
        Self::try_from(wide).or_else(|_| mismatch("unsigned 32-bit int", value))
    }
}

impl FromDynamic for f64 {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        value.as_f64().map_or_else(|| mismatch("float", value), Ok)
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        value
            .as_str()
            .map_or_else(|| mismatch("str", value), |s| Ok(s.to_owned()))
    }
}

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

impl<T: FromDynamic> FromDynamic for Vec<T> {
    fn from_dynamic(value: &Value) -> Result<Self, MapError> {
        match value {
            Value::Seq(items) => items.iter().map(T::from_dynamic).collect(),
            other => mismatch("seq", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Address {
        city: String,
        zip_code: String,
    }

    impl ToDynamic for Address {
        fn to_dynamic(&self) -> Value {
            ObjectView::new::<Self>("Address")
                .field("city", &self.city)
                .field("zip_code", &self.zip_code)
                .into()
        }
    }

    // --- decomposition ---

    #[test]
    fn object_view_preserves_field_order() {
        let address = Address {
            city: "Busan".into(),
            zip_code: "48058".into(),
        };
        let view = address.to_dynamic();
        let object = view.as_object().unwrap();
        let names: Vec<&str> = object.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["city", "zip_code"]);
    }

    #[test]
    fn object_view_carries_actual_type_identity() {
        let address = Address {
            city: "Busan".into(),
            zip_code: "48058".into(),
        };
        let view = address.to_dynamic();
        let object = view.as_object().unwrap();
        assert_eq!(object.type_id(), std::any::TypeId::of::<Address>());
        assert_eq!(object.type_name(), "Address");
    }

    #[test]
    fn get_finds_field_by_name() {
        let address = Address {
            city: "Busan".into(),
            zip_code: "48058".into(),
        };
        let view = address.to_dynamic();
        assert_eq!(view.get("city").and_then(Value::as_str), Some("Busan"));
        assert_eq!(view.get("country"), None);
    }

    #[test]
    fn option_decomposes_to_null_or_inner() {
        assert_eq!(None::<i32>.to_dynamic(), Value::Null);
        assert_eq!(Some(7).to_dynamic(), Value::Int(7));
    }

    #[test]
    fn vec_decomposes_elementwise_in_order() {
        let view = vec![1, 2, 3].to_dynamic();
        assert_eq!(
            view,
            Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    // --- coercions ---

    #[test]
    fn as_f64_widens_int() {
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
    }

    #[test]
    fn from_dynamic_rejects_wrong_kind() {
        let err = String::from_dynamic(&Value::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            MapError::TypeMismatch {
                expected: "str",
                found: "int"
            }
        ));
    }

    #[test]
    fn from_dynamic_option_accepts_null() {
        assert_eq!(Option::<i64>::from_dynamic(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::from_dynamic(&Value::Int(9)).unwrap(),
            Some(9)
        );
    }

    #[test]
    fn from_dynamic_narrowing_checks_range() {
        assert!(i32::from_dynamic(&Value::Int(i64::MAX)).is_err());
        assert_eq!(i32::from_dynamic(&Value::Int(12)).unwrap(), 12);
    }

    #[test]
    fn mismatch_display_names_both_kinds() {
        let err = i64::from_dynamic(&Value::Str("x".into())).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"type mismatch: expected int, found str");
    }
}
