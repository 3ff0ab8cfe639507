use crate::{error::FieldError, key::Key, types::Float64, value::Value};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use ulid::Ulid;

///
/// Path
///
/// Opaque type descriptor for an entity type. Stores and error reporting
/// treat it as an identifier only; two entity types must not share a path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Entity
///
/// A domain object resolvable through a store by its primary key.
/// The serde bounds exist so row-oriented stores can move instances
/// through a codec; they impose nothing on callers beyond `derive`.
///

pub trait Entity:
    Path + FieldValues + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type PrimaryKey: Clone + Debug + Eq + Ord + Into<Key> + Send + Sync + 'static;

    fn primary_key(&self) -> Self::PrimaryKey;

    /// Normalized runtime form of this instance's primary key.
    fn key(&self) -> Key {
        self.primary_key().into()
    }
}

///
/// FieldValues
///
/// Dynamic attribute surface over an entity's named fields.
/// Normally derived; `try_set_value` is the write half and must reject
/// both unknown fields and values the field type cannot hold.
///

pub trait FieldValues {
    /// Field names in declaration order.
    const FIELDS: &'static [&'static str];

    fn get_value(&self, field: &str) -> Option<Value>;

    fn try_set_value(&mut self, field: &str, value: &Value) -> Result<(), FieldError>;
}

///
/// FieldValue
///
/// Conversion boundary between one typed field and the runtime `Value`
/// vocabulary.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for Ulid {
    fn to_value(&self) -> Value {
        Value::Ulid(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ulid(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        // non-finite floats have no Value form and surface as Null
        Float64::try_new(*self).map_or(Value::Null, Value::Float64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(v.get()),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        f64::from(*self).to_value()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        let Value::Float64(v) = value else {
            return None;
        };

        // only accept values that survive the narrowing exactly
        let narrowed = v.get() as Self;
        (f64::from(narrowed) == v.get()).then_some(narrowed)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push(T::from_value(item)?);
        }

        Some(out)
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);

///
/// TESTS
///
