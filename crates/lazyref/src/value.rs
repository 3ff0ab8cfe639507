use crate::types::Float64;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// Value
///
/// Runtime representation of one entity attribute, as surfaced by the
/// dynamic `get`/`set` accessors.
///
/// Null → the field's value is Option::None.
/// Unit → placeholder for entities keyed by nothing; not a real value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Float64(Float64),
    Int(i64),
    /// Ordered list of values.
    /// Used for many-cardinality fields; order is preserved.
    List(Vec<Self>),
    Null,
    Text(String),
    Uint(u64),
    Ulid(Ulid),
    Unit,
}

impl Value {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Float64(_) => "Float64",
            Self::Int(_) => "Int",
            Self::List(_) => "List",
            Self::Null => "Null",
            Self::Text(_) => "Text",
            Self::Uint(_) => "Uint",
            Self::Ulid(_) => "Ulid",
            Self::Unit => "Unit",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let cases = [
            (Value::Bool(true), "Bool"),
            (Value::Int(-3), "Int"),
            (Value::List(vec![]), "List"),
            (Value::Null, "Null"),
            (Value::Text("x".to_string()), "Text"),
            (Value::Uint(9), "Uint"),
            (Value::Ulid(Ulid::from_parts(1, 2)), "Ulid"),
            (Value::Unit, "Unit"),
        ];

        for (value, label) in cases {
            assert_eq!(value.label(), label, "label drifted for {value:?}");
        }
    }

    #[test]
    fn null_detection() {
        assert!(Value::Null.is_null());
        assert!(!Value::Unit.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn nested_lists_compare_structurally() {
        let a = Value::List(vec![Value::Int(1), Value::List(vec![Value::Text("a".into())])]);
        let b = Value::List(vec![Value::Int(1), Value::List(vec![Value::Text("a".into())])]);

        assert_eq!(a, b);
    }

    #[test]
    fn serde_round_trip_preserves_variants() {
        let original = Value::List(vec![
            Value::Bool(false),
            Value::Null,
            Value::Text("hello".into()),
            Value::Uint(7),
        ]);

        let json = serde_json::to_string(&original).unwrap();
        let decoded: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(original, decoded, "Value must survive a serde round trip");
    }
}
