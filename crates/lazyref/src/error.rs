use crate::{key::Key, traits::Path, value::Value};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level composite error. Accessors on a lazy reference surface either
/// a store failure (remembered by the reference until invalidation) or a
/// field failure (never remembered).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// True when the underlying failure is a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Store(err) => err.is_not_found(),
            Self::Field(_) => false,
        }
    }
}

///
/// StoreError
///
/// Resolution failures reported by a store. Clone and Eq are part of the
/// contract: a failed lookup is remembered and re-raised verbatim until the
/// reference is invalidated.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum StoreError {
    #[error("store corruption: {message}")]
    Corrupt { message: String },

    #[error("store invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("entity not found: {path} ({key})")]
    NotFound { path: &'static str, key: Key },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    pub fn not_found<E: Path>(key: impl Into<Key>) -> Self {
        Self::NotFound {
            path: E::PATH,
            key: key.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

///
/// FieldError
///
/// Failures on the dynamic attribute surface of a resolved entity.
/// These describe the access, not the reference; they are surfaced
/// immediately and never remembered.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum FieldError {
    #[error("field '{field}' cannot hold a {label} value")]
    IncompatibleValue { field: String, label: &'static str },

    #[error("unknown field: {field}")]
    UnknownField { field: String },
}

impl FieldError {
    pub fn unknown(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn incompatible(field: impl Into<String>, value: &Value) -> Self {
        Self::IncompatibleValue {
            field: field.into(),
            label: value.label(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl Path for Widget {
        const PATH: &'static str = "demo::Widget";
    }

    #[test]
    fn not_found_carries_path_and_key() {
        let err = StoreError::not_found::<Widget>(42_u64);

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "entity not found: demo::Widget (42)");
    }

    #[test]
    fn composite_error_keeps_not_found_visible() {
        let store: Error = StoreError::not_found::<Widget>(1_u64).into();
        let field: Error = FieldError::unknown("nick").into();

        assert!(store.is_not_found());
        assert!(!field.is_not_found());
    }

    #[test]
    fn remembered_errors_compare_equal() {
        let first = StoreError::unavailable("backend offline");
        let again = first.clone();

        assert_eq!(first, again, "a re-raised error must equal the original");
    }

    #[test]
    fn field_error_messages_name_the_field() {
        let err = FieldError::incompatible("level", &Value::Text("ten".into()));

        assert_eq!(err.to_string(), "field 'level' cannot hold a Text value");
        assert_eq!(
            FieldError::unknown("nick").to_string(),
            "unknown field: nick"
        );
    }
}
