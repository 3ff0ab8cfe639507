use derive_more::Display;
use std::cmp::Ordering;
use ulid::Ulid;

///
/// Key
///
/// Normalized runtime form of a reference key.
/// Typed primary keys convert into this for display, error reporting and
/// store-side indexing, so every entity type shares one keyspace vocabulary.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum Key {
    Int(i64),
    Text(String),
    Uint(u64),
    Ulid(Ulid),
    Unit,
}

impl Key {
    // Rank is part of deterministic cross-variant ordering; do not reorder.
    const fn variant_rank(&self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Text(_) => 1,
            Self::Uint(_) => 2,
            Self::Ulid(_) => 3,
            Self::Unit => 4,
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ord::cmp(a, b),
            (Self::Text(a), Self::Text(b)) => Ord::cmp(a, b),
            (Self::Uint(a), Self::Uint(b)) => Ord::cmp(a, b),
            (Self::Ulid(a), Self::Ulid(b)) => Ord::cmp(a, b),

            _ => Ord::cmp(&self.variant_rank(), &other.variant_rank()), // fallback for cross-type comparison
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl From<()> for Key {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl PartialEq<()> for Key {
    fn eq(&self, (): &()) -> bool {
        matches!(self, Self::Unit)
    }
}

impl PartialEq<Key> for () {
    fn eq(&self, other: &Key) -> bool {
        other == self
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Text(v) if v.as_str() == *other)
    }
}

impl PartialEq<Key> for &str {
    fn eq(&self, other: &Key) -> bool {
        other == self
    }
}

/// Implements `From<T> for Key` for simple conversions
macro_rules! impl_from_key {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Key {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    }
}

/// Implements symmetric PartialEq between Key and another type
macro_rules! impl_eq_key {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl PartialEq<$ty> for Key {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Self::$variant(val) if val == other)
                }
            }

            impl PartialEq<Key> for $ty {
                fn eq(&self, other: &Key) -> bool {
                    other == self
                }
            }
        )*
    }
}

impl_from_key! {
    i8  => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    String => Text,
    &str => Text,
    u8  => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    Ulid => Ulid,
}

impl_eq_key! {
    i64 => Int,
    String => Text,
    u64  => Uint,
    Ulid => Ulid,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_right_variant() {
        assert_eq!(Key::from(42_u32), Key::Uint(42));
        assert_eq!(Key::from(-7_i16), Key::Int(-7));
        assert_eq!(Key::from("alice"), Key::Text("alice".to_string()));
        assert_eq!(Key::from(()), Key::Unit);
    }

    #[test]
    fn symmetric_equality_with_plain_types() {
        assert_eq!(Key::Uint(9), 9_u64);
        assert_eq!(9_u64, Key::Uint(9));
        assert_eq!(Key::Text("slug".into()), "slug");
        assert_ne!(Key::Int(9), 9_u64);
    }

    #[test]
    fn ordering_within_a_variant_follows_the_value() {
        let mut keys = vec![Key::Uint(3), Key::Uint(1), Key::Uint(2)];
        keys.sort();

        assert_eq!(keys, vec![Key::Uint(1), Key::Uint(2), Key::Uint(3)]);
    }

    #[test]
    fn ordering_across_variants_is_stable() {
        let mut keys = vec![
            Key::Unit,
            Key::Ulid(Ulid::from_parts(0, 1)),
            Key::Text("a".into()),
            Key::Uint(0),
            Key::Int(i64::MAX),
        ];
        keys.sort();

        let ranks: Vec<u8> = keys.iter().map(Key::variant_rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4], "variant rank order drifted");
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Key::Uint(42).to_string(), "42");
        assert_eq!(Key::Text("alice".into()).to_string(), "alice");
        assert_eq!(Key::Unit.to_string(), "Unit");
    }
}
