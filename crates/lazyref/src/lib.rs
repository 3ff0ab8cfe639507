//! Lazy entity references: a `LazyRef` defers its store lookup until first
//! use, performs it at most once, and remembers the outcome, success or
//! failure, until explicitly invalidated.
#![warn(unreachable_pub)]

extern crate self as lazyref;

pub mod error;
pub mod key;
pub mod obs;
pub mod proxy;
pub mod serialize;
pub mod store;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use lazyref_derive::FieldValues;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        key::Key,
        proxy::LazyRef,
        traits::{Entity, FieldValues, Path},
        value::Value,
    };
    pub use lazyref_derive::FieldValues;
}
