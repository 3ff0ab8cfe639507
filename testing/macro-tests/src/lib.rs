//! Consumer-side coverage for the `FieldValues` derive: everything here goes
//! through the public `lazyref` surface, never the crate internals.

use lazyref::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Goblin
///

#[derive(Clone, Debug, Deserialize, Eq, FieldValues, PartialEq, Serialize)]
pub struct Goblin {
    pub id: u64,
    pub name: String,
    pub loot: Vec<u64>,
    pub clan: Option<String>,
}

impl Path for Goblin {
    const PATH: &'static str = "macro_tests::Goblin";
}

impl Entity for Goblin {
    type PrimaryKey = u64;

    fn primary_key(&self) -> Self::PrimaryKey {
        self.id
    }
}

///
/// TESTS
///
