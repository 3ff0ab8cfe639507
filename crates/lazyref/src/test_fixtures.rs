use crate::traits::{Entity, Path};
use lazyref_derive::FieldValues;
use serde::{Deserialize, Serialize};

///
/// User
///
/// The workhorse fixture: one plain field per cardinality plus a couple of
/// methods for forwarding tests.
///

#[derive(Clone, Debug, Deserialize, Eq, FieldValues, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub level: u32,
    pub nick: Option<String>,
    pub tags: Vec<String>,
}

impl User {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            level: 1,
            nick: None,
            tags: Vec::new(),
        }
    }

    pub fn shout(&self) -> String {
        format!("{}!", self.name)
    }

    /// Raise the level, capped at 99.
    pub fn promote(&mut self, levels: u32) -> Result<u32, String> {
        let next = self.level.saturating_add(levels);
        if next > 99 {
            return Err(format!("level cap exceeded: {next}"));
        }

        self.level = next;
        Ok(self.level)
    }
}

impl Path for User {
    const PATH: &'static str = "fixtures::User";
}

impl Entity for User {
    type PrimaryKey = u64;

    fn primary_key(&self) -> Self::PrimaryKey {
        self.id
    }
}

///
/// Npc
///

#[derive(Clone, Debug, Deserialize, Eq, FieldValues, PartialEq, Serialize)]
pub struct Npc {
    pub id: u64,
    pub level: u32,
}

impl Npc {
    pub const fn new(id: u64, level: u32) -> Self {
        Self { id, level }
    }
}

impl Path for Npc {
    const PATH: &'static str = "fixtures::Npc";
}

impl Entity for Npc {
    type PrimaryKey = u64;

    fn primary_key(&self) -> Self::PrimaryKey {
        self.id
    }
}

///
/// Realm
///
/// Text-keyed fixture; keys need not be numeric.
///

#[derive(Clone, Debug, Deserialize, Eq, FieldValues, PartialEq, Serialize)]
pub struct Realm {
    pub slug: String,
    pub motd: String,
}

impl Realm {
    pub fn new(slug: &str, motd: &str) -> Self {
        Self {
            slug: slug.to_string(),
            motd: motd.to_string(),
        }
    }
}

impl Path for Realm {
    const PATH: &'static str = "fixtures::Realm";
}

impl Entity for Realm {
    type PrimaryKey = String;

    fn primary_key(&self) -> Self::PrimaryKey {
        self.slug.clone()
    }
}
