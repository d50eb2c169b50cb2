use serde::{
    Serialize,
    ser::{SerializeMap, Serializer},
};
use tracing::{debug, info};

use crate::error::Error;

pub mod error;

pub const CLASSNAME: &str = "classname";

/// Insertion-ordered `key -> value` pairs.
///
/// Order is kept so that a rewritten entity lump lists its keys the way the
/// map compiler wrote them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyValues(Vec<(String, String)>);

impl KeyValues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Appends a pair, refusing to overwrite an existing key. The returned
    /// slot lets a caller reserve the key before its value is known.
    pub fn try_insert(&mut self, key: String, value: String) -> Result<&mut String, Error> {
        if self.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }

        let index = self.0.len();
        self.0.push((key, value));

        Ok(&mut self.0[index].1)
    }

    /// Replaces the value in place, or appends when the key is new.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Later duplicates replace earlier ones; use `try_insert` when duplicates are an error.
impl<K, V> FromIterator<(K, V)> for KeyValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs = Self::new();
        for (k, v) in iter {
            pairs.set(&k.into(), &v.into());
        }
        pairs
    }
}

impl Serialize for KeyValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One `{ ... }` record of a map's entity lump.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Entity(KeyValues);

impl Entity {
    pub fn classname(&self) -> Option<&str> {
        self.0.get(CLASSNAME)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)
    }

    pub fn pairs(&self) -> &KeyValues {
        &self.0
    }

    /// Renders the entity the way the engine's entity lump spells it:
    /// one `"key" "value"` line per pair between braces.
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str("{\n");
        for (k, v) in self.0.iter() {
            output.push_str(format!("\t\"{}\" \"{}\"\n", k, v).as_str());
        }
        output.push_str("}\n");
        output
    }
}

impl From<KeyValues> for Entity {
    fn from(value: KeyValues) -> Self {
        Self(value)
    }
}

/// Class name (lowercased) to the default pairs entities of that class receive.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AliasTable(Vec<(String, KeyValues)>);

impl AliasTable {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, classname: &str) -> Option<&KeyValues> {
        self.0
            .iter()
            .find(|(name, _)| name == classname)
            .map(|(_, overrides)| overrides)
    }

    pub fn contains(&self, classname: &str) -> bool {
        self.get(classname).is_some()
    }

    /// Adds a class name, failing if it is already defined. Returns its
    /// overrides so the block can be filled in after the name is claimed.
    pub fn try_insert(
        &mut self,
        classname: String,
        overrides: KeyValues,
    ) -> Result<&mut KeyValues, Error> {
        if self.contains(&classname) {
            return Err(Error::DuplicateAlias(classname));
        }

        let index = self.0.len();
        self.0.push((classname, overrides));

        Ok(&mut self.0[index].1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges aliases into `entities` with the default [`Applier`].
    pub fn apply(&self, entities: &mut [Entity]) -> usize {
        Applier::new().apply(self, entities)
    }
}

/// Merges alias defaults into entities whose classname has an alias.
///
/// Keys the entity already defines always win. The alias' own `classname`
/// is skipped unless renaming is enabled, in which case it replaces the
/// entity's classname in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct Applier {
    rename_classname: bool,
}

impl Applier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_classname(mut self, rename: bool) -> Self {
        self.rename_classname = rename;
        self
    }

    /// Returns the number of entities an alias was applied to.
    pub fn apply(&self, table: &AliasTable, entities: &mut [Entity]) -> usize {
        let mut aliased = 0;

        for entity in entities.iter_mut() {
            let Some(classname) = entity.classname().map(str::to_string) else {
                continue;
            };
            let Some(overrides) = table.get(&classname) else {
                continue;
            };

            for (key, value) in overrides.iter() {
                if key == CLASSNAME {
                    if self.rename_classname {
                        entity.0.set(key, value);
                    }
                } else if !entity.0.contains_key(key) {
                    entity.0.set(key, value);
                } else {
                    debug!(
                        target: "bspentityalias::alias",
                        classname = %classname,
                        key,
                        "entity already defines key, keeping its value"
                    );
                }
            }

            info!(
                target: "bspentityalias::alias",
                "aliasing {} -> {}...",
                classname,
                entity.classname().unwrap_or_default()
            );
            aliased += 1;
        }

        aliased
    }
}
