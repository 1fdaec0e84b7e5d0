//! Macro captures
//!
//! `-D` definitions are recorded and reported at the end of a run. They are
//! never substituted into the amalgamated text.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A captured macro definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    pub name: String,
    pub value: String,
}

impl MacroDefinition {
    /// Create a macro that is simply defined (value `1`)
    pub fn defined(name: &str) -> Self {
        Self::with_value(name, "1")
    }

    /// Create a macro with a specific value
    pub fn with_value(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse the payload of a `-D` argument (`NAME` or `NAME=VALUE`)
    ///
    /// Splits at the first `=`, so the value may itself contain `=`.
    pub fn parse(payload: &str) -> Self {
        match payload.split_once('=') {
            Some((name, value)) => Self::with_value(name, value),
            None => Self::defined(payload),
        }
    }

    /// Line printed in the end-of-run report
    pub fn report_line(&self) -> String {
        format!("\t\"{}\": \"{}\"", self.name, self.value)
    }
}

impl std::str::FromStr for MacroDefinition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Name-unique set of macro captures
///
/// A repeated name keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroCaptures {
    entries: Vec<MacroDefinition>,
}

impl MacroCaptures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition; returns the value it replaced, if any
    pub fn insert(&mut self, definition: MacroDefinition) -> Option<String> {
        match self.entries.iter_mut().find(|d| d.name == definition.name) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, definition.value)),
            None => {
                self.entries.push(definition);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<MacroDefinition> for MacroCaptures {
    fn extend<I: IntoIterator<Item = MacroDefinition>>(&mut self, iter: I) {
        for definition in iter {
            self.insert(definition);
        }
    }
}

impl FromIterator<MacroDefinition> for MacroCaptures {
    fn from_iter<I: IntoIterator<Item = MacroDefinition>>(iter: I) -> Self {
        let mut captures = Self::new();
        captures.extend(iter);
        captures
    }
}

impl Serialize for MacroCaptures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for definition in &self.entries {
            map.serialize_entry(&definition.name, &definition.value)?;
        }
        map.end()
    }
}

/// Scalar accepted as a macro value in config files (`LEVEL: 3` or `LEVEL: "3"`)
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Float(x) => write!(f, "{}", x),
            ScalarValue::Bool(b) => write!(f, "{}", if *b { 1 } else { 0 }),
        }
    }
}

struct CapturesVisitor;

impl<'de> Visitor<'de> for CapturesVisitor {
    type Value = MacroCaptures;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of macro names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut captures = MacroCaptures::new();
        while let Some((name, value)) = access.next_entry::<String, Option<ScalarValue>>()? {
            let definition = match value {
                Some(value) => MacroDefinition::with_value(&name, &value.to_string()),
                None => MacroDefinition::defined(&name),
            };
            captures.insert(definition);
        }
        Ok(captures)
    }
}

impl<'de> Deserialize<'de> for MacroCaptures {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CapturesVisitor)
    }
}
