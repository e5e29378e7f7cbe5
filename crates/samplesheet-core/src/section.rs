//! The sectioned document model.
//!
//! A sectioned sheet is an ordered collection of named sections. Each section
//! is either a flat key/value mapping (settings) or an ordered list of row
//! mappings (data). Iteration order always equals insertion order so that a
//! document can be re-rendered faithfully.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SectionError;

/// Flat key/value section content (e.g. `[Header]`, `[Reads]`).
pub type Settings = IndexMap<String, Value>;

/// Row-list section content (e.g. `[BCLConvert_Data]`), rows in file order.
pub type Data = Vec<Settings>;

/// Content of a single named section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section {
    Settings(Settings),
    Data(Data),
}

impl Section {
    pub fn as_settings(&self) -> Option<&Settings> {
        match self {
            Section::Settings(settings) => Some(settings),
            Section::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Section::Data(rows) => Some(rows),
            Section::Settings(_) => None,
        }
    }
}

/// An ordered collection of named sections.
///
/// Produced by an external reader (or assembled programmatically) and treated
/// as read-only input by all validation and grouping code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionedSheet {
    sections: IndexMap<String, Section>,
}

impl SectionedSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// (name, content) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Look up a section that must be a settings mapping.
    pub fn settings(&self, name: &str) -> Result<&Settings, SectionError> {
        self.sections
            .get(name)
            .ok_or_else(|| SectionError::NotFound(name.to_string()))?
            .as_settings()
            .ok_or_else(|| SectionError::NotSettings(name.to_string()))
    }

    /// Look up a section that must be a row list.
    pub fn data(&self, name: &str) -> Result<&Data, SectionError> {
        self.sections
            .get(name)
            .ok_or_else(|| SectionError::NotFound(name.to_string()))?
            .as_data()
            .ok_or_else(|| SectionError::NotData(name.to_string()))
    }

    /// Insert or replace a settings section, keeping its first-seen position.
    pub fn insert_settings(&mut self, name: impl Into<String>, settings: Settings) {
        self.sections.insert(name.into(), Section::Settings(settings));
    }

    /// Insert or replace a data section, keeping its first-seen position.
    pub fn insert_data(&mut self, name: impl Into<String>, rows: Data) {
        self.sections.insert(name.into(), Section::Data(rows));
    }

    /// Lower the sheet to a plain JSON value, the shape consumed by external
    /// structural validation engines.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<'a> IntoIterator for &'a SectionedSheet {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
