//! Partial-update payloads.
//!
//! A PATCH body only ever contains fields that are both marked dirty and
//! actually different after normalisation. Text is trimmed and a blank
//! value means "absent"; each field decides whether absent is sent as an
//! explicit `null` or left out of the body.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

/// How a text field that became blank is written to the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blank {
    /// Send `null` so the backend clears the stored value.
    Clear,
    /// Leave the key out; the backend keeps whatever it has.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyFields(BTreeSet<&'static str>);

impl DirtyFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    pub fn mark_if(&mut self, field: &'static str, changed: bool) {
        if changed {
            self.mark(field);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<&'static str> for DirtyFields {
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// JSON object sent as a PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Trims and maps blank text to `None`.
pub fn normalize_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct PatchBuilder<'a> {
    dirty: &'a DirtyFields,
    body: Map<String, Value>,
}

impl<'a> PatchBuilder<'a> {
    pub fn new(dirty: &'a DirtyFields) -> Self {
        Self { dirty, body: Map::new() }
    }

    pub fn text(
        mut self,
        field: &'static str,
        original: Option<&str>,
        current: Option<&str>,
        blank: Blank,
    ) -> Self {
        if !self.dirty.contains(field) {
            return self;
        }
        let before = normalize_text(original);
        let after = normalize_text(current);
        if before == after {
            return self;
        }
        match (after, blank) {
            (Some(text), _) => {
                self.body.insert(field.to_string(), Value::String(text.to_string()));
            }
            (None, Blank::Clear) => {
                self.body.insert(field.to_string(), Value::Null);
            }
            (None, Blank::Skip) => {}
        }
        self
    }

    pub fn value<T>(mut self, field: &'static str, original: &T, current: &T) -> Self
    where
        T: PartialEq + Serialize,
    {
        if !self.dirty.contains(field) || original == current {
            return self;
        }
        match serde_json::to_value(current) {
            Ok(value) => {
                self.body.insert(field.to_string(), value);
            }
            Err(err) => tracing::warn!(field, error = %err, "field not serializable, left out of patch"),
        }
        self
    }

    pub fn finish(self) -> Patch {
        Patch(self.body)
    }
}
