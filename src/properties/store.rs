use crate::foundation::error::{FrameError, FrameResult};
use crate::properties::value::Value;
use serde::ser::SerializeMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Insertion-ordered mapping of property names to typed values.
///
/// Lookups go through a name index; iteration follows insertion order. Overwriting an existing key
/// keeps its original slot.
#[derive(Clone, Debug, Default)]
pub struct Properties {
    index_by_name: HashMap<String, usize>,
    entries: Vec<(String, Value)>,
}

impl Properties {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `true` when `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.index_by_name.contains_key(name)
    }

    /// Set `name` to `value`, replacing (and dropping) any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.index_by_name.get(name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index_by_name.insert(name.to_owned(), self.entries.len());
                self.entries.push((name.to_owned(), value));
            }
        }
    }

    /// Borrow the raw value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index_by_name.get(name).map(|&i| &self.entries[i].1)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let i = self.index_by_name.remove(name)?;
        let (_, value) = self.entries.remove(i);
        for slot in self.index_by_name.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Store an integer.
    pub fn set_int(&mut self, name: &str, value: i64) {
        self.set(name, Value::Int(value));
    }

    /// Integer view of `name`; `0` when missing or not convertible.
    pub fn get_int(&self, name: &str) -> i64 {
        self.get(name).and_then(Value::as_int).unwrap_or(0)
    }

    /// Store a double.
    pub fn set_double(&mut self, name: &str, value: f64) {
        self.set(name, Value::Double(value));
    }

    /// Floating-point view of `name`; `0.0` when missing or not convertible.
    pub fn get_double(&self, name: &str) -> f64 {
        self.get(name).and_then(Value::as_double).unwrap_or(0.0)
    }

    /// Store a string.
    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, Value::String(value.into()));
    }

    /// String view of `name`, if present and scalar.
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(Value::as_string)
    }

    /// Store shared opaque data.
    pub fn set_data<T: Any + Send + Sync>(&mut self, name: &str, data: Arc<T>) {
        self.set(name, Value::Data(data));
    }

    /// Fetch shared data stored under `name` as `T`.
    ///
    /// Returns `Ok(None)` when the key is missing and an error when it holds something else.
    pub fn get_data<T: Any + Send + Sync>(&self, name: &str) -> FrameResult<Option<Arc<T>>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Data(data)) => Arc::clone(data).downcast::<T>().map(Some).map_err(|_| {
                FrameError::invalid_state(format!(
                    "property '{name}' holds data of a different type than {}",
                    std::any::type_name::<T>()
                ))
            }),
            Some(other) => Err(FrameError::invalid_state(format!(
                "property '{name}' holds a scalar ({other:?}), not data"
            ))),
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate entries whose names start with `prefix`, with the prefix stripped.
    pub fn iter_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.iter()
            .filter_map(move |(k, v)| k.strip_prefix(prefix).map(|rest| (rest, v)))
    }

    /// Scalar entries as a JSON object; data entries are skipped.
    pub fn to_json(&self) -> FrameResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| FrameError::serde(e.to_string()))
    }
}

impl serde::Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let scalars = self.entries.iter().filter(|(_, v)| !v.is_data());
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in scalars {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/properties/store.rs"]
mod tests;
