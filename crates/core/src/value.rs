//! Form values and records.
//!
//! A patient record is a tree of [`FormValue`]s. Leaves are text or flags; branches are
//! lists and records held behind [`Arc`] so that an updated record shares every branch it
//! did not touch with the record it was derived from.
//!
//! Numbers entered in number inputs are kept as text, exactly as typed. When a script or
//! event supplies a bare number it is converted to its text form on the way in.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single value held in a patient record.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    /// Checkbox state.
    Flag(bool),
    /// Text input, text area, select, radio, date or number input contents.
    Text(String),
    /// Repeatable list items.
    List(Arc<Vec<FormValue>>),
    /// A section, a group inside a section, or a list item with fixed fields.
    Record(Arc<Record>),
}

impl FormValue {
    /// Empty text, the default for every text leaf.
    pub fn empty_text() -> Self {
        FormValue::Text(String::new())
    }

    /// Empty list, the default for every repeatable list.
    pub fn empty_list() -> Self {
        FormValue::List(Arc::new(Vec::new()))
    }

    /// Name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FormValue::Flag(_) => "flag",
            FormValue::Text(_) => "text",
            FormValue::List(_) => "list",
            FormValue::Record(_) => "record",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FormValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Arc<Vec<FormValue>>> {
        match self {
            FormValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Arc<Record>> {
        match self {
            FormValue::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Whether a checkbox bound to this value renders as checked.
    ///
    /// Flags are their own value, text is checked when non-empty and lists/records are
    /// always checked.
    pub fn is_truthy(&self) -> bool {
        match self {
            FormValue::Flag(b) => *b,
            FormValue::Text(s) => !s.is_empty(),
            FormValue::List(_) | FormValue::Record(_) => true,
        }
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Flag(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<Vec<FormValue>> for FormValue {
    fn from(value: Vec<FormValue>) -> Self {
        FormValue::List(Arc::new(value))
    }
}

impl From<Record> for FormValue {
    fn from(value: Record) -> Self {
        FormValue::Record(Arc::new(value))
    }
}

impl Serialize for FormValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FormValue::Flag(b) => serializer.serialize_bool(*b),
            FormValue::Text(s) => serializer.serialize_str(s),
            FormValue::List(items) => items.as_ref().serialize(serializer),
            FormValue::Record(record) => record.as_ref().serialize(serializer),
        }
    }
}

struct FormValueVisitor;

impl<'de> Visitor<'de> for FormValueVisitor {
    type Value = FormValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a flag, text, number, list or record")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FormValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FormValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FormValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FormValue::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FormValue::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FormValue::Text(v))
    }

    // A null from a JSON widget means "cleared".
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FormValue::empty_text())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FormValue::empty_text())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<FormValue>()? {
            items.push(item);
        }
        Ok(FormValue::List(Arc::new(items)))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, FormValue>()? {
            fields.insert(key, value);
        }
        Ok(FormValue::Record(Arc::new(Record { fields })))
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FormValueVisitor)
    }
}

/// A string-keyed collection of form values.
///
/// Records are treated as immutable once shared: [`Record::with`] and [`Record::merged`]
/// return new records and leave `self` alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FormValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text at `key`, or `""` when absent or not text.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(FormValue::as_text).unwrap_or("")
    }

    /// Flag at `key`, or `false` when absent or not a flag.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(FormValue::as_flag).unwrap_or(false)
    }

    pub fn record(&self, key: &str) -> Option<&Arc<Record>> {
        self.get(key).and_then(FormValue::as_record)
    }

    pub fn list(&self, key: &str) -> Option<&Arc<Vec<FormValue>>> {
        self.get(key).and_then(FormValue::as_list)
    }

    /// Insert in place. Only used while building a record that has not been shared yet.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Copy of this record with `key` set to `value`.
    ///
    /// The copy is shallow: every other value is cloned, which for lists and records only
    /// bumps a reference count.
    pub fn with(&self, key: impl Into<String>, value: impl Into<FormValue>) -> Record {
        let mut next = self.clone();
        next.insert(key, value);
        next
    }

    /// Copy of this record with every field of `patch` laid over it.
    pub fn merged(&self, patch: &Record) -> Record {
        let mut next = self.clone();
        for (key, value) in patch.iter() {
            next.insert(key, value.clone());
        }
        next
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
