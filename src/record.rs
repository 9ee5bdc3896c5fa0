//! Records produced by applying a schema to a document

use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{ExtractionError, FromHtml, ParseError, Value};

/// The structured result of [`Schema::parse`](crate::Schema::parse)
///
/// Holds one entry per declared field, in declaration order. Two records are
/// equal when they come from the same schema name and every field value
/// matches.
///
/// # Examples
///
/// ```ignore
/// let record = schema.parse(html)?;
/// assert_eq!(record.get("title").and_then(Value::as_str), Some("My page title"));
/// println!("{record}"); // Page(title="My page title", stylesheets=["/a.css"])
/// ```
///
/// # Panics
///
/// Indexing with `record["name"]` panics when the schema never declared
/// `name`, like `HashMap` indexing does. Use [`Record::get`] when
/// the name may be undeclared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: Arc<str>,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub(crate) fn new(schema: Arc<str>, fields: Vec<(String, Value)>) -> Self {
        Self { schema, fields }
    }

    /// Name of the schema that produced this record
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Look up a field by name
    ///
    /// Returns `None` only for names the schema never declared; declared
    /// fields that matched nothing are `Some(Value::Absent)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Convert a text field into `T`
    ///
    /// Absent and undeclared fields convert from the empty string, so
    /// `Option<T>` yields `None` for them.
    pub fn get_as<T: FromHtml>(&self, name: &str) -> Result<T, ExtractionError> {
        let text = match self.get(name) {
            None | Some(Value::Absent) => "",
            Some(Value::Text(text)) => text.as_str(),
            Some(other) => {
                return Err(ExtractionError::Conversion {
                    field: name.to_string(),
                    text: other.to_string(),
                    error: ParseError::NotText {
                        found: other.kind(),
                    },
                });
            }
        };
        T::from_text(text).map_err(|error| ExtractionError::Conversion {
            field: name.to_string(),
            text: text.to_string(),
            error,
        })
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON object keyed by field name
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(name, value)| (name.to_string(), value_to_json(value)))
            .collect();
        serde_json::Value::Object(map)
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Absent => serde_json::Value::Null,
        Value::Text(text) => serde_json::Value::String(text.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Record(record) => record.to_json(),
    }
}

impl std::ops::Index<&str> for Record {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(value) => value,
            None => panic!("schema '{}' has no field '{name}'", self.schema),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
