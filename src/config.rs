//! Declaring schemas from configuration data
//!
//! A [`SchemaConfig`] is the serde-friendly mirror of [`SchemaBuilder`]
//! calls, so schemas can live in JSON files next to the code that uses them:
//!
//! ```json
//! {
//!   "name": "Page",
//!   "fields": [
//!     { "name": "title", "selector": "title", "required": true },
//!     { "name": "stylesheets", "kind": "attr", "selector": "[rel=stylesheet]",
//!       "attribute": "href", "as_list": true }
//!   ]
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Field, Schema, SchemaBuilder, SchemaError};

/// Serializable schema declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Extraction strategy named in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Any,
    Content,
    Attr,
    Nested,
    FirstOf,
}

impl FieldKind {
    fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Any => "any",
            FieldKind::Content => "content",
            FieldKind::Attr => "attr",
            FieldKind::Nested => "nested",
            FieldKind::FirstOf => "first_of",
        }
    }
}

/// Serializable field declaration
///
/// Alternatives of a `first_of` field are field declarations too; their
/// `name` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub as_list: bool,
    /// Attribute name for `attr` fields
    #[serde(default)]
    pub attribute: Option<String>,
    /// Inline schema for `nested` fields
    #[serde(default)]
    pub schema: Option<SchemaConfig>,
    /// Ordered fallbacks for `first_of` fields
    #[serde(default)]
    pub alternatives: Vec<FieldConfig>,
}

impl FieldConfig {
    fn into_field(self, owner: &str) -> Result<Field, SchemaError> {
        let missing = |option| SchemaError::MissingOption {
            field: owner.to_string(),
            kind: self.kind.as_str().to_string(),
            option,
        };

        let field = match self.kind {
            FieldKind::Text => Field::text(self.selector.clone()),
            FieldKind::Any => Field::any(self.selector.clone()),
            FieldKind::Content => Field::content(self.selector.clone()),
            FieldKind::Attr => {
                let attribute = self.attribute.clone().ok_or_else(|| missing("attribute"))?;
                Field::attr(self.selector.clone(), attribute)
            }
            FieldKind::Nested => {
                let schema = self.schema.clone().ok_or_else(|| missing("schema"))?;
                Field::nested(self.selector.clone(), Arc::new(Schema::from_config(schema)?))
            }
            FieldKind::FirstOf => Field::first_of(
                self.alternatives
                    .iter()
                    .cloned()
                    .map(|alt| alt.into_field(owner))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };
        Ok(field.with_flags(self.required, self.as_list))
    }
}

impl TryFrom<SchemaConfig> for Schema {
    type Error = SchemaError;

    fn try_from(config: SchemaConfig) -> Result<Self, Self::Error> {
        let mut builder = SchemaBuilder::new(config.name);
        for field in config.fields {
            let name = field.name.clone();
            let declared = field.into_field(&name)?;
            builder = builder.field(name, declared);
        }
        builder.build()
    }
}

impl Schema {
    /// Build a schema from a deserialized declaration
    pub fn from_config(config: SchemaConfig) -> Result<Self, SchemaError> {
        Self::try_from(config)
    }

    /// Build a schema from a JSON declaration
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let config: SchemaConfig =
            serde_json::from_str(json).map_err(|error| SchemaError::Config(error.to_string()))?;
        Self::from_config(config)
    }
}
