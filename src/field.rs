//! Field descriptors: one declared extraction rule each
//!
//! A [`Field`] pairs a CSS selector with an [`Extract`] strategy plus two
//! flags. `required` fails the parse when nothing is found, `as_list` keeps
//! every match instead of the first one.
//!
//! ```ignore
//! use html_schema::Field;
//!
//! let title = Field::text("title").required();
//! let stylesheets = Field::attr("[rel=stylesheet]", "href").as_list();
//! let description = Field::first_of([
//!     Field::content("[name=description]"),
//!     Field::content("[property='og:description']"),
//! ])
//! .required();
//! ```

use std::sync::Arc;

use tracing::trace;

use crate::{ElementRef, ExtractionError, Schema, SchemaError, Value};

/// How a matched node is turned into a value
#[derive(Debug, Clone)]
pub enum Extract {
    /// The node's text content, descendants included, whitespace untouched
    Text,
    /// No transform; currently yields the text content like [`Extract::Text`]
    Any,
    /// The `content` attribute when present, text content otherwise
    Content,
    /// The named attribute, absent when the node lacks it
    Attr(String),
    /// A nested schema resolved with the node as its root
    Schema(Arc<Schema>),
}

impl Extract {
    fn apply<E: ElementRef>(&self, node: &E, field: &str) -> Result<Value, ExtractionError> {
        match self {
            Extract::Text | Extract::Any => Ok(Value::Text(node.text())),
            Extract::Content => Ok(Value::Text(match node.attr("content") {
                Some(content) => content.to_string(),
                None => node.text(),
            })),
            Extract::Attr(name) => Ok(node.attr(name).map(str::to_string).into()),
            Extract::Schema(schema) => schema
                .extract(node)
                .map(Value::Record)
                .map_err(|error| error.within(field)),
        }
    }
}

#[derive(Debug, Clone)]
enum Rule {
    Select { selector: String, extract: Extract },
    FirstOf(Vec<Field>),
}

/// A single declared extraction rule
#[derive(Debug, Clone)]
pub struct Field {
    rule: Rule,
    required: bool,
    as_list: bool,
}

impl Field {
    /// Generic constructor for any extraction strategy
    pub fn new(selector: impl Into<String>, extract: Extract) -> Self {
        Self {
            rule: Rule::Select {
                selector: selector.into(),
                extract,
            },
            required: false,
            as_list: false,
        }
    }

    /// Text content of the first match
    pub fn text(selector: impl Into<String>) -> Self {
        Self::new(selector, Extract::Text)
    }

    /// Untransformed selector, see [`Extract::Any`]
    pub fn any(selector: impl Into<String>) -> Self {
        Self::new(selector, Extract::Any)
    }

    /// `content` attribute if present, else text; suited to `<meta>` tags
    pub fn content(selector: impl Into<String>) -> Self {
        Self::new(selector, Extract::Content)
    }

    /// Named attribute of the first match
    pub fn attr(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(selector, Extract::Attr(attribute.into()))
    }

    /// Nested record resolved under each match
    pub fn nested(selector: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(selector, Extract::Schema(schema.into()))
    }

    /// Try each alternative in order and keep the first non-empty value
    ///
    /// A required alternative that finds nothing just moves on to the next
    /// one. Only this field's own `required` flag fails the parse.
    pub fn first_of(alternatives: impl IntoIterator<Item = Field>) -> Self {
        Self {
            rule: Rule::FirstOf(alternatives.into_iter().collect()),
            required: false,
            as_list: false,
        }
    }

    /// Fail the parse when this field finds nothing
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Keep every match in document order
    ///
    /// A [`Field::first_of`] marked this way is rejected when the schema is
    /// built; each alternative carries its own cardinality.
    pub fn as_list(mut self) -> Self {
        self.as_list = true;
        self
    }

    pub(crate) fn with_flags(mut self, required: bool, as_list: bool) -> Self {
        self.required = required;
        self.as_list = as_list;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_list(&self) -> bool {
        self.as_list
    }

    /// The CSS selector, or `None` for a `first_of` field
    pub fn selector(&self) -> Option<&str> {
        match &self.rule {
            Rule::Select { selector, .. } => Some(selector),
            Rule::FirstOf(_) => None,
        }
    }

    pub fn extract(&self) -> Option<&Extract> {
        match &self.rule {
            Rule::Select { extract, .. } => Some(extract),
            Rule::FirstOf(_) => None,
        }
    }

    pub fn alternatives(&self) -> &[Field] {
        match &self.rule {
            Rule::Select { .. } => &[],
            Rule::FirstOf(alternatives) => alternatives,
        }
    }

    /// Selector text used in error messages
    fn describe(&self) -> String {
        match &self.rule {
            Rule::Select { selector, .. } => selector.clone(),
            Rule::FirstOf(alternatives) => alternatives
                .iter()
                .map(Field::describe)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), SchemaError> {
        match &self.rule {
            Rule::Select { selector, .. } => {
                if selector.trim().is_empty() {
                    return Err(SchemaError::EmptySelector {
                        field: name.to_string(),
                    });
                }
                scraper::Selector::parse(selector).map_err(|error| {
                    SchemaError::InvalidSelector {
                        field: name.to_string(),
                        selector: selector.clone(),
                        error: error.to_string(),
                    }
                })?;
                Ok(())
            }
            Rule::FirstOf(alternatives) => {
                if self.as_list {
                    return Err(SchemaError::ListFallback {
                        field: name.to_string(),
                    });
                }
                if alternatives.is_empty() {
                    return Err(SchemaError::NoAlternatives {
                        field: name.to_string(),
                    });
                }
                alternatives.iter().try_for_each(|alt| alt.validate(name))
            }
        }
    }

    /// Resolve this field under `root`
    ///
    /// `name` is the field's name in the declaring schema and is what a
    /// [`ExtractionError::MissingField`] reports.
    pub fn resolve<E: ElementRef>(&self, name: &str, root: &E) -> Result<Value, ExtractionError> {
        match &self.rule {
            Rule::Select { selector, extract } => self.select(name, root, selector, extract),
            Rule::FirstOf(alternatives) => self.first_match(name, root, alternatives),
        }
    }

    fn select<E: ElementRef>(
        &self,
        name: &str,
        root: &E,
        selector: &str,
        extract: &Extract,
    ) -> Result<Value, ExtractionError> {
        let nodes = root.select_all(selector)?;
        trace!(field = name, selector, matches = nodes.len(), "resolved selector");

        let Some(first) = nodes.first() else {
            if self.required {
                return Err(missing(name, selector.to_string()));
            }
            return Ok(if self.as_list {
                Value::List(Vec::new())
            } else {
                Value::Absent
            });
        };

        if self.as_list {
            return nodes
                .iter()
                .map(|node| extract.apply(node, name))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List);
        }

        let value = extract.apply(first, name)?;
        if self.required && value.is_absent() {
            // Matched node without the requested attribute
            let attribute = match extract {
                Extract::Attr(attribute) => attribute.as_str(),
                _ => "",
            };
            return Err(missing(name, format!("{selector}[{attribute}]")));
        }
        Ok(value)
    }

    fn first_match<E: ElementRef>(
        &self,
        name: &str,
        root: &E,
        alternatives: &[Field],
    ) -> Result<Value, ExtractionError> {
        for (index, alternative) in alternatives.iter().enumerate() {
            match alternative.resolve(name, root) {
                Ok(value) if !value.is_empty() => {
                    trace!(field = name, alternative = index, "fallback matched");
                    return Ok(value);
                }
                Ok(_) | Err(ExtractionError::MissingField { .. }) => continue,
                Err(error) => return Err(error),
            }
        }

        if self.required {
            return Err(missing(name, self.describe()));
        }
        Ok(Value::Absent)
    }
}

fn missing(name: &str, selector: String) -> ExtractionError {
    ExtractionError::MissingField {
        field: name.to_string(),
        path: name.to_string(),
        selector,
    }
}
