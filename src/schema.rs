//! Schema definitions and the engine that applies them to documents

use std::{collections::HashSet, sync::Arc};

use scraper::Html;
use tracing::debug;

use crate::{ElementRef, ExtractionError, Field, Record, SchemaError};

/// A named, ordered set of field declarations
///
/// Built once with [`Schema::builder`] and immutable afterwards, so a single
/// schema can be shared (for example behind an `Arc`) by any number of
/// concurrent parses.
///
/// # Examples
///
/// ```ignore
/// use html_schema::{Field, Schema};
///
/// let schema = Schema::builder("Page")
///     .field("title", Field::text("title").required())
///     .field("stylesheets", Field::attr("[rel=stylesheet]", "href").as_list())
///     .build()?;
///
/// let record = schema.parse(html)?;
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: Arc<str>,
    fields: Vec<(String, Field)>,
}

impl Schema {
    /// Start declaring a schema called `name`
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, field)| field)
    }

    /// Parse raw markup and extract a record from the whole document
    ///
    /// Fails with [`ExtractionError::MissingField`] on the first required
    /// field (in declaration order) that finds nothing. No partial record is
    /// returned.
    pub fn parse(&self, html: &str) -> Result<Record, ExtractionError> {
        debug!(schema = %self.name, bytes = html.len(), "parsing document");
        let document = Html::parse_document(html);
        self.extract(&&document)
    }

    /// Extract a record treating `root` as the document
    ///
    /// With an element root only its descendants are queried; pass
    /// `&&scraper::Html` to let the `<html>` element match as well.
    pub fn extract<E: ElementRef>(&self, root: &E) -> Result<Record, ExtractionError> {
        let mut values = Vec::with_capacity(self.fields.len());
        for (name, field) in &self.fields {
            let value = field.resolve(name, root)?;
            values.push((name.clone(), value));
        }
        debug!(schema = %self.name, fields = values.len(), "extracted record");
        Ok(Record::new(Arc::clone(&self.name), values))
    }

    /// Extract one record per node matching `selector`, in document order
    pub fn extract_all<E: ElementRef>(
        &self,
        root: &E,
        selector: &str,
    ) -> Result<Vec<Record>, ExtractionError> {
        root.select_all(selector)?
            .iter()
            .map(|node| self.extract(node))
            .collect()
    }

    /// Parse raw markup and extract one record per node matching `selector`
    pub fn parse_all(&self, html: &str, selector: &str) -> Result<Vec<Record>, ExtractionError> {
        let document = Html::parse_document(html);
        self.extract_all(&&document, selector)
    }
}

/// Builder that collects field declarations in order
///
/// Validation happens in [`SchemaBuilder::build`]: the name must be
/// non-empty, field names unique and every selector valid CSS.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, Field)>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare the next field
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let mut seen = HashSet::new();
        for (name, field) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field: name.clone(),
                });
            }
            field.validate(name)?;
        }

        Ok(Schema {
            name: Arc::from(self.name),
            fields: self.fields,
        })
    }
}
