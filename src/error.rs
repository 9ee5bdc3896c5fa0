//! Error types for schema construction and HTML extraction
//!
//! Extraction failures carry the field path and the selector that was
//! evaluated so a failing schema can be debugged without re-running it.

/// Errors that can occur while applying a schema to a document
///
/// # Examples
///
/// ```ignore
/// use html_schema::ExtractionError;
///
/// match schema.parse(html) {
///     Ok(record) => println!("{record}"),
///     Err(ExtractionError::MissingField { path, selector, .. }) => {
///         eprintln!("'{path}' matched nothing for '{selector}'");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    /// A required field resolved to no value
    ///
    /// `field` is the name declared on the innermost schema, `path` joins the
    /// field names from the outermost schema down with `.`.
    #[error("Required field '{path}' not found using selector '{selector}'")]
    MissingField {
        field: String,
        path: String,
        selector: String,
    },

    /// The HTML backend rejected a CSS selector
    #[error("Failed to parse selector '{selector}': {error}")]
    InvalidSelector { selector: String, error: String },

    /// A resolved value could not be converted to the requested type
    #[error("Failed to convert field '{field}' from text '{text}': {error}")]
    Conversion {
        field: String,
        text: String,
        error: ParseError,
    },
}

impl ExtractionError {
    /// Prefix the path of a nested failure with the enclosing field name
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            ExtractionError::MissingField {
                field,
                path,
                selector,
            } => ExtractionError::MissingField {
                field,
                path: format!("{parent}.{path}"),
                selector,
            },
            other => other,
        }
    }
}

/// Errors raised while building a [`Schema`](crate::Schema)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Schema name must not be blank
    #[error("Schema name must not be empty")]
    EmptyName,

    /// Two fields were registered under the same name
    #[error("Schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },

    /// A field was declared with a blank selector
    #[error("Field '{field}' has an empty selector")]
    EmptySelector { field: String },

    /// A field's selector is not valid CSS
    #[error("Field '{field}' has invalid selector '{selector}': {error}")]
    InvalidSelector {
        field: String,
        selector: String,
        error: String,
    },

    /// A `first_of` field was declared without alternatives
    #[error("Field '{field}' has no alternatives to try")]
    NoAlternatives { field: String },

    /// A `first_of` field was marked `as_list`; cardinality belongs on its
    /// alternatives
    #[error("Field '{field}' is a fallback and cannot be a list; mark its alternatives instead")]
    ListFallback { field: String },

    /// A field definition in configuration is incomplete
    #[error("Field '{field}' of kind '{kind}' requires '{option}'")]
    MissingOption {
        field: String,
        kind: String,
        option: &'static str,
    },

    /// Schema configuration could not be deserialized
    #[error("Invalid schema configuration: {0}")]
    Config(String),
}

/// Errors that can occur when converting extracted text into Rust types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse an integer
    #[error("Invalid number: {text}")]
    InvalidNumber {
        text: String,
        #[source]
        error: std::num::ParseIntError,
    },

    /// Failed to parse a floating point number
    #[error("Invalid float: {text}")]
    InvalidFloat {
        text: String,
        #[source]
        error: std::num::ParseFloatError,
    },

    /// Failed to parse a boolean value
    ///
    /// Accepted spellings are "true", "1", "yes", "on" and "false", "0",
    /// "no", "off", "" (case-insensitive).
    #[error("Invalid boolean: {text}")]
    InvalidBool { text: String },

    /// The value is a list or nested record rather than text
    #[error("Expected text, found {found}")]
    NotText { found: &'static str },
}
