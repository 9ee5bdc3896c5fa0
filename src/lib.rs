//! Declarative extraction of structured records from HTML
//!
//! Declare a [`Schema`] as an ordered list of named [`Field`]s, each a CSS
//! selector plus an extraction strategy, then [`Schema::parse`] a document
//! into a [`Record`].
//!
//! ```ignore
//! use html_schema::{Field, Schema};
//!
//! let schema = Schema::builder("Page")
//!     .field("title", Field::text("title").required())
//!     .field("stylesheets", Field::attr("[rel=stylesheet]", "href").as_list())
//!     .build()?;
//!
//! let record = schema.parse(html)?;
//! assert_eq!(record["title"].as_str(), Some("My page title"));
//! ```

// Core modules
mod backend;
mod config;
mod convert;
mod error;
mod field;
mod record;
mod schema;
mod value;

// Public exports
pub use backend::ElementRef;
pub use config::{FieldConfig, FieldKind, SchemaConfig};
pub use convert::FromHtml;
pub use error::{ExtractionError, ParseError, SchemaError};
pub use field::{Extract, Field};
pub use record::Record;
pub use schema::{Schema, SchemaBuilder};
pub use value::Value;
