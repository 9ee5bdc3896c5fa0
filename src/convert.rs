//! Conversion of extracted text into Rust types
//!
//! Records hold text; [`Record::get_as`](crate::Record::get_as) uses
//! [`FromHtml`] to turn a field into a number, flag or owned string.

use crate::ParseError;

/// Trait for types that can be parsed from extracted HTML text
///
/// # Implementing FromHtml
///
/// ```ignore
/// use html_schema::{FromHtml, ParseError};
///
/// struct Price(f64);
///
/// impl FromHtml for Price {
///     fn from_text(text: &str) -> Result<Self, ParseError> {
///         f64::from_text(text.trim_start_matches('$')).map(Price)
///     }
/// }
/// ```
pub trait FromHtml: Sized {
    fn from_text(text: &str) -> Result<Self, ParseError>;
}

// Strings are trimmed; the raw text stays available on the record itself
impl FromHtml for String {
    fn from_text(text: &str) -> Result<Self, ParseError> {
        Ok(text.trim().to_string())
    }
}

macro_rules! impl_from_html_int {
    ($($ty:ty),*) => {
        $(
            impl FromHtml for $ty {
                fn from_text(text: &str) -> Result<Self, ParseError> {
                    text.trim()
                        .parse()
                        .map_err(|error| ParseError::InvalidNumber {
                            text: text.to_string(),
                            error,
                        })
                }
            }
        )*
    };
}

macro_rules! impl_from_html_float {
    ($($ty:ty),*) => {
        $(
            impl FromHtml for $ty {
                fn from_text(text: &str) -> Result<Self, ParseError> {
                    text.trim()
                        .parse()
                        .map_err(|error| ParseError::InvalidFloat {
                            text: text.to_string(),
                            error,
                        })
                }
            }
        )*
    };
}

impl_from_html_int!(i32, u32, i64, u64, usize);
impl_from_html_float!(f32, f64);

impl FromHtml for bool {
    fn from_text(text: &str) -> Result<Self, ParseError> {
        match text.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => Err(ParseError::InvalidBool {
                text: text.to_string(),
            }),
        }
    }
}

// Blank text is None; anything else must parse
impl<T: FromHtml> FromHtml for Option<T> {
    fn from_text(text: &str) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        T::from_text(text).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(i64::from_text(" -12\n").unwrap(), -12);
        assert_eq!(f64::from_text("19.99 ").unwrap(), 19.99);
    }

    #[test]
    fn bad_number_keeps_original_text() {
        match u32::from_text("twelve") {
            Err(ParseError::InvalidNumber { text, .. }) => assert_eq!(text, "twelve"),
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn booleans() {
        assert!(bool::from_text("Yes").unwrap());
        assert!(!bool::from_text("").unwrap());
        assert!(bool::from_text("maybe").is_err());
    }

    #[test]
    fn option_blank_is_none_but_garbage_errors() {
        assert_eq!(Option::<i32>::from_text("  ").unwrap(), None);
        assert_eq!(Option::<i32>::from_text("3").unwrap(), Some(3));
        assert!(Option::<i32>::from_text("x").is_err());
    }
}
