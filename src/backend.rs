//! HTML backend abstraction for the node queries a schema needs

use crate::ExtractionError;

/// Trait representing an HTML node that can be queried with CSS selectors
///
/// Schemas only ever read through this trait, so any parser that can list
/// matches in document order and expose text and attributes can back them.
pub trait ElementRef {
    /// Node type returned by queries
    type Match: ElementRef;

    /// Select every node under this one matching the CSS selector, in
    /// document order
    ///
    /// Returns an empty vector when nothing matches. Only a selector the
    /// backend cannot parse is an error.
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Match>, ExtractionError>;

    /// Get the text content of this node, including all descendant text
    fn text(&self) -> String;

    /// Get the value of an HTML attribute
    ///
    /// Returns `None` if the attribute doesn't exist.
    fn attr(&self, name: &str) -> Option<&str>;
}

fn parse_selector(selector: &str) -> Result<scraper::Selector, ExtractionError> {
    scraper::Selector::parse(selector).map_err(|error| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        error: error.to_string(),
    })
}

/// Implementation of ElementRef for scraper::ElementRef
///
/// Queries see descendants only, never the element itself.
impl<'a> ElementRef for scraper::ElementRef<'a> {
    type Match = Self;

    fn select_all(&self, selector: &str) -> Result<Vec<Self>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        Ok(self.select(&parsed).collect())
    }

    fn text(&self) -> String {
        scraper::ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}

/// A whole parsed document as a query root
///
/// Unlike an element root, the `<html>` element itself can match, so
/// `html[lang]` and `:root` resolve.
impl<'a> ElementRef for &'a scraper::Html {
    type Match = scraper::ElementRef<'a>;

    fn select_all(&self, selector: &str) -> Result<Vec<Self::Match>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let document: &'a scraper::Html = *self;
        let root = document.root_element();
        let mut matches = Vec::new();
        if parsed.matches(&root) {
            matches.push(root);
        }
        matches.extend(root.select(&parsed));
        Ok(matches)
    }

    fn text(&self) -> String {
        scraper::ElementRef::text(&self.root_element()).collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.root_element().value().attr(name)
    }
}
