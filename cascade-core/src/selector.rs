//! Selector paths.
//!
//! A selector names the document fragment(s) a resource configuration
//! targets. It is either a single element name, the `*` wildcard, one of the
//! special document markers, or a contextual path of ancestor steps
//! (`order/item` or `order item`).

use crate::error::ConfigError;
use std::fmt;

/// Selector targeting every fragment.
pub const WILDCARD_SELECTOR: &str = "*";
/// Selector targeting the document as a whole.
pub const DOCUMENT_FRAGMENT_SELECTOR: &str = "#document";
/// Selector for resources not bound to any fragment.
pub const DOCUMENT_VOID_SELECTOR: &str = "$void";
/// Prefix marking a selector that targets an XML definition.
pub const XML_DEF_PREFIX: &str = "xmldef:";

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPath {
    selector: String,
    steps: Vec<String>,
    namespace_uri: Option<String>,
    xml_def: bool,
}

impl SelectorPath {
    /// Parse a selector string.
    pub fn parse(selector: &str) -> Result<Self, ConfigError> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidSelector {
                selector: selector.to_owned(),
                reason: "null or empty selector",
            });
        }
        if trimmed
            .match_indices(DOCUMENT_FRAGMENT_SELECTOR)
            .any(|(i, _)| i > 0)
        {
            return Err(ConfigError::InvalidSelector {
                selector: selector.to_owned(),
                reason: "'#document' token can only exist at the start of the selector",
            });
        }

        let xml_def = trimmed.starts_with(XML_DEF_PREFIX);
        let steps: Vec<String> = if xml_def {
            vec![trimmed.to_owned()]
        } else {
            trimmed
                .split(|c: char| c == '/' || c.is_whitespace())
                .filter(|step| !step.is_empty())
                .map(str::to_owned)
                .collect()
        };
        if steps.is_empty() {
            return Err(ConfigError::InvalidSelector {
                selector: selector.to_owned(),
                reason: "selector has no steps",
            });
        }

        Ok(Self {
            selector: trimmed.to_owned(),
            steps,
            namespace_uri: None,
            xml_def,
        })
    }

    /// Qualify the selector with a namespace URI. Blank URIs clear it.
    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        let uri = namespace_uri.into();
        self.namespace_uri = if uri.trim().is_empty() { None } else { Some(uri) };
        self
    }

    /// The selector as written (trimmed).
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The ancestor-chain steps, outermost first.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a parsed selector has at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The element the selector finally targets (its last step).
    pub fn target_element(&self) -> &str {
        self.steps.last().map_or(&self.selector, String::as_str)
    }

    /// The namespace URI qualifying the selector, if any.
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Is this the `*` selector.
    pub fn is_wildcard(&self) -> bool {
        self.selector == WILDCARD_SELECTOR
    }

    /// Does the selector have more than one step.
    pub fn is_contextual(&self) -> bool {
        self.steps.len() > 1
    }

    /// Is this an `xmldef:` selector.
    pub fn is_xml_def(&self) -> bool {
        self.xml_def
    }

    /// Does the selector target the whole document.
    pub fn is_document(&self) -> bool {
        self.selector == DOCUMENT_FRAGMENT_SELECTOR
    }

    /// Is this the void selector.
    pub fn is_void(&self) -> bool {
        self.selector == DOCUMENT_VOID_SELECTOR
    }

    /// Does the selector target fragments named `element`.
    ///
    /// `*` targets everything; the document marker targets only the document.
    pub fn targets(&self, element: &str) -> bool {
        let target = self.target_element();
        target == WILDCARD_SELECTOR || target.eq_ignore_ascii_case(element.trim())
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)
    }
}
