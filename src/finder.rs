use std::fmt;

use regex::Regex;
use select::document::Document;
use select::node::Node;

/// A page does not have the shape an extractor relies on.
#[derive(Debug, thiserror::Error)]
pub enum StructuralParseError {
    #[error("Tag not found: {0}")]
    TagNotFound(String),
    #[error("Attribute `{attr}` missing on <{tag}>")]
    AttrMissing { tag: String, attr: String },
}

#[derive(Debug, Clone)]
enum AttrValue<'q> {
    Exact(&'q str),
    Pattern(&'q Regex),
}

/// Tag name plus attribute filters, all of which must hold.
#[derive(Debug, Clone)]
pub struct TagQuery<'q> {
    name: &'q str,
    attrs: Vec<(&'q str, AttrValue<'q>)>,
}

impl<'q> TagQuery<'q> {
    pub fn new(name: &'q str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Exact match, except for `class` which matches any of the node's classes.
    pub fn attr(mut self, key: &'q str, value: &'q str) -> Self {
        self.attrs.push((key, AttrValue::Exact(value)));
        self
    }

    /// Regex search against the attribute value.
    pub fn attr_matching(mut self, key: &'q str, pattern: &'q Regex) -> Self {
        self.attrs.push((key, AttrValue::Pattern(pattern)));
        self
    }

    pub fn matches(&self, node: &Node) -> bool {
        if node.name() != Some(self.name) {
            return false;
        }
        self.attrs.iter().all(|(key, expected)| {
            let actual = match node.attr(key) {
                Some(actual) => actual,
                None => return false,
            };
            match expected {
                AttrValue::Exact(value) if *key == "class" => {
                    actual.split_whitespace().any(|class| class == *value)
                }
                AttrValue::Exact(value) => actual == *value,
                AttrValue::Pattern(re) => re.is_match(actual),
            }
        })
    }
}

impl fmt::Display for TagQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            match value {
                AttrValue::Exact(value) => write!(f, " {key}=\"{value}\"")?,
                AttrValue::Pattern(re) => write!(f, " {key}~=/{}/", re.as_str())?,
            }
        }
        write!(f, ">")
    }
}

/// Where a search starts. A [`Node`] searches its descendants only, a
/// [`Document`] searches every node it holds.
pub trait SearchRoot<'a> {
    fn matching(&self, query: &TagQuery) -> Vec<Node<'a>>;

    fn first_matching(&self, query: &TagQuery) -> Option<Node<'a>> {
        self.matching(query).into_iter().next()
    }
}

impl<'a> SearchRoot<'a> for &'a Document {
    fn matching(&self, query: &TagQuery) -> Vec<Node<'a>> {
        let document: &'a Document = *self;
        document.find(|node: &Node| query.matches(node)).collect()
    }

    fn first_matching(&self, query: &TagQuery) -> Option<Node<'a>> {
        let document: &'a Document = *self;
        document.find(|node: &Node| query.matches(node)).next()
    }
}

impl<'a> SearchRoot<'a> for Node<'a> {
    fn matching(&self, query: &TagQuery) -> Vec<Node<'a>> {
        self.find(|node: &Node| query.matches(node)).collect()
    }

    fn first_matching(&self, query: &TagQuery) -> Option<Node<'a>> {
        self.find(|node: &Node| query.matches(node)).next()
    }
}

/// Optional lookup for parts a page may legitimately lack, such as a list
/// entry without a link. The caller decides what `None` means.
pub fn try_find<'a, R: SearchRoot<'a>>(root: R, query: &TagQuery) -> Option<Node<'a>> {
    root.first_matching(query)
}

/// Required lookup: a missing tag means the page layout changed.
pub fn must_find<'a, R: SearchRoot<'a>>(
    root: R,
    query: &TagQuery,
) -> Result<Node<'a>, StructuralParseError> {
    root.first_matching(query)
        .ok_or_else(|| StructuralParseError::TagNotFound(query.to_string()))
}

pub fn find_all<'a, R: SearchRoot<'a>>(root: R, query: &TagQuery) -> Vec<Node<'a>> {
    root.matching(query)
}

pub fn must_attr<'a>(node: Node<'a>, attr: &str) -> Result<&'a str, StructuralParseError> {
    node.attr(attr).ok_or_else(|| StructuralParseError::AttrMissing {
        tag: node.name().unwrap_or_default().to_string(),
        attr: attr.to_string(),
    })
}
