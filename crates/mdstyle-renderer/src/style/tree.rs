//! Element tree the style steps operate on.

use std::fmt::Write;

use crate::util::escape_html;

/// A node in the styled document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Element created by a style step.
    Element(Element),
    /// Rendered markdown HTML, opaque to style steps.
    Raw(String),
}

impl Node {
    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Raw(html) => out.push_str(html),
            Self::Element(element) => element.write_html(out),
        }
    }

    /// Depth-first search for the first element with `class`.
    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        match self {
            Self::Raw(_) => None,
            Self::Element(element) => element.find_class_mut(class),
        }
    }
}

/// An element with classes, inline style and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Class names in order.
    pub classes: Vec<String>,
    /// Inline style declarations in order.
    pub style: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an inline style declaration.
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set a declaration, keeping its position if already present.
    pub fn set_style(&mut self, property: &str, value: &str) {
        if let Some(entry) = self.style.iter_mut().find(|(p, _)| p == property) {
            value.clone_into(&mut entry.1);
        } else {
            self.style.push((property.to_owned(), value.to_owned()));
        }
    }

    /// Remove a declaration.
    pub fn remove_style(&mut self, property: &str) {
        self.style.retain(|(p, _)| p != property);
    }

    /// Value of a declaration.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the element has `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for the first element with `class`, including self.
    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_class_mut(class))
    }

    fn write_html(&self, out: &mut String) {
        write!(out, "<{}", self.tag).unwrap();
        if !self.classes.is_empty() {
            write!(out, r#" class="{}""#, escape_html(&self.classes.join(" "))).unwrap();
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(p, v)| format!("{p}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            write!(out, r#" style="{}""#, escape_html(&style)).unwrap();
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        write!(out, "</{}>", self.tag).unwrap();
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}
