//! A small element tree used to build pages and the fragments inside them.
//!
//! Every piece of text and every attribute value is escaped when the tree is
//! serialised, so data pulled out of the JSON files never reaches the page as
//! markup. URLs are attribute values like any other: they are quoted and
//! escaped, but their scheme is not checked.

use std::fmt::Write as _;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Builds an element from a tag, an attribute list and children.
///
/// `class` sets the class attribute and `text` adds a text child ahead of
/// `children`. Pairs with an empty key are skipped.
pub fn el(tag: &str, attrs: &[(&str, &str)], children: Vec<Node>) -> Element {
    let mut element = Element::new(tag);
    for (key, value) in attrs {
        match *key {
            "" => continue,
            "text" => element.children.push(Node::text(*value)),
            _ => element.set_attr(key, value),
        }
    }
    element.children.extend(children);
    element
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attrs.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        self.attrs.retain(|(name, _)| name != key);
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Drops every existing child before inserting `children`.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn set_text(&mut self, value: &str) {
        self.children = vec![Node::text(value)];
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements carrying `class`, in document order.
    pub fn find_all_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_by_class(self, class, &mut found);
        found
    }

    /// Current value of a `<select>`: the selected option, else the first one.
    pub fn select_value(&self) -> Option<&str> {
        let options: Vec<&Element> = self.child_elements().filter(|c| c.tag == "option").collect();
        options
            .iter()
            .copied()
            .find(|option| option.attr("selected").is_some())
            .or_else(|| options.first().copied())
            .and_then(|option| option.attr("value"))
    }

    pub fn set_select_value(&mut self, value: &str) {
        for child in self.children.iter_mut() {
            if let Node::Element(option) = child {
                if option.tag != "option" {
                    continue;
                }
                if option.attr("value") == Some(value) {
                    option.set_attr("selected", "selected");
                } else {
                    option.remove_attr("selected");
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => collect_text(inner, out),
        }
    }
}

fn collect_by_class<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.has_class(class) {
            found.push(child);
        }
        collect_by_class(child, class, found);
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (key, value) in &element.attrs {
        let _ = write!(out, " {key}=\"{}\"", escape_html(value));
    }
    out.push('>');
    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(inner) => write_element(inner, out),
        }
    }
    let _ = write!(out, "</{}>", element.tag);
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A host page: a title, stylesheet links and a body tree with id anchors.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub lang: String,
    pub stylesheets: Vec<String>,
    pub body: Element,
}

impl Document {
    pub fn new(title: impl Into<String>, body: Element) -> Self {
        Self {
            title: title.into(),
            lang: "ja".to_string(),
            stylesheets: Vec::new(),
            body,
        }
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.body.find_by_id(id).is_some()
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        let _ = write!(out, "<html lang=\"{}\">\n<head>\n", escape_html(&self.lang));
        out.push_str("  <meta charset=\"UTF-8\" />\n");
        out.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
        );
        let _ = writeln!(out, "  <title>{}</title>", escape_html(&self.title));
        for href in &self.stylesheets {
            let _ = writeln!(out, "  <link rel=\"stylesheet\" href=\"{}\" />", escape_html(href));
        }
        out.push_str("</head>\n");
        write_element(&self.body, &mut out);
        out.push_str("\n</html>\n");
        out
    }
}
