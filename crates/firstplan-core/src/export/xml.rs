//! A small XML element builder used by the TCX exporter.

/// Indentation per nesting level.
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(XmlElement),
    Text(String),
}

/// An XML element with attributes and child nodes.
///
/// Elements whose only content is text render on a single line; elements
/// without content render self-closed.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for an element holding only `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(Node::Element(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with `depth` levels of leading indentation and a trailing
    /// newline.
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, depth);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        out.push_str(&format!("{pad}<{}", self.name));
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {key}=\"{}\"", escape(value)));
        }

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        let text_only = self.children.iter().all(|c| matches!(c, Node::Text(_)));
        if text_only {
            out.push('>');
            for child in &self.children {
                if let Node::Text(text) = child {
                    out.push_str(&escape(text));
                }
            }
            out.push_str(&format!("</{}>\n", self.name));
            return;
        }

        out.push_str(">\n");
        let inner = INDENT.repeat(depth + 1);
        for child in &self.children {
            match child {
                Node::Element(element) => element.render_into(out, depth + 1),
                Node::Text(text) => {
                    out.push_str(&format!("{inner}{}\n", escape(text)));
                }
            }
        }
        out.push_str(&format!("{pad}</{}>\n", self.name));
    }
}

/// Escape the five XML special characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
