//! Minimal in-memory XML tree, rendered in one pass once complete.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        XmlNode {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Append `child` and return a handle to it.
    pub fn add_child(&mut self, child: XmlNode) -> &mut XmlNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Render as a complete document with an XML declaration.
    pub fn to_document_string(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        self.write_node(&mut out, 0);
        out
    }

    /// Render and write the document to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_document_string())?;
        Ok(())
    }

    fn write_node(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // Writing into a String cannot fail.
            let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_node(out, depth + 1);
        }
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        let _ = writeln!(out, "</{}>", self.name);
    }
}

pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let mut root = XmlNode::new("materials");
        let isotope = root.add_child(XmlNode::new("isotope").with_attr("N", "1"));
        isotope.add_child(
            XmlNode::new("atom")
                .with_attr("unit", "g/mole")
                .with_attr("value", "1.00783"),
        );

        let expected = "<?xml version=\"1.0\"?>\n\
                        <materials>\n  \
                        <isotope N=\"1\">\n    \
                        <atom unit=\"g/mole\" value=\"1.00783\"/>\n  \
                        </isotope>\n\
                        </materials>\n";
        assert_eq!(root.to_document_string(), expected);
    }

    #[test]
    fn test_empty_root() {
        let root = XmlNode::new("materials");
        assert_eq!(root.to_document_string(), "<?xml version=\"1.0\"?>\n<materials/>\n");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_attr("G4_WATER"), "G4_WATER");
        assert_eq!(escape_attr("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_attribute_lookup() {
        let node = XmlNode::new("D").with_attr("unit", "kg/m3").with_attr("value", "2.51");
        assert_eq!(node.attribute("unit"), Some("kg/m3"));
        assert_eq!(node.attribute("missing"), None);
    }
}
