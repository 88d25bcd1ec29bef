//! HTML serialization.
//!
//! Form controls serialize their live value as the `value` attribute, so a
//! snapshot of the page shows what the user has typed.

use askama::filters::{Html, escape};

use super::{Document, DomError, NodeData, NodeId};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize a node and its subtree.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown.
    pub fn outer_html(&self, id: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        self.write_node(id, &mut out)?;
        Ok(out)
    }

    fn write_node(&self, id: NodeId, out: &mut String) -> Result<(), DomError> {
        let node = self.node(id)?;
        let element = match &node.data {
            NodeData::Text(text) => {
                out.push_str(&escaped(text));
                return Ok(());
            }
            NodeData::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            if name == "value" && element.value.is_some() {
                continue;
            }
            push_attribute(out, name, value);
        }
        if let Some(value) = &element.value {
            push_attribute(out, "value", value);
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return Ok(());
        }

        for &child in &node.children {
            self.write_node(child, out)?;
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
        Ok(())
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escaped(value));
    out.push('"');
}

/// Text with `&`, `<`, `>`, `"` and `'` replaced by character references.
fn escaped(raw: &str) -> String {
    let Ok(safe) = escape(raw, Html);
    safe.to_string()
}
