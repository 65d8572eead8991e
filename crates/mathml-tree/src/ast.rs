use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::escape::{escape_double_quoted_attribute, escape_html_content};
use crate::fmt::{INDENT, new_line_and_indent};
use crate::tag::{Attribute, Tag};

/// A node of the MathML output tree.
///
/// A node is either a leaf (`text` is set and `children` is empty) or a container
/// (`text` is `None`). Children are owned, so a node can never appear under two parents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Node {
    pub tag: Tag,
    pub attributes: BTreeMap<Attribute, String>,
    pub children: Vec<Node>,
    pub text: Option<String>,
}

static_assertions::assert_impl_all!(Node: Send, Sync);

impl Node {
    /// Create a leaf with the given text content.
    #[inline]
    pub fn leaf(tag: Tag, text: impl Into<String>) -> Self {
        Node {
            tag,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Create a container with the given children.
    #[inline]
    pub fn container(tag: Tag, children: Vec<Node>) -> Self {
        Node {
            tag,
            attributes: BTreeMap::new(),
            children,
            text: None,
        }
    }

    /// A container without children, e.g. `<mspace>`.
    #[inline]
    pub fn empty(tag: Tag) -> Self {
        Node::container(tag, Vec::new())
    }

    #[inline]
    pub fn row(children: Vec<Node>) -> Self {
        Node::container(Tag::Mrow, children)
    }

    /// Builder-style variant of [`Node::set_attr`].
    #[inline]
    pub fn with_attr(mut self, attr: Attribute, value: impl Into<String>) -> Self {
        self.set_attr(attr, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, attr: Attribute, value: impl Into<String>) {
        self.attributes.insert(attr, value.into());
    }

    pub fn attr(&self, attr: Attribute) -> Option<&str> {
        self.attributes.get(&attr).map(String::as_str)
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.text.is_some()
    }

    /// Returns `true` if this is an `<mo>` leaf with exactly the given text.
    pub fn is_operator(&self, text: &str) -> bool {
        matches!(self.tag, Tag::Mo) && self.text() == Some(text)
    }

    /// Serialize this node as MathML.
    ///
    /// With `base_indent == 0`, the output is compact. Otherwise every element starts on a new
    /// line, indented by `base_indent` levels, and children are indented one level further.
    pub fn emit(&self, s: &mut String, base_indent: usize) -> fmt::Result {
        // Compute the indent for the children of the node.
        let child_indent = if base_indent > 0 {
            base_indent.saturating_add(1)
        } else {
            0
        };
        // Get the base indent out of the way.
        new_line_and_indent(s, base_indent);
        self.emit_element(s, child_indent, base_indent)
    }

    /// Serialize a root node with its children pretty-printed.
    ///
    /// In contrast to [`Node::emit`] with a non-zero indent, the node itself is not preceded by
    /// a line break, so this is suitable for the top of a document.
    pub fn emit_pretty(&self, s: &mut String) -> fmt::Result {
        self.emit_element(s, 1, 0)
    }

    fn emit_element(&self, s: &mut String, child_indent: usize, own_indent: usize) -> fmt::Result {
        let tag = self.tag.as_str();
        s.push('<');
        s.push_str(tag);
        for (attr, value) in &self.attributes {
            s.push(' ');
            s.push_str(attr.as_str());
            s.push_str("=\"");
            escape_double_quoted_attribute(s, value);
            s.push('"');
        }
        s.push('>');
        if let Some(text) = &self.text {
            escape_html_content(s, text);
        } else {
            for child in &self.children {
                child.emit(s, child_indent)?;
            }
            if child_indent > 0 && !self.children.is_empty() {
                s.push('\n');
                for _ in 0..own_indent {
                    s.push_str(INDENT);
                }
            }
        }
        s.push_str("</");
        s.push_str(tag);
        s.push('>');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn render(node: &Node) -> String {
        let mut output = String::new();
        node.emit(&mut output, 0).unwrap();
        output
    }

    #[test]
    fn render_leaf() {
        assert_snapshot!(render(&Node::leaf(Tag::Mi, "α")), @"<mi>α</mi>");
    }

    #[test]
    fn render_escaped_operator() {
        assert_snapshot!(render(&Node::leaf(Tag::Mo, "<")), @"<mo>&lt;</mo>");
    }

    #[test]
    fn render_empty_container() {
        let node = Node::container(Tag::Math, vec![Node::empty(Tag::Mstyle)]);
        assert_snapshot!(render(&node), @"<math><mstyle></mstyle></math>");
    }

    #[test]
    fn render_attributes_in_order() {
        let node = Node::empty(Tag::Mstyle)
            .with_attr(Attribute::Mathcolor, "red")
            .with_attr(Attribute::Displaystyle, "true");
        assert_snapshot!(
            render(&node),
            @r#"<mstyle displaystyle="true" mathcolor="red"></mstyle>"#
        );
    }

    #[test]
    fn set_attr_replaces() {
        let mut node = Node::empty(Tag::Mspace).with_attr(Attribute::Width, "1ex");
        node.set_attr(Attribute::Width, "2em");
        assert_eq!(node.attr(Attribute::Width), Some("2em"));
        assert_eq!(node.attributes.len(), 1);
    }

    #[test]
    fn render_nested() {
        let node = Node::container(
            Tag::Msubsup,
            vec![
                Node::leaf(Tag::Mi, "x"),
                Node::leaf(Tag::Mn, "1"),
                Node::row(vec![Node::leaf(Tag::Mo, "-"), Node::leaf(Tag::Mn, "2")]),
            ],
        );
        assert_snapshot!(
            render(&node),
            @"<msubsup><mi>x</mi><mn>1</mn><mrow><mo>-</mo><mn>2</mn></mrow></msubsup>"
        );
    }

    #[test]
    fn render_pretty() {
        let node = Node::container(
            Tag::Math,
            vec![Node::container(
                Tag::Mstyle,
                vec![Node::leaf(Tag::Mi, "a"), Node::leaf(Tag::Mo, "+")],
            )],
        );
        let mut output = String::new();
        node.emit_pretty(&mut output).unwrap();
        assert_eq!(
            output,
            "<math>\n    <mstyle>\n        <mi>a</mi>\n        <mo>+</mo>\n    </mstyle>\n</math>"
        );
    }

    #[test]
    fn render_pretty_empty_child() {
        let node = Node::container(Tag::Math, vec![Node::empty(Tag::Mstyle)]);
        let mut output = String::new();
        node.emit_pretty(&mut output).unwrap();
        assert_eq!(output, "<math>\n    <mstyle></mstyle>\n</math>");
    }

    #[test]
    fn operator_check() {
        assert!(Node::leaf(Tag::Mo, ",").is_operator(","));
        assert!(!Node::leaf(Tag::Mi, ",").is_operator(","));
        assert!(!Node::row(vec![]).is_operator(","));
    }
}
