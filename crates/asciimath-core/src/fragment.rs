use mathml_tree::ast::Node;
use mathml_tree::tag::{Attribute, Tag};

use crate::symbol_table::Symbol;

/// A parsed piece of the input that has not yet been committed to its final shape.
///
/// Whether a group keeps its brackets or a signed number gets its own row depends on where the
/// fragment ends up, so that decision is deferred until the fragment is placed.
#[derive(Debug)]
pub(crate) enum Fragment {
    Node(Node),
    Group(Group),
    /// A number with a leading minus sign.
    Negative { sign: Node, magnitude: Node },
    /// An operator word like `if`, which is padded with space on both sides.
    Keyword(&'static Symbol),
}

/// Content between an opening and a closing bracket.
#[derive(Debug)]
pub(crate) struct Group {
    pub open: &'static Symbol,
    /// `None` if the input ended before a closing bracket.
    pub close: Option<&'static Symbol>,
    pub content: Vec<Fragment>,
    /// Groups delimited by `|` are absolute values and always keep their bars.
    pub bars: bool,
}

impl Fragment {
    /// Append the nodes of this fragment to `out`, as they appear in a row.
    pub(crate) fn push_into(self, out: &mut Vec<Node>) {
        match self {
            Fragment::Node(node) => out.push(node),
            Fragment::Group(group) => out.push(group.into_node()),
            Fragment::Negative { sign, magnitude } => {
                out.push(sign);
                out.push(magnitude);
            }
            Fragment::Keyword(sym) => out.push(keyword_row(sym)),
        }
    }

    /// Convert into a single node, wrapping multiple nodes in a row.
    pub(crate) fn into_single(self) -> Node {
        match self {
            Fragment::Node(node) => node,
            Fragment::Group(group) => group.into_node(),
            Fragment::Negative { sign, magnitude } => Node::row(vec![sign, magnitude]),
            Fragment::Keyword(sym) => keyword_row(sym),
        }
    }

    /// Convert into a single node for use as the argument of a function or a script.
    ///
    /// A closed bracket group loses its brackets here, so `(a+b)/c` puts only `a+b` in the
    /// numerator.
    pub(crate) fn into_argument(self) -> Node {
        match self {
            Fragment::Group(group) if group.close.is_some() && !group.bars => {
                single_or_row(flatten(group.content))
            }
            other => other.into_single(),
        }
    }

    /// Returns `true` if this fragment is a bare comma.
    pub(crate) fn is_comma(&self) -> bool {
        matches!(self, Fragment::Node(node) if node.is_operator(","))
    }
}

impl Group {
    /// The group as a row, with its visible brackets.
    pub(crate) fn into_node(self) -> Node {
        let mut children = Vec::with_capacity(self.content.len() + 2);
        if let Some(open) = visible_leaf(self.open) {
            children.push(open);
        }
        for fragment in self.content {
            fragment.push_into(&mut children);
        }
        if let Some(close) = self.close.and_then(visible_leaf) {
            children.push(close);
        }
        Node::row(children)
    }
}

pub(crate) fn flatten(fragments: Vec<Fragment>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        fragment.push_into(&mut nodes);
    }
    nodes
}

/// A single node stays as it is, anything else becomes a row.
pub(crate) fn single_or_row(mut nodes: Vec<Node>) -> Node {
    if nodes.len() == 1
        && let Some(node) = nodes.pop()
    {
        return node;
    }
    Node::row(nodes)
}

/// The leaf for a bracket, or `None` for the invisible brackets `{:` and `:}`.
fn visible_leaf(sym: &'static Symbol) -> Option<Node> {
    (!sym.output.is_empty()).then(|| Node::leaf(sym.tag, sym.output))
}

fn keyword_row(sym: &'static Symbol) -> Node {
    Node::row(vec![
        Node::empty(Tag::Mspace).with_attr(Attribute::Width, "1ex"),
        Node::leaf(Tag::Mo, sym.output),
        Node::empty(Tag::Mspace).with_attr(Attribute::Width, "1ex"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_table::lookup;

    fn mi(text: &str) -> Fragment {
        Fragment::Node(Node::leaf(Tag::Mi, text))
    }

    fn parens(content: Vec<Fragment>, closed: bool) -> Group {
        Group {
            open: lookup("(").unwrap(),
            close: closed.then(|| lookup(")").unwrap()),
            content,
            bars: false,
        }
    }

    #[test]
    fn closed_group_keeps_brackets_in_row() {
        let node = Fragment::Group(parens(vec![mi("a")], true)).into_single();
        assert_eq!(node.children.len(), 3);
        assert!(node.children[0].is_operator("("));
        assert!(node.children[2].is_operator(")"));
    }

    #[test]
    fn closed_group_argument_drops_brackets() {
        let node = Fragment::Group(parens(vec![mi("a")], true)).into_argument();
        assert_eq!(node, Node::leaf(Tag::Mi, "a"));
    }

    #[test]
    fn unclosed_group_argument_keeps_open_bracket() {
        let node = Fragment::Group(parens(vec![mi("a")], false)).into_argument();
        assert_eq!(node.tag, Tag::Mrow);
        assert_eq!(node.children.len(), 2);
        assert!(node.children[0].is_operator("("));
    }

    #[test]
    fn negative_number_splits_in_rows() {
        let fragment = Fragment::Negative {
            sign: Node::leaf(Tag::Mo, "-"),
            magnitude: Node::leaf(Tag::Mn, "1"),
        };
        let mut nodes = Vec::new();
        fragment.push_into(&mut nodes);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn keyword_is_padded() {
        let node = Fragment::Keyword(lookup("if").unwrap()).into_single();
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].attr(Attribute::Width), Some("1ex"));
        assert!(node.children[1].is_operator("if"));
    }

    #[test]
    fn comma_detection() {
        assert!(Fragment::Node(Node::leaf(Tag::Mo, ",")).is_comma());
        assert!(!mi(",").is_comma());
    }
}
