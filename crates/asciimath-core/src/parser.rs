use std::mem;

use log::debug;
use mathml_tree::ast::Node;
use mathml_tree::tag::{Attribute, Tag};

use crate::fragment::{Fragment, Group, flatten};
use crate::lexer::Lexer;
use crate::symbol_table::{ArgOrder, Role, Symbol, UnaryKind};
use crate::table::try_into_table;
use crate::token::{Token, TokenKind};
use crate::token_queue::TokenQueue;

/// Nesting depth beyond which brackets and functions are no longer descended into.
///
/// Anything that would open a deeper level is emitted as a flat leaf instead.
pub(crate) const MAX_DEPTH: usize = 128;

/// Builds the MathML tree from the token stream.
///
/// The grammar is
///
/// ```text
/// sequence     ::= fraction*
/// fraction     ::= scripted | scripted "/" scripted
/// scripted     ::= simple (("_" | "^") simple)*
/// simple       ::= leaf | group | unary simple | binary simple simple
/// ```
///
/// Parsing never fails: every malformed construct degrades to a well-formed tree.
pub(crate) struct Parser<'source> {
    tokens: TokenQueue<'source>,
    depth: usize,
    /// Set while parsing the content of a `|...|` group, where `|` ends the group.
    in_bar: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Sub,
    Sup,
}

impl<'source> Parser<'source> {
    pub(crate) fn new(lexer: Lexer<'source>) -> Self {
        Parser {
            tokens: TokenQueue::new(lexer),
            depth: 0,
            in_bar: false,
        }
    }

    pub(crate) fn parse(mut self) -> Vec<Node> {
        let fragments = self.parse_sequence(false);
        flatten(fragments)
    }

    /// Parse until the end of the input or, if `nested`, until the end of the current group.
    fn parse_sequence(&mut self, nested: bool) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        loop {
            let tok = *self.tokens.peek();
            if matches!(tok.kind(), TokenKind::Eoi) || (nested && self.closes_group(&tok)) {
                break;
            }
            fragments.push(self.parse_fraction());
        }
        fragments
    }

    fn closes_group(&self, tok: &Token<'_>) -> bool {
        match tok.role() {
            Some(Role::CloseBracket) => true,
            Some(Role::LeftRight) => self.in_bar,
            _ => false,
        }
    }

    /// Returns `true` if no operand can start at `tok`.
    fn ends_operand(&self, tok: &Token<'_>) -> bool {
        matches!(tok.kind(), TokenKind::Eoi) || self.closes_group(tok)
    }

    fn at_operand_end(&mut self) -> bool {
        let tok = *self.tokens.peek();
        self.ends_operand(&tok)
    }

    /// Whether the token after the next one ends an operand, i.e. whether an infix operator at
    /// the current position is missing its right operand.
    fn operand_missing_after_next(&mut self) -> bool {
        let tok = *self.tokens.peek_second();
        self.ends_operand(&tok)
    }

    fn parse_fraction(&mut self) -> Fragment {
        let numerator = self.parse_scripted();
        if !self.tokens.peek().is_symbol("/") {
            return numerator;
        }
        if self.operand_missing_after_next() {
            debug!("fraction bar without denominator");
            return numerator;
        }
        self.tokens.next();
        let denominator = self.parse_scripted();
        Fragment::Node(Node::container(
            Tag::Mfrac,
            vec![numerator.into_argument(), denominator.into_argument()],
        ))
    }

    fn parse_scripted(&mut self) -> Fragment {
        let under_over = matches!(self.tokens.peek().role(), Some(Role::Embellished));
        let base = self.parse_simple();
        self.parse_scripts(base, under_over)
    }

    fn peek_script(&mut self) -> Option<Script> {
        let tok = self.tokens.peek();
        if tok.is_symbol("_") {
            Some(Script::Sub)
        } else if tok.is_symbol("^") {
            Some(Script::Sup)
        } else {
            None
        }
    }

    /// Attach any following subscripts and superscripts to `base`.
    ///
    /// A second script of the same kind nests: `x^2^3` is `(x^2)^3`.
    fn parse_scripts(&mut self, mut base: Fragment, mut under_over: bool) -> Fragment {
        let mut sub = None;
        let mut sup = None;
        let mut levels = 0usize;
        while let Some(script) = self.peek_script() {
            if self.operand_missing_after_next() {
                // The marker is emitted as a plain operator by the enclosing sequence.
                debug!("script marker without operand");
                break;
            }
            let slot_taken = match script {
                Script::Sub => sub.is_some(),
                Script::Sup => sup.is_some(),
            };
            if slot_taken {
                levels += 1;
                if self.depth + levels >= MAX_DEPTH {
                    debug!("nesting limit reached in scripts");
                    break;
                }
                base = Fragment::Node(attach_scripts(base, sub.take(), sup.take(), under_over));
                under_over = false;
            }
            self.tokens.next();
            let operand = self.parse_simple().into_argument();
            match script {
                Script::Sub => sub = Some(operand),
                Script::Sup => sup = Some(operand),
            }
        }
        if sub.is_none() && sup.is_none() {
            return base;
        }
        Fragment::Node(attach_scripts(base, sub, sup, under_over))
    }

    fn parse_simple(&mut self) -> Fragment {
        let tok = self.tokens.next();
        let sym = match (tok.kind(), tok.symbol()) {
            (TokenKind::Eoi, _) => return Fragment::Node(Node::row(Vec::new())),
            (TokenKind::Number, _) => return number(tok.raw()),
            (TokenKind::Text, _) => return Fragment::Node(Node::leaf(Tag::Mtext, tok.raw())),
            (TokenKind::Word | TokenKind::Punctuation, None) => {
                return Fragment::Node(Node::leaf(Tag::Mi, tok.raw()));
            }
            (_, Some(sym)) => sym,
        };
        match sym.role {
            Role::Identifier | Role::Operator | Role::Embellished => {
                Fragment::Node(Node::leaf(sym.tag, sym.output))
            }
            Role::WordOperator => Fragment::Keyword(sym),
            Role::CloseBracket => {
                debug!("closing bracket {:?} without opening bracket", tok.raw());
                let text = if sym.output.is_empty() {
                    tok.raw()
                } else {
                    sym.output
                };
                Fragment::Node(Node::leaf(Tag::Mo, text))
            }
            Role::OpenBracket | Role::LeftRight | Role::Function | Role::Unary(_) | Role::Binary(_)
                if self.depth >= MAX_DEPTH =>
            {
                debug!("nesting limit reached at {:?}", tok.raw());
                degraded(&tok, sym)
            }
            Role::OpenBracket => self.nested(|p| p.parse_group(sym)),
            Role::LeftRight => self.nested(|p| p.parse_bar(sym)),
            Role::Function => self.nested(|p| p.parse_function(sym)),
            Role::Unary(kind) => self.nested(|p| p.parse_unary(&tok, sym, kind)),
            Role::Binary(order) => self.nested(|p| p.parse_binary(&tok, sym, order)),
        }
    }

    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Fragment) -> Fragment {
        self.depth += 1;
        let fragment = parse(self);
        self.depth -= 1;
        fragment
    }

    fn parse_group(&mut self, open: &'static Symbol) -> Fragment {
        let outer_bar = mem::replace(&mut self.in_bar, false);
        let content = self.parse_sequence(true);
        self.in_bar = outer_bar;
        let tok = *self.tokens.peek();
        let close = match tok.role() {
            Some(Role::CloseBracket) => {
                self.tokens.next();
                tok.symbol()
            }
            _ => None,
        };
        finish_group(open, close, content, false)
    }

    /// Parse `|...|`, or a lone `|` if no matching bar follows.
    fn parse_bar(&mut self, bar: &'static Symbol) -> Fragment {
        if !self.tokens.has_closing_bar() {
            return Fragment::Node(Node::row(vec![Node::leaf(bar.tag, bar.output)]));
        }
        let outer_bar = mem::replace(&mut self.in_bar, true);
        let content = self.parse_sequence(true);
        self.in_bar = outer_bar;
        let close = match self.tokens.peek().role() {
            Some(Role::LeftRight) => {
                self.tokens.next();
                Some(bar)
            }
            _ => None,
        };
        finish_group(bar, close, content, true)
    }

    /// Parse a named function like `sin x`. Scripts directly after the name belong to the name,
    /// as in `log_2 x`.
    fn parse_function(&mut self, sym: &'static Symbol) -> Fragment {
        let name = Fragment::Node(Node::leaf(sym.tag, sym.output));
        let head = self.parse_scripts(name, false);
        if self.at_operand_end() {
            debug!("function {:?} without argument", sym.output);
            return head;
        }
        let argument = self.parse_simple().into_single();
        Fragment::Node(Node::row(vec![head.into_single(), argument]))
    }

    fn parse_unary(&mut self, tok: &Token<'_>, sym: &'static Symbol, kind: UnaryKind) -> Fragment {
        if self.at_operand_end() {
            debug!("function {:?} without argument", tok.raw());
            return Fragment::Node(function_leaf(tok, sym));
        }
        if matches!(kind, UnaryKind::Text) && matches!(self.tokens.peek().kind(), TokenKind::Text)
        {
            let text = self.tokens.next();
            return Fragment::Node(Node::row(vec![Node::leaf(Tag::Mtext, text.raw())]));
        }
        let argument = self.parse_simple().into_argument();
        let node = match kind {
            UnaryKind::AccentOver | UnaryKind::AccentUnder => Node::container(
                sym.tag,
                vec![argument, Node::leaf(Tag::Mo, sym.output)],
            ),
            UnaryKind::SquareRoot | UnaryKind::Text => Node::container(sym.tag, vec![argument]),
            UnaryKind::Variant(variant) => Node::container(sym.tag, vec![argument])
                .with_attr(Attribute::Mathvariant, variant.as_str()),
            UnaryKind::Fenced(left, right) => Node::row(vec![
                Node::leaf(Tag::Mo, left),
                argument,
                Node::leaf(Tag::Mo, right),
            ]),
        };
        Fragment::Node(node)
    }

    fn parse_binary(&mut self, tok: &Token<'_>, sym: &'static Symbol, order: ArgOrder) -> Fragment {
        if self.at_operand_end() {
            debug!("function {:?} without arguments", tok.raw());
            return Fragment::Node(function_leaf(tok, sym));
        }
        let first = self.parse_simple().into_argument();
        let second = if self.at_operand_end() {
            debug!("function {:?} without second argument", tok.raw());
            Node::row(Vec::new())
        } else {
            self.parse_simple().into_argument()
        };
        let children = match order {
            ArgOrder::Preserve => vec![first, second],
            ArgOrder::Swap => vec![second, first],
        };
        Fragment::Node(Node::container(sym.tag, children))
    }
}

fn finish_group(
    open: &'static Symbol,
    close: Option<&'static Symbol>,
    content: Vec<Fragment>,
    bars: bool,
) -> Fragment {
    let content = if close.is_some() {
        match try_into_table(content) {
            Ok(table) => vec![Fragment::Node(table)],
            Err(content) => content,
        }
    } else {
        debug!("unclosed group opened by {:?}", open.output);
        content
    };
    Fragment::Group(Group {
        open,
        close,
        content,
        bars,
    })
}

fn attach_scripts(
    base: Fragment,
    sub: Option<Node>,
    sup: Option<Node>,
    under_over: bool,
) -> Node {
    let base = base.into_single();
    let (tag, children) = match (sub, sup) {
        (Some(sub), None) => {
            let tag = if under_over { Tag::Munder } else { Tag::Msub };
            (tag, vec![base, sub])
        }
        (None, Some(sup)) => {
            let tag = if under_over { Tag::Mover } else { Tag::Msup };
            (tag, vec![base, sup])
        }
        (Some(sub), Some(sup)) => {
            let tag = if under_over {
                Tag::Munderover
            } else {
                Tag::Msubsup
            };
            (tag, vec![base, sub, sup])
        }
        (None, None) => return base,
    };
    Node::container(tag, children)
}

fn number(raw: &str) -> Fragment {
    match raw.strip_prefix('-') {
        Some(magnitude) => Fragment::Negative {
            sign: Node::leaf(Tag::Mo, "-"),
            magnitude: Node::leaf(Tag::Mn, magnitude),
        },
        None => Fragment::Node(Node::leaf(Tag::Mn, raw)),
    }
}

/// A function that is missing its arguments, as a plain operator.
fn function_leaf(tok: &Token<'_>, sym: &'static Symbol) -> Node {
    match sym.role {
        Role::Function | Role::Unary(UnaryKind::AccentOver | UnaryKind::AccentUnder) => {
            Node::leaf(Tag::Mo, sym.output)
        }
        _ => Node::leaf(Tag::Mo, tok.raw()),
    }
}

/// The flat replacement for a construct beyond the nesting limit.
fn degraded(tok: &Token<'_>, sym: &'static Symbol) -> Fragment {
    match sym.role {
        Role::OpenBracket => Fragment::Group(Group {
            open: sym,
            close: None,
            content: Vec::new(),
            bars: false,
        }),
        Role::LeftRight => Fragment::Node(Node::row(vec![Node::leaf(sym.tag, sym.output)])),
        _ => Fragment::Node(function_leaf(tok, sym)),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn render(input: &str) -> String {
        let nodes = Parser::new(Lexer::new(input)).parse();
        let mut output = String::new();
        for node in nodes {
            node.emit(&mut output, 0).unwrap();
        }
        output
    }

    #[test]
    fn empty() {
        assert_snapshot!(render(""), @"");
    }

    #[test]
    fn fraction_strips_brackets() {
        assert_snapshot!(
            render("(a+b)/c"),
            @"<mfrac><mrow><mi>a</mi><mo>+</mo><mi>b</mi></mrow><mi>c</mi></mfrac>"
        );
    }

    #[test]
    fn script_base_keeps_brackets() {
        assert_snapshot!(
            render("(a)^2"),
            @"<msup><mrow><mo>(</mo><mi>a</mi><mo>)</mo></mrow><mn>2</mn></msup>"
        );
    }

    #[test]
    fn repeated_superscript_nests() {
        assert_snapshot!(
            render("x^2^3"),
            @"<msup><msup><mi>x</mi><mn>2</mn></msup><mn>3</mn></msup>"
        );
    }

    #[test]
    fn function_takes_scripts_first() {
        assert_snapshot!(
            render("log_2 x"),
            @"<mrow><msub><mo>log</mo><mn>2</mn></msub><mi>x</mi></mrow>"
        );
    }

    #[test]
    fn dangling_markers() {
        assert_snapshot!(render("x^"), @"<mi>x</mi><mo>^</mo>");
        assert_snapshot!(render("a/"), @"<mi>a</mi><mo>/</mo>");
        assert_snapshot!(render("(x_)"), @"<mrow><mo>(</mo><mi>x</mi><mo>_</mo><mo>)</mo></mrow>");
    }

    #[test]
    fn dangling_functions() {
        assert_snapshot!(render("sqrt"), @"<mo>sqrt</mo>");
        assert_snapshot!(render("hat"), @"<mo>^</mo>");
        assert_snapshot!(render("frac a"), @"<mfrac><mi>a</mi><mrow></mrow></mfrac>");
    }

    #[test]
    fn named_function_row() {
        assert_snapshot!(render("sin x"), @"<mrow><mo>sin</mo><mi>x</mi></mrow>");
        assert_snapshot!(
            render("sin(x)"),
            @"<mrow><mo>sin</mo><mrow><mo>(</mo><mi>x</mi><mo>)</mo></mrow></mrow>"
        );
        assert_snapshot!(render("(sin)"), @"<mrow><mo>(</mo><mo>sin</mo><mo>)</mo></mrow>");
    }

    #[test]
    fn stray_closer() {
        assert_snapshot!(render("a)"), @"<mi>a</mi><mo>)</mo>");
        assert_snapshot!(render(":}"), @"<mo>:}</mo>");
    }

    #[test]
    fn absolute_value() {
        assert_snapshot!(
            render("|x|"),
            @"<mrow><mo>|</mo><mi>x</mi><mo>|</mo></mrow>"
        );
        assert_snapshot!(render("|x"), @"<mrow><mo>|</mo></mrow><mi>x</mi>");
    }

    #[test]
    fn bars_survive_as_argument() {
        assert_snapshot!(
            render("sqrt|x|"),
            @"<msqrt><mrow><mo>|</mo><mi>x</mi><mo>|</mo></mrow></msqrt>"
        );
    }

    #[test]
    fn fonts_and_fences() {
        assert_snapshot!(
            render("bbb R"),
            @r#"<mstyle mathvariant="double-struck"><mi>R</mi></mstyle>"#
        );
        assert_snapshot!(
            render("abs(x)"),
            @"<mrow><mo>|</mo><mi>x</mi><mo>|</mo></mrow>"
        );
    }

    #[test]
    fn binary_functions() {
        assert_snapshot!(
            render("root(3)(x)"),
            @"<mroot><mi>x</mi><mn>3</mn></mroot>"
        );
        assert_snapshot!(
            render("stackrel(def)(=)"),
            @"<mover><mo>=</mo><mrow><mi>d</mi><mi>e</mi><mi>f</mi></mrow></mover>"
        );
    }

    #[test]
    fn quoted_text() {
        assert_snapshot!(render(r#""hello world""#), @"<mtext>hello world</mtext>");
    }

    #[test]
    fn limits() {
        assert_snapshot!(
            render("lim_(x->0)"),
            @"<munder><mo>lim</mo><mrow><mi>x</mi><mo>→</mo><mn>0</mn></mrow></munder>"
        );
    }

    #[test]
    fn deep_nesting_is_flattened() {
        let input = "(".repeat(MAX_DEPTH * 4);
        let nodes = Parser::new(Lexer::new(&input)).parse();
        assert_eq!(nodes.len(), 1);
    }
}
