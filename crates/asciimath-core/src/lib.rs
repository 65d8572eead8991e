//! Convert ASCIIMath to MathML.
//!
//! ASCIIMath is a compact plain-text notation for mathematics, where `sum_(i=1)^n i^2` or
//! `(a+b)/c` are written much as one would type them in an email.
//!
//! # Usage
//!
//! The main struct of this library is [`AsciiMathToMathML`]. Create an instance with a
//! [`Config`] and then call [`compile`](AsciiMathToMathML::compile) to get the MathML tree, or
//! [`convert`](AsciiMathToMathML::convert) to get it serialized as a string.
//!
//! ```rust
//! use asciimath_core::{AsciiMathToMathML, Config};
//!
//! let converter = AsciiMathToMathML::new(Config::default());
//! let mathml = converter.convert("alpha/beta");
//! assert_eq!(
//!     mathml,
//!     "<math><mstyle><mfrac><mi>α</mi><mi>β</mi></mfrac></mstyle></math>"
//! );
//! ```
//!
//! Compilation never fails. Unbalanced brackets, missing operands and unknown words all produce
//! a well-formed tree.
//!
//! # Features
//!
//! - `serde`: With this feature, `Config` implements serde's `Deserialize` and `Serialize`, and
//!   the output tree implements `Serialize`.
//!
mod fragment;
mod lexer;
mod parser;
mod symbol_table;
mod table;
mod token;
mod token_queue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use mathml_tree::ast::Node;
pub use mathml_tree::tag::{Attribute, MathVariant, Tag};

pub use self::lexer::{Lexer, tokenize};
pub use self::symbol_table::{ArgOrder, MAX_SYMBOL_LEN, Role, Symbol, UnaryKind, lookup};
pub use self::token::{Span, Token, TokenKind};
use self::parser::Parser;

const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Display mode of the formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MathDisplay {
    /// A formula within running text.
    #[default]
    Inline,
    /// A formula on its own line. This adds `display="block"` to the `<math>` element.
    Block,
}

/// Configuration for pretty-printing the MathML output.
///
/// Pretty-printing means that newlines and indentation is added to the MathML output, to make it
/// easier to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum PrettyPrint {
    /// Never pretty print.
    #[default]
    Never,
    /// Always pretty print.
    Always,
    /// Pretty print for block formulas only.
    Auto,
}

/// Configuration object for the ASCIIMath to MathML conversion.
///
/// The style fields are copied to the `<mstyle>` element that wraps the formula, but only if they
/// are set.
///
/// # Example usage
///
/// ```rust
/// use asciimath_core::{Config, MathDisplay, PrettyPrint};
///
/// let config = Config {
///     pretty_print: PrettyPrint::Auto,
///     display: MathDisplay::Block,
///     math_color: Some("darkblue".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Config {
    /// A configuration for pretty-printing the MathML output. See [`PrettyPrint`] for details.
    pub pretty_print: PrettyPrint,
    pub display: MathDisplay,
    /// If `true`, include `xmlns="http://www.w3.org/1998/Math/MathML"` in the `<math>` tag.
    pub xml_namespace: bool,
    /// If `true`, add `displaystyle="true"` to the `<mstyle>` element.
    pub display_style: bool,
    pub math_color: Option<String>,
    pub math_background: Option<String>,
    pub math_size: Option<String>,
    pub font_family: Option<String>,
}

/// A converter that transforms ASCIIMath into MathML.
///
/// The converter holds no per-call state, so one instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct AsciiMathToMathML {
    config: Config,
}

static_assertions::assert_impl_all!(AsciiMathToMathML: Send, Sync);

impl AsciiMathToMathML {
    /// Create a new converter with the given configuration.
    #[inline]
    pub fn new(config: Config) -> Self {
        AsciiMathToMathML { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compile ASCIIMath text into a MathML tree.
    ///
    /// The root is always a `<math>` element with exactly one `<mstyle>` child, which holds the
    /// nodes of the formula.
    ///
    /// ```rust
    /// use asciimath_core::{AsciiMathToMathML, Config, Tag};
    ///
    /// let tree = AsciiMathToMathML::new(Config::default()).compile("sqrt 2");
    /// assert_eq!(tree.tag, Tag::Math);
    /// assert_eq!(tree.children[0].children[0].tag, Tag::Msqrt);
    /// ```
    pub fn compile(&self, text: &str) -> Node {
        let parser = Parser::new(Lexer::new(text));
        let nodes = parser.parse();
        self.assemble(nodes)
    }

    /// Compile ASCIIMath text and serialize the resulting tree.
    pub fn convert(&self, text: &str) -> String {
        let tree = self.compile(text);
        let pretty_print = matches!(self.config.pretty_print, PrettyPrint::Always)
            || (matches!(self.config.pretty_print, PrettyPrint::Auto)
                && self.config.display == MathDisplay::Block);
        let mut output = String::new();
        if pretty_print {
            tree.emit_pretty(&mut output).ok();
        } else {
            tree.emit(&mut output, 0).ok();
        }
        output
    }

    /// Wrap the nodes of a formula in `<math><mstyle>…</mstyle></math>`.
    fn assemble(&self, nodes: Vec<Node>) -> Node {
        let config = &self.config;
        let mut style = Node::container(Tag::Mstyle, nodes);
        if config.display_style {
            style.set_attr(Attribute::Displaystyle, "true");
        }
        let style_attrs = [
            (Attribute::Mathcolor, &config.math_color),
            (Attribute::Mathbackground, &config.math_background),
            (Attribute::Mathsize, &config.math_size),
            (Attribute::Fontfamily, &config.font_family),
        ];
        for (attr, value) in style_attrs {
            if let Some(value) = value {
                style.set_attr(attr, value.as_str());
            }
        }

        let mut math = Node::container(Tag::Math, vec![style]);
        if config.xml_namespace {
            math.set_attr(Attribute::Xmlns, MATHML_NAMESPACE);
        }
        if matches!(config.display, MathDisplay::Block) {
            math.set_attr(Attribute::Display, "block");
        }
        math
    }
}

/// Compile ASCIIMath text into a MathML tree with the default configuration.
///
/// ```rust
/// let tree = asciimath_core::compile("x^2");
/// assert_eq!(tree.children[0].children.len(), 1);
/// ```
#[inline]
pub fn compile(text: &str) -> Node {
    AsciiMathToMathML::default().compile(text)
}
