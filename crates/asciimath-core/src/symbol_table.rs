//! The table of known input words and punctuation.
//!
//! The table is a perfect-hash map built at compile time, so it is immutable and can be read from
//! any number of threads without synchronization.

use mathml_tree::tag::{MathVariant, Tag};

/// How a symbol behaves in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An ordinary leaf that can serve as a left operand, e.g. `alpha` or `RR`.
    Identifier,
    /// An operator leaf after which no left operand is available, e.g. `+` or `=`.
    Operator,
    OpenBracket,
    CloseBracket,
    /// `|`, which opens a group if a matching `|` follows and is a plain operator otherwise.
    LeftRight,
    /// A named function like `sin`, rendered as a row of its name and its argument.
    Function,
    /// A function taking one argument.
    Unary(UnaryKind),
    /// A function taking two arguments.
    Binary(ArgOrder),
    /// A large operator which takes its limits under and over, e.g. `sum`.
    Embellished,
    /// An operator word which is rendered with spacing on both sides, e.g. `if`.
    WordOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
    /// The argument with the symbol as an accent above it.
    AccentOver,
    /// The argument with the symbol as an accent below it.
    AccentUnder,
    SquareRoot,
    Text,
    /// A font change of the argument.
    Variant(MathVariant),
    /// The argument between a pair of fixed delimiters, e.g. `abs x`.
    Fenced(&'static str, &'static str),
}

/// The order in which the two parsed arguments of a binary function are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgOrder {
    Preserve,
    /// The second argument comes first in the output, e.g. `root n x` becomes `<mroot>x n</mroot>`.
    Swap,
}

/// What a known input word compiles to.
///
/// For leaves, `tag` and `output` describe the leaf itself. For functions, `tag` is the tag of
/// the container that is built around the arguments and `output` is the glyph used for accents
/// and the name used for plain functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub tag: Tag,
    pub output: &'static str,
    pub role: Role,
}

/// The length in bytes of the longest key in the symbol table.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Look up a complete word in the symbol table.
#[inline]
pub fn lookup(word: &str) -> Option<&'static Symbol> {
    SYMBOLS.get(word)
}

const fn ident(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mi,
        output,
        role: Role::Identifier,
    }
}

/// An operator glyph which nevertheless acts as an operand, e.g. `oo` or `RR`.
const fn constant(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::Identifier,
    }
}

const fn op(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::Operator,
    }
}

const fn big_op(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::Embellished,
    }
}

const fn word_op(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::WordOperator,
    }
}

const fn open(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::OpenBracket,
    }
}

const fn close(output: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output,
        role: Role::CloseBracket,
    }
}

const fn func(name: &'static str) -> Symbol {
    Symbol {
        tag: Tag::Mo,
        output: name,
        role: Role::Function,
    }
}

const fn unary(tag: Tag, output: &'static str, kind: UnaryKind) -> Symbol {
    Symbol {
        tag,
        output,
        role: Role::Unary(kind),
    }
}

const fn over(accent: &'static str) -> Symbol {
    unary(Tag::Mover, accent, UnaryKind::AccentOver)
}

const fn under(accent: &'static str) -> Symbol {
    unary(Tag::Munder, accent, UnaryKind::AccentUnder)
}

const fn font(name: &'static str, variant: MathVariant) -> Symbol {
    unary(Tag::Mstyle, name, UnaryKind::Variant(variant))
}

const fn fenced(name: &'static str, left: &'static str, right: &'static str) -> Symbol {
    unary(Tag::Mrow, name, UnaryKind::Fenced(left, right))
}

const fn binary(tag: Tag, name: &'static str, order: ArgOrder) -> Symbol {
    Symbol {
        tag,
        output: name,
        role: Role::Binary(order),
    }
}

static SYMBOLS: phf::Map<&'static str, Symbol> = phf::phf_map! {
    // Greek letters
    "alpha" => ident("α"),
    "beta" => ident("β"),
    "gamma" => ident("γ"),
    "Gamma" => ident("Γ"),
    "delta" => ident("δ"),
    "Delta" => ident("Δ"),
    "epsilon" => ident("ε"),
    "varepsilon" => ident("ɛ"),
    "zeta" => ident("ζ"),
    "eta" => ident("η"),
    "theta" => ident("θ"),
    "Theta" => ident("Θ"),
    "vartheta" => ident("ϑ"),
    "iota" => ident("ι"),
    "kappa" => ident("κ"),
    "lambda" => ident("λ"),
    "Lambda" => ident("Λ"),
    "mu" => ident("μ"),
    "nu" => ident("ν"),
    "xi" => ident("ξ"),
    "Xi" => ident("Ξ"),
    "pi" => ident("π"),
    "Pi" => ident("Π"),
    "rho" => ident("ρ"),
    "sigma" => ident("σ"),
    "Sigma" => ident("Σ"),
    "tau" => ident("τ"),
    "upsilon" => ident("υ"),
    "phi" => ident("ϕ"),
    "Phi" => ident("Φ"),
    "varphi" => ident("φ"),
    "chi" => ident("χ"),
    "psi" => ident("ψ"),
    "Psi" => ident("Ψ"),
    "omega" => ident("ω"),
    "Omega" => ident("Ω"),

    // Operation symbols
    "+" => op("+"),
    "-" => op("-"),
    "*" => op("⋅"),
    "**" => op("∗"),
    "***" => op("⋆"),
    "//" => op("/"),
    "\\\\" => op("\\"),
    "setminus" => op("\\"),
    "xx" => op("×"),
    "|><" => op("⋉"),
    "><|" => op("⋊"),
    "|><|" => op("⋈"),
    "-:" => op("÷"),
    "divide" => op("÷"),
    "@" => op("∘"),
    "o+" => op("⊕"),
    "ox" => op("⊗"),
    "o." => op("⊙"),
    "^^" => op("∧"),
    "vv" => op("∨"),
    "nn" => op("∩"),
    "uu" => op("∪"),
    "mod" => op("mod"),
    "/" => op("/"),
    "_" => op("_"),
    "^" => op("^"),
    "," => op(","),
    ";" => op(";"),
    "." => constant("."),
    "!" => constant("!"),
    "'" => constant("′"),

    // Large operators
    "sum" => big_op("∑"),
    "prod" => big_op("∏"),
    "^^^" => big_op("⋀"),
    "vvv" => big_op("⋁"),
    "nnn" => big_op("⋂"),
    "uuu" => big_op("⋃"),
    "bigwedge" => big_op("⋀"),
    "bigvee" => big_op("⋁"),
    "bigcap" => big_op("⋂"),
    "bigcup" => big_op("⋃"),
    "lim" => big_op("lim"),
    "Lim" => big_op("Lim"),
    "min" => big_op("min"),
    "max" => big_op("max"),
    "inf" => big_op("inf"),
    "int" => op("∫"),
    "oint" => op("∮"),

    // Relation symbols
    "=" => op("="),
    "!=" => op("≠"),
    ":=" => op(":="),
    "<" => op("<"),
    "lt" => op("<"),
    ">" => op(">"),
    "gt" => op(">"),
    "<=" => op("≤"),
    ">=" => op("≥"),
    "-<" => op("≺"),
    ">-" => op("≻"),
    "-<=" => op("⪯"),
    ">-=" => op("⪰"),
    "in" => op("∈"),
    "!in" => op("∉"),
    "sub" => op("⊂"),
    "sup" => op("⊃"),
    "sube" => op("⊆"),
    "supe" => op("⊇"),
    "-=" => op("≡"),
    "~=" => op("≅"),
    "~~" => op("≈"),
    "~" => op("∼"),
    "prop" => op("∝"),

    // Logical symbols
    "and" => word_op("and"),
    "or" => word_op("or"),
    "if" => word_op("if"),
    "not" => op("¬"),
    "=>" => op("⇒"),
    "<=>" => op("⇔"),
    "iff" => op("⇔"),
    "AA" => op("∀"),
    "EE" => op("∃"),
    "_|_" => constant("⊥"),
    "TT" => constant("⊤"),
    "|--" => op("⊢"),
    "|==" => op("⊨"),

    // Miscellaneous symbols
    "del" => constant("∂"),
    "grad" => constant("∇"),
    "+-" => op("±"),
    "-+" => op("∓"),
    "O/" => constant("∅"),
    "oo" => constant("∞"),
    "aleph" => constant("ℵ"),
    "..." => constant("..."),
    "cdots" => constant("⋯"),
    "vdots" => constant("⋮"),
    "ddots" => constant("⋱"),
    "diamond" => constant("⋄"),
    "square" => constant("□"),
    "angle" => constant("∠"),
    "/_" => constant("∠"),
    "/_\\" => constant("△"),
    "triangle" => constant("△"),
    ":." => constant("∴"),
    ":'" => constant("∵"),
    "quad" => constant("\u{a0}\u{a0}"),
    "qquad" => constant("\u{a0}\u{a0}\u{a0}\u{a0}"),
    "CC" => constant("ℂ"),
    "NN" => constant("ℕ"),
    "QQ" => constant("ℚ"),
    "RR" => constant("ℝ"),
    "ZZ" => constant("ℤ"),

    // Arrows
    "uarr" => op("↑"),
    "darr" => op("↓"),
    "rarr" => op("→"),
    "->" => op("→"),
    ">->" => op("↣"),
    "->>" => op("↠"),
    ">->>" => op("⤖"),
    "|->" => op("↦"),
    "larr" => op("←"),
    "harr" => op("↔"),
    "rArr" => op("⇒"),
    "lArr" => op("⇐"),
    "hArr" => op("⇔"),

    // Brackets
    "(" => open("("),
    ")" => close(")"),
    "[" => open("["),
    "]" => close("]"),
    "{" => open("{"),
    "}" => close("}"),
    "(:" => open("⟨"),
    ":)" => close("⟩"),
    "<<" => open("⟨"),
    ">>" => close("⟩"),
    "{:" => open(""),
    ":}" => close(""),
    "|__" => open("⌊"),
    "__|" => close("⌋"),
    "|~" => open("⌈"),
    "~|" => close("⌉"),
    "|" => Symbol { tag: Tag::Mo, output: "|", role: Role::LeftRight },

    // Functions
    "sin" => func("sin"),
    "cos" => func("cos"),
    "tan" => func("tan"),
    "sec" => func("sec"),
    "csc" => func("csc"),
    "cot" => func("cot"),
    "arcsin" => func("arcsin"),
    "arccos" => func("arccos"),
    "arctan" => func("arctan"),
    "sinh" => func("sinh"),
    "cosh" => func("cosh"),
    "tanh" => func("tanh"),
    "sech" => func("sech"),
    "csch" => func("csch"),
    "coth" => func("coth"),
    "exp" => func("exp"),
    "log" => func("log"),
    "ln" => func("ln"),
    "det" => func("det"),
    "dim" => func("dim"),
    "gcd" => func("gcd"),
    "lcm" => func("lcm"),
    "lub" => func("lub"),
    "glb" => func("glb"),

    // Accents
    "hat" => over("^"),
    "bar" => over("¯"),
    "overline" => over("¯"),
    "vec" => over("→"),
    "tilde" => over("~"),
    "dot" => over("."),
    "ddot" => over(".."),
    "obrace" => over("⏞"),
    "overbrace" => over("⏞"),
    "ul" => under("\u{332}"),
    "underline" => under("\u{332}"),
    "ubrace" => under("⏟"),
    "underbrace" => under("⏟"),

    // Other unary functions
    "sqrt" => unary(Tag::Msqrt, "sqrt", UnaryKind::SquareRoot),
    "text" => unary(Tag::Mtext, "text", UnaryKind::Text),
    "mbox" => unary(Tag::Mtext, "mbox", UnaryKind::Text),
    "abs" => fenced("abs", "|", "|"),
    "norm" => fenced("norm", "∥", "∥"),
    "floor" => fenced("floor", "⌊", "⌋"),
    "ceil" => fenced("ceil", "⌈", "⌉"),

    // Fonts
    "bb" => font("bb", MathVariant::Bold),
    "bbb" => font("bbb", MathVariant::DoubleStruck),
    "cc" => font("cc", MathVariant::Script),
    "tt" => font("tt", MathVariant::Monospace),
    "fr" => font("fr", MathVariant::Fraktur),
    "sf" => font("sf", MathVariant::SansSerif),

    // Binary functions
    "frac" => binary(Tag::Mfrac, "frac", ArgOrder::Preserve),
    "root" => binary(Tag::Mroot, "root", ArgOrder::Swap),
    "stackrel" => binary(Tag::Mover, "stackrel", ArgOrder::Swap),
    "overset" => binary(Tag::Mover, "overset", ArgOrder::Swap),
    "underset" => binary(Tag::Munder, "underset", ArgOrder::Swap),
};
