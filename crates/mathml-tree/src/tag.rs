#[cfg(feature = "serde")]
use serde::Serialize;

use strum_macros::{AsRefStr, IntoStaticStr};

/// The element names of MathML presentation markup that the compiler produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, AsRefStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    Math,
    Mstyle,
    /// Identifier.
    Mi,
    /// Number.
    Mn,
    /// Operator.
    Mo,
    Mrow,
    Mfrac,
    Msub,
    Msup,
    Msubsup,
    Munder,
    Mover,
    Munderover,
    Msqrt,
    Mroot,
    Mtable,
    Mtr,
    Mtd,
    Mtext,
    Mspace,
}

impl Tag {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Attribute names, in the order in which they are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[strum(serialize_all = "lowercase")]
pub enum Attribute {
    Xmlns,
    Display,
    Displaystyle,
    Mathvariant,
    Mathcolor,
    Mathbackground,
    Mathsize,
    Fontfamily,
    Columnalign,
    Width,
}

impl Attribute {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Values of the `mathvariant` attribute that the font commands select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MathVariant {
    #[strum(serialize = "bold")]
    Bold,
    #[strum(serialize = "double-struck")]
    DoubleStruck,
    #[strum(serialize = "script")]
    Script,
    #[strum(serialize = "monospace")]
    Monospace,
    #[strum(serialize = "fraktur")]
    Fraktur,
    #[strum(serialize = "sans-serif")]
    SansSerif,
}

impl MathVariant {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_lowercase() {
        assert_eq!(Tag::Math.as_str(), "math");
        assert_eq!(Tag::Munderover.as_str(), "munderover");
        assert_eq!(Tag::Mtd.as_ref(), "mtd");
    }

    #[test]
    fn attribute_order_follows_declaration() {
        assert!(Attribute::Xmlns < Attribute::Display);
        assert!(Attribute::Mathcolor < Attribute::Columnalign);
        assert_eq!(Attribute::Columnalign.as_str(), "columnalign");
    }

    #[test]
    fn variant_names() {
        assert_eq!(MathVariant::DoubleStruck.as_str(), "double-struck");
        assert_eq!(MathVariant::SansSerif.as_str(), "sans-serif");
    }
}
