//! Internal library for the `asciimath-core` crate for representing and rendering MathML.
//!
//! This library allows you to construct a tree representing MathML and then render it to a
//! string.
//!
//! # Example
//!
//! ```rust
//! use asciimath_tree_internal::ast::Node;
//! use asciimath_tree_internal::tag::Tag;
//!
//! let tree = Node::container(
//!     Tag::Munder,
//!     vec![Node::leaf(Tag::Mo, "∑"), Node::leaf(Tag::Mi, "i")],
//! );
//!
//! let mut output = String::new();
//! tree.emit(&mut output, 0).unwrap();
//! assert_eq!(output, "<munder><mo>∑</mo><mi>i</mi></munder>");
//! ```
pub mod ast;
pub mod escape;
mod fmt;
pub mod tag;
