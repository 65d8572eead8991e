#![no_main]

use asciimath_core::{AsciiMathToMathML, Config, MathDisplay, Tag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let converter = AsciiMathToMathML::new(Config {
        display: MathDisplay::Block,
        ..Default::default()
    });

    let tree = converter.compile(data);
    assert_eq!(tree.tag, Tag::Math);
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].tag, Tag::Mstyle);

    let output = converter.convert(data);
    assert!(output.starts_with(r#"<math display="block"><mstyle>"#));
    assert!(output.ends_with("</mstyle></math>"));
    // The input can only ever show up as escaped text.
    assert_eq!(output.matches("</math>").count(), 1);
});
