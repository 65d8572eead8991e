use asciimath_core::{AsciiMathToMathML, Config, MathDisplay, PrettyPrint};
use insta::assert_snapshot;

#[test]
fn deserialize_full_config() {
    let config: Config = toml::from_str(
        r##"
        pretty-print = "always"
        display = "block"
        xml-namespace = true
        display-style = true
        math-color = "#336699"
        math-background = "white"
        math-size = "1.2em"
        font-family = "STIX Two Math"
        "##,
    )
    .unwrap();
    assert_eq!(
        config,
        Config {
            pretty_print: PrettyPrint::Always,
            display: MathDisplay::Block,
            xml_namespace: true,
            display_style: true,
            math_color: Some("#336699".to_string()),
            math_background: Some("white".to_string()),
            math_size: Some("1.2em".to_string()),
            font_family: Some("STIX Two Math".to_string()),
        }
    );
}

#[test]
fn missing_fields_use_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());

    let config: Config = toml::from_str("pretty-print = \"auto\"").unwrap();
    assert_eq!(config.pretty_print, PrettyPrint::Auto);
    assert_eq!(config.display, MathDisplay::Inline);
}

#[test]
fn unknown_enum_value_is_rejected() {
    assert!(toml::from_str::<Config>("display = \"sideways\"").is_err());
}

#[test]
fn attribute_values_are_escaped() {
    let converter = AsciiMathToMathML::new(Config {
        math_color: Some("red\" onload=\"x".to_string()),
        ..Default::default()
    });
    assert_snapshot!(
        converter.convert("x"),
        @r#"<math><mstyle mathcolor="red&quot; onload=&quot;x"><mi>x</mi></mstyle></math>"#
    );
}

#[test]
fn pretty_block_document() {
    let converter = AsciiMathToMathML::new(Config {
        pretty_print: PrettyPrint::Always,
        display: MathDisplay::Block,
        ..Default::default()
    });
    let expected = concat!(
        "<math display=\"block\">\n",
        "    <mstyle>\n",
        "        <mfrac>\n",
        "            <mi>a</mi>\n",
        "            <mi>b</mi>\n",
        "        </mfrac>\n",
        "    </mstyle>\n",
        "</math>",
    );
    assert_eq!(converter.convert("a/b"), expected);
}

#[test]
fn compile_ignores_pretty_print() {
    let plain = AsciiMathToMathML::default();
    let pretty = AsciiMathToMathML::new(Config {
        pretty_print: PrettyPrint::Always,
        ..Default::default()
    });
    assert_eq!(plain.compile("sum_i x_i"), pretty.compile("sum_i x_i"));
}
