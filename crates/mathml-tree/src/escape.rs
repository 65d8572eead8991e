/// Escapes special characters in `input` for safe inclusion in element content.
/// Specifically, it replaces:
/// - `&` with `&amp;`
/// - `<` with `&lt;`
/// - `>` with `&gt;`
///
/// This function uses `memchr` for efficient searching of special characters.
pub fn escape_html_content(output: &mut String, input: &str) {
    let mut rest = input;

    while let Some(index) = memchr::memchr3(b'&', b'<', b'>', rest.as_bytes()) {
        // The special characters are ASCII, so `index` and `index + 1` are char boundaries.
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        match after.as_bytes()[0] {
            b'&' => output.push_str("&amp;"),
            b'<' => output.push_str("&lt;"),
            _ => output.push_str("&gt;"),
        }
        rest = &after[1..];
    }

    output.push_str(rest);
}

/// Escapes special characters in `input` for safe inclusion in attributes
/// which are enclosed in double quotes.
///
/// Specifically, it replaces:
/// - `&` with `&amp;`
/// - `"` with `&quot;`
/// - `<` with `&lt;`
pub fn escape_double_quoted_attribute(output: &mut String, input: &str) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut output = String::new();
        escape_html_content(&mut output, "");
        assert_eq!(output, "");
    }

    #[test]
    fn test_no_special_characters() {
        let mut output = String::new();
        escape_html_content(&mut output, "α+β");
        assert_eq!(output, "α+β");
    }

    #[test]
    fn test_escape_relations() {
        let mut output = String::new();
        escape_html_content(&mut output, "a<b>c");
        assert_eq!(output, "a&lt;b&gt;c");
    }

    #[test]
    fn test_escape_ampersand_between_multibyte() {
        let mut output = String::new();
        escape_html_content(&mut output, "ℝ&ℕ");
        assert_eq!(output, "ℝ&amp;ℕ");
    }

    #[test]
    fn test_only_special_characters() {
        let mut output = String::new();
        escape_html_content(&mut output, "<&>");
        assert_eq!(output, "&lt;&amp;&gt;");
    }

    #[test]
    fn test_attribute_quotes() {
        let mut output = String::new();
        escape_double_quoted_attribute(&mut output, r#"red" onclick="x"#);
        assert_eq!(output, "red&quot; onclick=&quot;x");
    }

    #[test]
    fn test_attribute_plain() {
        let mut output = String::new();
        escape_double_quoted_attribute(&mut output, "#ff0000");
        assert_eq!(output, "#ff0000");
    }
}
