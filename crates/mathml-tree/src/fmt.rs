pub(crate) const INDENT: &str = "    ";

pub(crate) fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_indent_is_noop() {
        let mut s = String::from("<mi>");
        new_line_and_indent(&mut s, 0);
        assert_eq!(s, "<mi>");
    }

    #[test]
    fn indent_starts_new_line() {
        let mut s = String::new();
        new_line_and_indent(&mut s, 2);
        assert_eq!(s, "\n        ");
    }
}
