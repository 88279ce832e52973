//! Value helpers for step arguments: table cells and doc string lines.

/// Trim the spaces and tabs enclosing a raw cell and decode its escapes.
///
/// Returns the value and the number of characters trimmed from the front.
/// `\|`, `\\` and `\n` are decoded; any other backslash is kept as written.
pub(super) fn cell_value(raw: &str) -> (String, usize) {
    let is_blank = |c: char| c == ' ' || c == '\t';
    let leading = raw.chars().take_while(|&c| is_blank(c)).count();
    let trimmed = raw.trim_matches(is_blank);

    let mut value = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('|') => value.push('|'),
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    (value, leading)
}

/// Remove up to `indent` leading spaces or tabs from a doc string line.
pub(super) fn strip_indent(line: &str, indent: usize) -> &str {
    let cut = line
        .char_indices()
        .take(indent)
        .take_while(|&(_, c)| c == ' ' || c == '\t')
        .last()
        .map_or(0, |(index, c)| index + c.len_utf8());
    line.get(cut..).unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" aaa ", "aaa", 1)]
    #[case("ddd ", "ddd", 0)]
    #[case("\ta  b\t", "a  b", 1)]
    #[case(r"a \| b", "a | b", 0)]
    #[case(r"back\\slash", r"back\slash", 0)]
    #[case(r"two\nlines", "two\nlines", 0)]
    #[case(r"keep\t", r"keep\t", 0)]
    #[case("trailing\\", "trailing\\", 0)]
    fn decodes_cells(#[case] raw: &str, #[case] value: &str, #[case] leading: usize) {
        assert_eq!(cell_value(raw), (value.to_string(), leading));
    }

    #[rstest]
    #[case("    text\n", 2, "  text\n")]
    #[case(" text\n", 4, "text\n")]
    #[case("\n", 4, "\n")]
    #[case("  x", 0, "  x")]
    #[case("\t\tx", 1, "\tx")]
    fn strips_only_whitespace_indentation(
        #[case] line: &str,
        #[case] indent: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(strip_indent(line, indent), expected);
    }
}
