//! Content formatting for post bodies.

/// Render a post's content as a markdown blockquote for reply composition.
///
/// Every line (including blank ones) is prefixed with `"> "` and the result
/// ends with a blank separator line so the reply cursor lands below the
/// quote.
pub fn quote_content(content: &str) -> String {
    let mut quoted = String::with_capacity(content.len() + 32);
    for line in content.lines() {
        quoted.push_str("> ");
        quoted.push_str(line);
        quoted.push('\n');
    }
    if quoted.is_empty() {
        quoted.push_str("> \n");
    }
    quoted.push('\n');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_single_line() {
        assert_eq!(quote_content("hello"), "> hello\n\n");
    }

    #[test]
    fn quotes_every_line() {
        let quoted = quote_content("first\n\nthird");
        assert_eq!(quoted, "> first\n> \n> third\n\n");
    }

    #[test]
    fn empty_content_still_yields_a_quote_marker() {
        assert_eq!(quote_content(""), "> \n\n");
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        assert_eq!(quote_content("line\n"), "> line\n\n");
    }
}
