use super::elements::InlineSpan;
use std::mem;

/// Splits a line of text into plain text, bold text, and links.
///
/// Only `**bold**` and `[text](url)` are recognized. These can't be nested and anything that
/// looks like the beginning of one of them but isn't terminated is kept as plain text. This always
/// returns at least one span.
pub(crate) fn tokenize_inline(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;
    while let Some(next) = rest.chars().next() {
        match try_bold(rest).or_else(|| try_link(rest)) {
            Some((span, remaining)) => {
                if !plain.is_empty() {
                    spans.push(InlineSpan::plain(mem::take(&mut plain)));
                }
                spans.push(span);
                rest = remaining;
            }
            None => {
                plain.push(next);
                rest = &rest[next.len_utf8()..];
            }
        }
    }
    if !plain.is_empty() {
        spans.push(InlineSpan::plain(plain));
    }
    if spans.is_empty() {
        spans.push(InlineSpan::plain(line));
    }
    spans
}

fn try_bold(input: &str) -> Option<(InlineSpan, &str)> {
    let inner = input.strip_prefix("**")?;
    let end = inner.find("**")?;
    if end == 0 {
        return None;
    }
    Some((InlineSpan::bold(&inner[..end]), &inner[end + 2..]))
}

fn try_link(input: &str) -> Option<(InlineSpan, &str)> {
    let inner = input.strip_prefix('[')?;
    let (text, rest) = inner.split_once("](")?;
    if text.is_empty() || text.contains(['[', ']']) {
        return None;
    }
    let (url, rest) = rest.split_once(')')?;
    if url.is_empty() {
        return None;
    }
    Some((InlineSpan::link(text, url), rest))
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("hello world")]
    #[case::empty("")]
    #[case::single_star("2 * 3 = 6")]
    #[case::brackets("array[0] (first)")]
    fn no_markers(#[case] input: &str) {
        let spans = tokenize_inline(input);
        assert_eq!(spans, &[InlineSpan::plain(input)]);
    }

    #[test]
    fn mixed_spans() {
        let spans = tokenize_inline("A **B** C [D](E) F");
        let expected = &[
            InlineSpan::plain("A "),
            InlineSpan::bold("B"),
            InlineSpan::plain(" C "),
            InlineSpan::link("D", "E"),
            InlineSpan::plain(" F"),
        ];
        assert_eq!(spans, expected);
    }

    #[test]
    fn whole_line_link() {
        let spans = tokenize_inline("[Go](tmux://main/ls -la)");
        assert_eq!(spans, &[InlineSpan::link("Go", "tmux://main/ls -la")]);
    }

    #[rstest]
    #[case::unterminated_bold("**open", vec![InlineSpan::plain("**open")])]
    #[case::empty_bold("a **** b", vec![InlineSpan::plain("a **** b")])]
    #[case::unterminated_link("[text](url", vec![InlineSpan::plain("[text](url")])]
    #[case::empty_url("[text]()", vec![InlineSpan::plain("[text]()")])]
    #[case::nested_brackets(
        "[a [b](c)",
        vec![InlineSpan::plain("[a "), InlineSpan::link("b", "c")]
    )]
    #[case::adjacent(
        "**a****b**",
        vec![InlineSpan::bold("a"), InlineSpan::bold("b")]
    )]
    fn edge_cases(#[case] input: &str, #[case] expected: Vec<InlineSpan>) {
        assert_eq!(tokenize_inline(input), expected);
    }

    #[test]
    fn unicode_text() {
        let spans = tokenize_inline("héllo **wörld** ✓");
        let expected = &[InlineSpan::plain("héllo "), InlineSpan::bold("wörld"), InlineSpan::plain(" ✓")];
        assert_eq!(spans, expected);
    }
}
