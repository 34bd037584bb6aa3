//! `**bold**` markup used in generated proposal sentences.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref BOLD_MARKER: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Splits text into alternating plain and bold spans. Markers without a
/// closing pair are kept as literal text; empty spans are dropped.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_MARKER.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }
        spans.push(Span::bold(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }
    spans
}

/// Text with the markers removed.
pub fn strip_markers(text: &str) -> String {
    parse_spans(text).into_iter().map(|s| s.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(parse_spans("no markup"), vec![Span::plain("no markup")]);
        assert!(parse_spans("").is_empty());
    }

    #[test]
    fn test_alternating_spans() {
        let spans = parse_spans("services for **Acme** in **Hoover, AL**.");
        assert_eq!(
            spans,
            vec![
                Span::plain("services for "),
                Span::bold("Acme"),
                Span::plain(" in "),
                Span::bold("Hoover, AL"),
                Span::plain("."),
            ]
        );
    }

    #[test]
    fn test_leading_bold_and_unclosed_marker() {
        assert_eq!(
            parse_spans("**A.** The total"),
            vec![Span::bold("A."), Span::plain(" The total")]
        );
        assert_eq!(parse_spans("cost **10%"), vec![Span::plain("cost **10%")]);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(
            strip_markers("plus **10% markup**."),
            "plus 10% markup."
        );
    }
}
