//! Greedy word wrapping against the static metric tables.
//!
//! Words are separated by spaces; explicit `\n` always breaks. A single word
//! wider than the line is split at character boundaries so nothing overflows
//! the right margin.

use crate::layout::font_metrics::{get_metrics, Font};
use crate::layout::spans::Span;

// ────────────────────────────────────────────────────────────────────────────
// Single-weight text
// ────────────────────────────────────────────────────────────────────────────

/// Wraps `text` set in one weight to lines no wider than `max_width_mm`.
///
/// An empty paragraph (blank line or empty input) yields one empty line, so
/// the caller's cursor still advances.
pub fn wrap_text(text: &str, size_pt: f32, bold: bool, max_width_mm: f32) -> Vec<String> {
    let metrics = get_metrics(Font::for_weight(bold));
    let space_w = metrics.space_width_mm(size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let mut first_on_line = true;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            for piece in split_long_word(word, max_width_mm, |s| metrics.width_mm(s, size_pt)) {
                let word_w = metrics.width_mm(&piece, size_pt);
                let gap = if first_on_line { 0.0 } else { space_w };

                if !first_on_line && current_width + gap + word_w > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(&piece);
                    current_width = word_w;
                } else {
                    if !first_on_line {
                        current.push(' ');
                    }
                    current.push_str(&piece);
                    current_width += gap + word_w;
                    first_on_line = false;
                }
            }
        }
        lines.push(current);
    }
    lines
}

/// Breaks a word that cannot fit on a line by itself into line-sized pieces.
fn split_long_word<F>(word: &str, max_width_mm: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    if measure(word) <= max_width_mm {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure(&current) > max_width_mm && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Mixed-weight span streams
// ────────────────────────────────────────────────────────────────────────────

enum Token {
    /// One word; bold boundaries may fall inside it ("**$500**.").
    Word(Vec<Span>),
    Break,
}

fn tokenize(spans: &[Span]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Span> = Vec::new();

    let flush = |word: &mut Vec<Span>, tokens: &mut Vec<Token>| {
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    };

    for span in spans {
        for c in span.text.chars() {
            match c {
                ' ' => flush(&mut word, &mut tokens),
                '\n' => {
                    flush(&mut word, &mut tokens);
                    tokens.push(Token::Break);
                }
                _ => push_char(&mut word, c, span.bold),
            }
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}

/// Appends a character to the trailing run, starting a new run when the
/// weight changes.
fn push_char(runs: &mut Vec<Span>, c: char, bold: bool) {
    match runs.last_mut() {
        Some(last) if last.bold == bold => last.text.push(c),
        _ => runs.push(Span {
            text: c.to_string(),
            bold,
        }),
    }
}

fn append_runs(line: &mut Vec<Span>, runs: &[Span]) {
    for run in runs {
        for c in run.text.chars() {
            push_char(line, c, run.bold);
        }
    }
}

fn runs_width(runs: &[Span], size_pt: f32) -> f32 {
    runs.iter()
        .map(|r| get_metrics(Font::for_weight(r.bold)).width_mm(&r.text, size_pt))
        .sum()
}

/// Mixed-weight counterpart of [`split_long_word`]: cuts a word that is wider
/// than the line into pieces, keeping each character's weight.
fn split_long_runs(word: Vec<Span>, size_pt: f32, max_width_mm: f32) -> Vec<Vec<Span>> {
    if runs_width(&word, size_pt) <= max_width_mm {
        return vec![word];
    }
    let mut pieces = Vec::new();
    let mut piece: Vec<Span> = Vec::new();
    let mut piece_width = 0.0_f32;
    for run in &word {
        let metrics = get_metrics(Font::for_weight(run.bold));
        for c in run.text.chars() {
            let mut buf = [0u8; 4];
            let char_w = metrics.width_mm(c.encode_utf8(&mut buf), size_pt);
            if !piece.is_empty() && piece_width + char_w > max_width_mm {
                pieces.push(std::mem::take(&mut piece));
                piece_width = 0.0;
            }
            push_char(&mut piece, c, run.bold);
            piece_width += char_w;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Wraps a plain/bold span stream, measuring every run in its own weight.
/// Each returned line is a list of consecutive runs to draw left to right.
pub fn wrap_spans(spans: &[Span], size_pt: f32, max_width_mm: f32) -> Vec<Vec<Span>> {
    let space_w = get_metrics(Font::Helvetica).space_width_mm(size_pt);
    let mut lines: Vec<Vec<Span>> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_width = 0.0_f32;
    let mut first_on_line = true;

    for token in tokenize(spans) {
        match token {
            Token::Break => {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                first_on_line = true;
            }
            Token::Word(word) => {
                for runs in split_long_runs(word, size_pt, max_width_mm) {
                    let word_w = runs_width(&runs, size_pt);
                    let gap = if first_on_line { 0.0 } else { space_w };

                    if !first_on_line && current_width + gap + word_w > max_width_mm {
                        lines.push(std::mem::take(&mut current));
                        append_runs(&mut current, &runs);
                        current_width = word_w;
                    } else {
                        if !first_on_line {
                            // The separating space takes the weight of the run before it.
                            let bold = current.last().map(|r| r.bold).unwrap_or(false);
                            push_char(&mut current, ' ', bold);
                        }
                        append_runs(&mut current, &runs);
                        current_width += gap + word_w;
                        first_on_line = false;
                    }
                }
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
