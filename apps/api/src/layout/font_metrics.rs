//! Static glyph-width tables for the two base-14 faces the proposal uses.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold and
//! are stored in thousandths of an em. Tables cover ASCII 0x20..=0x7E
//! (95 printable characters); index = (char as usize) - 32. The handful of
//! WinAnsi punctuation marks that appear in proposal text are listed
//! separately.

use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn for_weight(bold: bool) -> Self {
        if bold {
            Font::HelveticaBold
        } else {
            Font::Helvetica
        }
    }

    /// PostScript name used in the PDF font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name the content streams refer to.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: Font,
    widths: [u16; 95],
    /// Non-ASCII glyphs that occur in proposal copy.
    extras: &'static [(char, u16)],
    /// Width for anything not covered above. Unencodable characters are
    /// drawn as `?`, so this is the question-mark width.
    fallback: u16,
}

impl FontMetricTable {
    fn glyph_units(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        if let Some((_, w)) = self.extras.iter().find(|(ch, _)| *ch == c) {
            return *w;
        }
        // Latin-1 letters share the width of their unaccented base glyph closely
        // enough for wrapping.
        match c {
            'À'..='Å' => self.glyph_units('A'),
            'È'..='Ë' => self.glyph_units('E'),
            'Ì'..='Ï' => self.glyph_units('I'),
            'Ò'..='Ö' => self.glyph_units('O'),
            'Ù'..='Ü' => self.glyph_units('U'),
            'à'..='å' => self.glyph_units('a'),
            'è'..='ë' => self.glyph_units('e'),
            'ì'..='ï' => self.glyph_units('i'),
            'ò'..='ö' => self.glyph_units('o'),
            'ù'..='ü' => self.glyph_units('u'),
            'ñ' => self.glyph_units('n'),
            'Ñ' => self.glyph_units('N'),
            'ç' => self.glyph_units('c'),
            'Ç' => self.glyph_units('C'),
            '\u{a0}' => self.glyph_units(' '),
            _ => self.fallback,
        }
    }

    /// Width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.glyph_units(c) as f32).sum::<f32>() / 1000.0
    }

    /// Width of a string in millimetres at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt / PT_PER_MM
    }

    pub fn space_width_mm(&self, size_pt: f32) -> f32 {
        self.width_mm(" ", size_pt)
    }
}

/// Returns the static metric table for the given face.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Helvetica => &HELVETICA_TABLE,
        Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

/// Width in millimetres of `s` set in the regular or bold face.
pub fn text_width_mm(s: &str, size_pt: f32, bold: bool) -> f32 {
    get_metrics(Font::for_weight(bold)).width_mm(s, size_pt)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: Font::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    extras: &[
        ('•', 350), ('–', 556), ('—', 1000), ('‘', 222), ('’', 222),
        ('“', 333), ('”', 333), ('½', 834), ('×', 584), ('÷', 584),
        ('©', 737), ('®', 737), ('°', 400), ('…', 1000),
    ],
    fallback: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: Font::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    extras: &[
        ('•', 350), ('–', 556), ('—', 1000), ('‘', 278), ('’', 278),
        ('“', 500), ('”', 500), ('½', 834), ('×', 584), ('÷', 584),
        ('©', 737), ('®', 737), ('°', 400), ('…', 1000),
    ],
    fallback: 611,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(Font::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii() {
        // H(722) + C(722) + I(278) = 1.722em
        let w = get_metrics(Font::Helvetica).measure_str("HCI");
        assert!(close(w, 1.722), "got {w}");
        // bold b(611) vs regular b(556)
        assert!(close(get_metrics(Font::HelveticaBold).measure_str("b"), 0.611));
        assert!(close(get_metrics(Font::Helvetica).measure_str("b"), 0.556));
    }

    #[test]
    fn test_bold_sets_wider_than_regular() {
        let text = "Qualifications and Limitations of Services";
        let regular = get_metrics(Font::Helvetica).measure_str(text);
        let bold = get_metrics(Font::HelveticaBold).measure_str(text);
        assert!(bold > regular);
        // '@' is the one ASCII glyph that is narrower in bold.
        assert!(get_metrics(Font::HelveticaBold).measure_str("@") < get_metrics(Font::Helvetica).measure_str("@"));
    }

    #[test]
    fn test_punctuation_extras_and_fallback() {
        let m = get_metrics(Font::Helvetica);
        assert!(close(m.measure_str("–"), 0.556));
        assert!(close(m.measure_str("•"), 0.350));
        assert!(close(m.measure_str("é"), m.measure_str("e")));
        // Unencodable glyphs render as '?'.
        assert!(close(m.measure_str("漢"), m.measure_str("?")));
    }

    #[test]
    fn test_width_mm_scales_with_size() {
        // 1000 units at 72pt is exactly one inch.
        let w = get_metrics(Font::Helvetica).width_mm("—", 72.0);
        assert!(close(w, 25.4), "got {w}");
        let m = get_metrics(Font::Helvetica);
        assert!(close(m.width_mm("abc", 20.0), 2.0 * m.width_mm("abc", 10.0)));
    }

    #[test]
    fn test_resource_names_are_distinct() {
        assert_ne!(
            Font::Helvetica.resource_name(),
            Font::HelveticaBold.resource_name()
        );
        assert_eq!(Font::for_weight(true).base_font(), "Helvetica-Bold");
    }
}
