//! Paginated draw-command builder.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page; text
//! `y` is the baseline. The builder owns a vertical cursor and emits
//! [`DrawCommand`]s that a backend (PDF or HTML) replays page by page.

use serde::Serialize;

use crate::layout::font_metrics::{text_width_mm, PT_PER_MM};
use crate::layout::spans::parse_spans;
use crate::layout::wrap::{wrap_spans, wrap_text};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Lowest baseline a block may start below before the page breaks.
pub const MAX_Y: f32 = PAGE_HEIGHT - 30.0;
pub const TOP_Y: f32 = 20.0;
/// Where content resumes under a continuation header.
pub const CONTINUATION_Y: f32 = 40.0;
/// Space reserved by a default page-break check.
pub const DEFAULT_BLOCK_SPACE: f32 = 15.0;
pub const RULE_WIDTH: f32 = 0.5;

/// Baseline-to-baseline distance inside one wrapped block, as a multiple of
/// the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Cursor advance per line, in millimetres per point of font size.
const ADVANCE_PER_PT: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    NewPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Repeated at the top of every page created by overflow.
#[derive(Debug, Clone, Default)]
pub struct RunningHeader {
    pub title: String,
    /// "project – location"
    pub subtitle: String,
    pub date: String,
}

pub struct PageBuilder {
    commands: Vec<DrawCommand>,
    header: RunningHeader,
    y: f32,
    page: u32,
}

impl PageBuilder {
    pub fn new(header: RunningHeader) -> Self {
        Self {
            commands: Vec::new(),
            header,
            y: TOP_Y,
            page: 1,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn page_number(&self) -> u32 {
        self.page
    }

    // ── Page control ────────────────────────────────────────────────────────

    /// Starts a continuation page when `space_needed` would run past
    /// [`MAX_Y`].
    pub fn check_new_page(&mut self, space_needed: f32) {
        if self.y + space_needed > MAX_Y {
            self.continue_on_new_page();
        }
    }

    fn continue_on_new_page(&mut self) {
        self.push_page();
        self.draw_running_header();
        self.y = CONTINUATION_Y;
    }

    /// Starts a page deliberately. No running header is drawn.
    pub fn new_page(&mut self) {
        self.push_page();
        self.y = TOP_Y;
    }

    fn push_page(&mut self) {
        self.commands.push(DrawCommand::NewPage);
        self.page += 1;
    }

    fn draw_running_header(&mut self) {
        let header = self.header.clone();
        let page_label = format!("Page {}", self.page);
        self.text_at(MARGIN, 15.0, 10.0, true, &header.title);
        self.text_at(PAGE_WIDTH - MARGIN - 20.0, 15.0, 10.0, true, &page_label);
        self.text_at(MARGIN, 25.0, 10.0, false, &header.subtitle);
        self.text_at(PAGE_WIDTH - MARGIN - 30.0, 25.0, 10.0, false, &header.date);
        self.line(MARGIN, 30.0, PAGE_WIDTH - MARGIN, 30.0);
    }

    // ── Flowing content ─────────────────────────────────────────────────────

    /// Wrapped text in one weight. Advances the cursor by
    /// `lines × size × 0.4 + 3`. A block whose lines would pass [`MAX_Y`]
    /// carries on below the header of a continuation page.
    pub fn add_text(&mut self, text: &str, size: f32, bold: bool, align: Align) {
        self.check_new_page(DEFAULT_BLOCK_SPACE);

        let leading = size * LINE_HEIGHT_FACTOR / PT_PER_MM;
        let mut top = self.y;
        let mut row = 0_u32;
        for line in wrap_text(text, size, bold, CONTENT_WIDTH) {
            if row > 0 && top + row as f32 * leading > MAX_Y {
                self.continue_on_new_page();
                top = self.y;
                row = 0;
            }
            if !line.is_empty() {
                let x = aligned_x(text_width_mm(&line, size, bold), align);
                self.text_at(x, top + row as f32 * leading, size, bold, &line);
            }
            row += 1;
        }
        self.y = top + row as f32 * size * ADVANCE_PER_PT + 3.0;
    }

    /// Text with `**bold**` spans, drawn as consecutive runs per line.
    pub fn add_mixed_text(&mut self, text: &str, size: f32) {
        self.check_new_page(DEFAULT_BLOCK_SPACE);

        let spans = parse_spans(text);
        for (i, line) in wrap_spans(&spans, size, CONTENT_WIDTH).into_iter().enumerate() {
            if i > 0 && self.y > MAX_Y {
                self.continue_on_new_page();
            }
            let mut x = MARGIN;
            for run in line {
                let width = text_width_mm(&run.text, size, run.bold);
                let y = self.y;
                self.text_at(x, y, size, run.bold, &run.text);
                x += width;
            }
            self.y += size * ADVANCE_PER_PT + 1.0;
        }
        self.y += 2.0;
    }

    pub fn add_space(&mut self, space: f32) {
        self.y += space;
    }

    /// Full-width rule at the cursor.
    pub fn rule(&mut self) {
        let y = self.y;
        self.line(MARGIN, y, PAGE_WIDTH - MARGIN, y);
    }

    // ── Absolute drawing ────────────────────────────────────────────────────

    /// Text at a fixed position. Does not move the cursor.
    pub fn text_at(&mut self, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            x,
            y,
            size,
            bold,
            text: text.to_string(),
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            width: RULE_WIDTH,
        });
    }

    pub fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }
}

fn aligned_x(width: f32, align: Align) -> f32 {
    match align {
        Align::Left => MARGIN,
        Align::Center => PAGE_WIDTH / 2.0 - width / 2.0,
        Align::Right => PAGE_WIDTH - MARGIN - width,
    }
}

/// Splits a command stream at its `NewPage` markers.
pub fn split_pages(commands: &[DrawCommand]) -> Vec<&[DrawCommand]> {
    commands
        .split(|c| matches!(c, DrawCommand::NewPage))
        .collect()
}
