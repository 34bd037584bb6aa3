//! On-screen preview: the same draw commands as the PDF, positioned
//! absolutely on A4-sized HTML pages.

use serde::Serialize;
use tera::{Context, Tera};

use crate::layout::font_metrics::PT_PER_MM;
use crate::layout::page::{split_pages, PAGE_HEIGHT, PAGE_WIDTH};
use crate::layout::DrawCommand;
use crate::render::RenderError;

const TEMPLATE_NAME: &str = "preview.html";
const PREVIEW_TEMPLATE: &str = include_str!("../../templates/preview.html");

/// Distance from the top of a CSS line box (line-height 1) to the baseline,
/// as a fraction of the font size.
const BASELINE_OFFSET: f32 = 0.8;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PreviewItem {
    Text {
        left: f32,
        top: f32,
        font_size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Serialize)]
struct PreviewPage {
    number: usize,
    items: Vec<PreviewItem>,
}

#[derive(Debug, Serialize)]
struct PreviewContext<'a> {
    title: &'a str,
    page_width: f32,
    page_height: f32,
    pages: Vec<PreviewPage>,
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

fn preview_item(cmd: &DrawCommand) -> Option<PreviewItem> {
    match cmd {
        DrawCommand::Text {
            x,
            y,
            size,
            bold,
            text,
        } => Some(PreviewItem::Text {
            left: round2(*x),
            top: round2(y - size / PT_PER_MM * BASELINE_OFFSET),
            font_size: *size,
            bold: *bold,
            text: text.clone(),
        }),
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            width,
        } => Some(PreviewItem::Rule {
            left: round2(x1.min(*x2)),
            top: round2(y1.min(*y2) - width / 2.0),
            width: round2((x2 - x1).abs().max(*width)),
            height: round2((y2 - y1).abs().max(*width)),
        }),
        DrawCommand::NewPage => None,
    }
}

/// Renders the command stream as a standalone HTML document.
pub fn render_preview(commands: &[DrawCommand], title: &str) -> Result<String, RenderError> {
    let pages = split_pages(commands)
        .into_iter()
        .enumerate()
        .map(|(i, page)| PreviewPage {
            number: i + 1,
            items: page.iter().filter_map(preview_item).collect(),
        })
        .collect();

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, PREVIEW_TEMPLATE)?;
    let context = Context::from_serialize(&PreviewContext {
        title,
        page_width: PAGE_WIDTH,
        page_height: PAGE_HEIGHT,
        pages,
    })?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Align, PageBuilder, RunningHeader};

    fn commands() -> Vec<DrawCommand> {
        let mut page = PageBuilder::new(RunningHeader::default());
        page.add_text("Errors and Omissions (E&O) <coverage>", 10.0, false, Align::Left);
        page.rule();
        page.add_mixed_text("plus **10% markup**", 10.0);
        page.new_page();
        page.add_text("AGREEMENT", 14.0, true, Align::Center);
        page.finish()
    }

    #[test]
    fn test_preview_has_one_section_per_page() {
        let html = render_preview(&commands(), "Oak Tower").unwrap();
        assert_eq!(html.matches("<section class=\"page\"").count(), 2);
        assert!(html.contains("<title>Oak Tower</title>"));
        assert!(html.contains(">AGREEMENT</span>"));
        assert!(html.contains("class=\"rule\""));
    }

    #[test]
    fn test_preview_escapes_text() {
        let html = render_preview(&commands(), "A & B").unwrap();
        assert!(html.contains("(E&amp;O) &lt;coverage&gt;"));
        assert!(html.contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn test_bold_runs_are_marked() {
        let html = render_preview(&commands(), "x").unwrap();
        assert!(html.contains("class=\"t b\""));
        assert!(html.contains(">10% markup</span>"));
    }

    #[test]
    fn test_text_top_sits_above_baseline() {
        let item = preview_item(&DrawCommand::Text {
            x: 20.0,
            y: 40.0,
            size: 10.0,
            bold: false,
            text: "x".to_string(),
        });
        let Some(PreviewItem::Text { top, .. }) = item else {
            panic!("expected text")
        };
        assert!(top < 40.0 && top > 35.0);
    }
}
