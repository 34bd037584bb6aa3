//! Replays draw commands into a PDF with the base-14 Helvetica faces.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::font_metrics::PT_PER_MM;
use crate::layout::page::{split_pages, PAGE_HEIGHT, PAGE_WIDTH};
use crate::layout::{DrawCommand, Font};
use crate::render::RenderError;

const PRODUCER: &str = "proposal-api";

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Page coordinates put the origin at the bottom left.
fn flip(y_mm: f32) -> f32 {
    pt(PAGE_HEIGHT - y_mm)
}

/// Encodes text as WinAnsi (CP1252) bytes. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

fn page_operations(commands: &[DrawCommand]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for cmd in commands {
        match cmd {
            DrawCommand::Text {
                x,
                y,
                size,
                bold,
                text,
            } => {
                let font = Font::for_weight(*bold);
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font.resource_name().as_bytes().to_vec()),
                        Object::Real(*size),
                    ],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Real(pt(*x)), Object::Real(flip(*y))],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                ops.push(Operation::new("w", vec![Object::Real(pt(*width))]));
                ops.push(Operation::new(
                    "m",
                    vec![Object::Real(pt(*x1)), Object::Real(flip(*y1))],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![Object::Real(pt(*x2)), Object::Real(flip(*y2))],
                ));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCommand::NewPage => {}
        }
    }
    ops
}

fn font_object(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Builds the PDF bytes for a command stream. `title` goes into the
/// document information dictionary.
pub fn write_pdf(commands: &[DrawCommand], title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = font_object(&mut doc, Font::Helvetica);
    let bold = font_object(&mut doc, Font::HelveticaBold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource_name() => regular,
            Font::HelveticaBold.resource_name() => bold,
        },
    });

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        Object::Real(pt(PAGE_WIDTH)),
        Object::Real(pt(PAGE_HEIGHT)),
    ];

    let mut kids = Vec::new();
    for page in split_pages(commands) {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Align, PageBuilder, RunningHeader};

    fn sample_commands() -> Vec<DrawCommand> {
        let mut page = PageBuilder::new(RunningHeader::default());
        page.add_text("Hixson Consultants", 18.0, true, Align::Center);
        page.rule();
        page.add_mixed_text("plus **10% markup** – always", 10.0);
        page.new_page();
        page.add_text("AGREEMENT", 14.0, true, Align::Center);
        page.finish()
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Oak – Tower"), b"Oak \x96 Tower".to_vec());
        assert_eq!(encode_win_ansi("1 ½ times"), b"1 \xbd times".to_vec());
        assert_eq!(encode_win_ansi("HCI’s “best”"), b"HCI\x92s \x93best\x94".to_vec());
        assert_eq!(encode_win_ansi("漢"), b"?".to_vec());
    }

    #[test]
    fn test_pdf_has_one_page_per_segment() {
        let bytes = write_pdf(&sample_commands(), "Oak Tower").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_page_content_draws_text_and_rules() {
        let ops = page_operations(&sample_commands());
        let names: Vec<&str> = ops.iter().map(|o| o.operator.as_str()).collect();
        assert!(names.contains(&"Tj"));
        assert!(names.contains(&"S"));

        // Bold runs switch to the second font resource.
        let fonts: Vec<Vec<u8>> = ops
            .iter()
            .filter(|o| o.operator == "Tf")
            .filter_map(|o| o.operands[0].as_name().ok().map(|n| n.to_vec()))
            .collect();
        assert!(fonts.contains(&b"F2".to_vec()));
        assert!(fonts.contains(&b"F1".to_vec()));
    }

    #[test]
    fn test_coordinates_flip_to_pdf_space() {
        assert!((pt(25.4) - 72.0).abs() < 1e-3);
        assert!((flip(PAGE_HEIGHT) - 0.0).abs() < 1e-3);
        assert!((flip(0.0) - pt(PAGE_HEIGHT)).abs() < 1e-3);
    }

    #[test]
    fn test_empty_stream_still_has_a_page() {
        let bytes = write_pdf(&[], "Proposal").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
