//! Proposal document output: composition into draw commands, the PDF backend
//! and the HTML preview.
pub mod document;
pub mod handlers;
pub mod html;
pub mod pdf;
pub mod terms;

use thiserror::Error;

use crate::proposal::models::ProposalDocument;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preview template failed: {0}")]
    Template(#[from] tera::Error),
}

/// A rendered PDF with its download name.
pub struct RenderedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn proposal_pdf(doc: &ProposalDocument) -> Result<RenderedPdf, RenderError> {
    let commands = document::compose(doc);
    let bytes = pdf::write_pdf(&commands, &doc.header.proposal_title)?;
    Ok(RenderedPdf {
        filename: doc.pdf_filename(),
        bytes,
    })
}

pub fn proposal_preview(doc: &ProposalDocument) -> Result<String, RenderError> {
    let commands = document::compose(doc);
    let title = if doc.header.proposal_title.trim().is_empty() {
        "Proposal Preview"
    } else {
        doc.header.proposal_title.as_str()
    };
    html::render_preview(&commands, title)
}
