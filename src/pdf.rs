//! PDF serialization of a laid-out [`Document`].
//!
//! Text is set in the standard Type1 fonts with `WinAnsiEncoding`, so no
//! font programs are embedded. Object numbering and resource order depend
//! only on the document, which keeps the output byte-for-byte reproducible.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::document::{Document, Page};
use crate::error::{Error, Result};
use crate::fonts::{FontFace, encode_winansi};

const PRODUCER: &str = "mdpage";

/// Font resource name on every page, e.g. `/F1` for Helvetica.
fn resource_name(face: FontFace) -> String {
    format!("F{}", face.index() + 1)
}

/// Faces drawn anywhere in the document, in resource order.
fn used_faces(doc: &Document) -> Vec<FontFace> {
    FontFace::ALL
        .into_iter()
        .filter(|face| doc.commands().any(|(_, cmd)| cmd.face == *face))
        .collect()
}

fn page_content(page: &Page, page_height: f32) -> Result<Vec<u8>> {
    let mut content = Content::new();

    for cmd in page.commands.iter().filter(|cmd| !cmd.text.is_empty()) {
        let text = encode_winansi(&cmd.text, cmd.face)?;
        let name = resource_name(cmd.face);
        let (r, g, b) = cmd.color.to_unit();
        let baseline = page_height - (cmd.y + cmd.size * cmd.face.ascent());

        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(Name(name.as_bytes()), cmd.size);
        content.next_line(cmd.x, baseline);
        content.show(Str(&text));
        content.end_text();
    }

    Ok(content.finish().to_vec())
}

pub fn write_document(doc: &Document) -> Result<Vec<u8>> {
    if doc.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();

    let faces: Vec<(FontFace, Ref, String)> = used_faces(doc)
        .into_iter()
        .map(|face| (face, alloc.bump(), resource_name(face)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.document_info(info_id).producer(TextStr(PRODUCER));

    let mut page_ids = Vec::with_capacity(doc.page_count());
    for page in doc.pages() {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let data = page_content(page, doc.page_height)?;
        pdf.stream(content_id, &data);

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, doc.page_width, doc.page_height))
            .parent(page_tree_id)
            .contents(content_id);

        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        for (_, font_id, name) in &faces {
            fonts.pair(Name(name.as_bytes()), *font_id);
        }
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (face, font_id, _) in &faces {
        pdf.type1_font(*font_id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    log::debug!(
        "serialized {} page(s) with {} font(s)",
        page_ids.len(),
        faces.len()
    );
    Ok(pdf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;
    use crate::document::DrawCommand;
    use crate::fonts::TextStyle;

    fn doc_with(text: &str, face: FontFace) -> Document {
        let mut doc = Document::new(595.28, 841.89);
        doc.push_page();
        doc.draw(
            0,
            DrawCommand {
                text: text.to_string(),
                x: 50.0,
                y: 50.0,
                width: 0.0,
                face,
                size: 12.0,
                color: Rgb::new(80, 80, 80),
            },
        );
        doc
    }

    #[test]
    fn writes_a_pdf_header_and_used_fonts_only() {
        let bytes = write_document(&doc_with("x", FontFace::monospace())).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Courier"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(!text.contains("/Helvetica"));
    }

    #[test]
    fn identical_documents_serialize_identically() {
        let doc = doc_with("same", FontFace::proportional(TextStyle::Bold));
        assert_eq!(write_document(&doc).unwrap(), write_document(&doc).unwrap());
    }

    #[test]
    fn unencodable_text_fails_the_export() {
        let doc = doc_with("\u{4E2D}", FontFace::proportional(TextStyle::Normal));
        assert!(matches!(
            write_document(&doc),
            Err(Error::UnsupportedCharacter { .. })
        ));
    }

    #[test]
    fn face_resource_names_are_stable() {
        assert_eq!(resource_name(FontFace::proportional(TextStyle::Normal)), "F1");
        assert_eq!(resource_name(FontFace::monospace()), "F5");
    }
}
