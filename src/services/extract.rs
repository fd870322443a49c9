use lopdf::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF is password protected")]
    Encrypted,

    #[error("Failed to parse PDF: {0}")]
    Malformed(String),

    #[error("Failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },
}

/// Extract the text of every page, one page per line block, joined with
/// newlines.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        let msg = e.to_string();
        let lowered = msg.to_lowercase();
        if lowered.contains("password") || lowered.contains("encrypt") {
            ExtractError::Encrypted
        } else {
            ExtractError::Malformed(msg)
        }
    })?;

    if doc.is_encrypted() {
        return Err(ExtractError::Encrypted);
    }

    let mut text = String::new();
    for page in doc.get_pages().keys() {
        let page_text = doc.extract_text(&[*page]).map_err(|e| ExtractError::Page {
            page: *page,
            reason: e.to_string(),
        })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}

/// One-page PDF containing "Hello World!", built with lopdf so the
/// extraction path has real content to chew on.
#[cfg(test)]
pub(crate) fn sample_pdf() -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 48.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello World!")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encoding content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serializing sample PDF");
    bytes
}
